pub mod event_queue;
#[allow(clippy::module_inception)]
pub mod simulator;
pub mod simulator_mock;
