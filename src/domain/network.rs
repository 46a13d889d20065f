pub mod mote;
#[allow(clippy::module_inception)]
pub mod network;
pub mod topology_trait;
