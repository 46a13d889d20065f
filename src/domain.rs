pub mod network;
pub mod scheduler;
pub mod settings;
pub mod simulation;
pub mod simulator;
pub mod statistics;
pub mod utils;
