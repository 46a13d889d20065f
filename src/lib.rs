use crate::domain::simulation::Simulation;
use crate::error::Result;
use crate::loader::parser::load_scenario;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Loads a scenario file and builds a ready-to-run simulation.
pub fn load_simulation(file_path: &str) -> Result<Simulation> {
    let (settings, network) = load_scenario(file_path)?;
    log::info!("Scenario parsed successfully.");

    Simulation::new(settings, network)
}
