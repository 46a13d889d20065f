use serde::de::DeserializeOwned;
use std::fs;

use crate::api::simulation_dto::ScenarioDto;
use crate::domain::network::network::Network;
use crate::domain::settings::SimSettings;
use crate::error::{Error, Result};

/// Parses a JSON file into a given type `T`.
///
/// Errors are automatically converted into `crate::error::Error` variants:
/// - `Error::IoError` if the file cannot be read.
/// - `Error::DeserializationError` if the JSON is malformed.
pub fn parse_json_file<T: DeserializeOwned>(file_path: &str) -> Result<T> {
    let data = fs::read_to_string(file_path).map_err(Error::IoError)?;

    parse_json_str(&data)
}

pub fn parse_json_str<T: DeserializeOwned>(data: &str) -> Result<T> {
    let parsed_data: T = serde_json::from_str(data).map_err(Error::DeserializationError)?;

    Ok(parsed_data)
}

/// Turns a parsed scenario into validated settings and a network.
pub fn build_scenario(dto: ScenarioDto) -> Result<(SimSettings, Network)> {
    let settings = SimSettings::try_from(dto.settings)?;
    let network = Network::try_from(dto.motes)?;

    log::info!("Scenario loaded: {} motes, root is mote {}.", network.len(), network.root());

    Ok((settings, network))
}

/// Reads, parses and validates a scenario file.
pub fn load_scenario(file_path: &str) -> Result<(SimSettings, Network)> {
    log::info!("Loading scenario from '{}'.", file_path);
    build_scenario(parse_json_file::<ScenarioDto>(file_path)?)
}
