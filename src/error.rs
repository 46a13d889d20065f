use thiserror::Error;

use crate::domain::utils::id::MoteId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse scenario JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write statistics: {0}")]
    CsvError(#[from] csv::Error),

    /// Invalid scheduler or simulation parameters. The only fatal condition of a scheduling run.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Mote {0} is not part of the network")]
    UnknownMote(MoteId),
}

pub type Result<T> = std::result::Result<T, Error>;
