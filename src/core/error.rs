use thiserror::Error;

use crate::model::ship::FieldValue;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("malformed dice expression '{expr}': {reason}")]
    MalformedDice { expr: String, reason: String },

    #[error("invalid ship '{ship}': {reason}")]
    InvalidShip { ship: String, reason: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unknown ship field: {0}")]
    UnknownField(String),

    #[error("field '{field}' cannot be set from {value:?}")]
    FieldTypeMismatch { field: String, value: FieldValue },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("fleet file error: {0}")]
    FleetFileError(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
