use thiserror::Error;

use crate::model::RunId;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Run {run_id} does not name its tool")]
    MissingToolName { run_id: RunId },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Schema(#[from] sarif_explorer_schema::SchemaError),
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
