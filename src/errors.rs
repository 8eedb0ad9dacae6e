use std::result::Result as StdResult;

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::preview::PreviewError;

/// Unified error type for the record, config, and preview layers.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Preview(#[from] PreviewError),
}

pub type Result<T> = StdResult<T, RosterError>;
