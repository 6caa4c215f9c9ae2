//! Core error types for keymeter.

use thiserror::Error;

/// Core error type for keymeter operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid data from API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unknown endpoint schema name.
    #[error("Unknown schema: {0} (expected 'credits' or 'key')")]
    UnknownSchema(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
