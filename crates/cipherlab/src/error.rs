//! Error types for the cipherlab facade.

use cipherlab_core::CoreError;
use thiserror::Error;

/// Errors that can occur while configuring or running a cipher.
#[derive(Debug, Error)]
pub enum LabError {
    /// Key validation or transform failure from the core.
    #[error("cipher error: {0}")]
    Core(#[from] CoreError),

    /// Unknown algorithm, missing config section or payload of the wrong kind.
    #[error("config error: {0}")]
    Config(String),

    /// Configuration document is not valid JSON for its schema.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, LabError>;
