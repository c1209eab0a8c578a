//! Slidekick Error Types
//!
//! Centralized error handling for the navigation core.

use thiserror::Error;

/// Central error type for Slidekick
#[derive(Error, Debug)]
pub enum NavError {
    #[error("ASR engine error: {0}")]
    Asr(String),

    #[error("Audio capture error: {0}")]
    Audio(String),

    #[error("Embedding error: {0}")]
    Embed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Slidekick operations
pub type NavResult<T> = Result<T, NavError>;

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for NavError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        NavError::Lock(err.to_string())
    }
}
