//! Error types for janitor operations

use thiserror::Error;

/// Errors that can occur during a sweep or while running the worker
#[derive(Error, Debug)]
pub enum JanitorError {
    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}

impl From<impact_store::StoreError> for JanitorError {
    fn from(err: impact_store::StoreError) -> Self {
        Self::Store(err.to_string())
    }
}
