//! Error types shared across the crate.

use thiserror::Error;

/// Top-level error type for all aget operations.
#[derive(Debug, Error)]
pub enum AgetError {
    /// Configuration could not be loaded or is malformed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Identity file missing, unreadable, or failed validation
    #[error("Identity error: {0}")]
    IdentityError(String),

    /// Review workflow violation (unknown review, bad severity, closed record)
    #[error("Review error: {0}")]
    ReviewError(String),

    /// Session state could not be read or written
    #[error("Session error: {0}")]
    SessionError(String),

    /// Filesystem failure while persisting records
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AgetError {
    /// Wrap an I/O error that occurred while touching `context`.
    pub fn storage_io(context: &str, err: std::io::Error) -> Self {
        AgetError::StorageError(format!("{}: {}", context, err))
    }
}
