//! Error types for sehat-core

use thiserror::Error;

/// Main error type for the sehat-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller-supplied data violated a store invariant
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced resident does not exist
    #[error("resident not found: {0}")]
    ResidentNotFound(String),
}

/// Result type alias for sehat-core
pub type Result<T> = std::result::Result<T, Error>;
