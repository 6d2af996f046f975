//! Error types for the tap support utilities.

use thiserror::Error;

/// Main error type for tap utility operations.
#[derive(Error, Debug)]
pub enum TapError {
    /// One or more required config keys were not supplied
    #[error("Config is missing required keys: {0:?}")]
    MissingConfigKeys(Vec<String>),

    /// Other configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid rate limiter parameters
    #[error("Rate limit error: {0}")]
    RateLimit(String),

    /// Chunking with a size of zero
    #[error("Chunk size must be greater than zero")]
    InvalidChunkSize,

    /// A timestamp that does not match the bookmark format
    #[error("Timestamp error: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// JSON parse errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tap utility operations.
pub type Result<T> = std::result::Result<T, TapError>;
