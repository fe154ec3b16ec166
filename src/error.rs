//! Error types for numlog
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in numlog
#[derive(Debug, Error)]
pub enum NumlogError {
    /// Pending entry text is not a number
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No log is selected (index out of range or no logs at all)
    #[error("No current log")]
    NoCurrentLog,

    /// Persisted state could not be parsed or had an unexpected shape
    #[error("Corrupt state: {0}")]
    CorruptState(String),

    /// Writing to durable storage failed
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// One line of an imported file could not be parsed
    #[error("Malformed import line {line}: {reason}")]
    ImportLineMalformed { line: usize, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for numlog operations
pub type Result<T> = std::result::Result<T, NumlogError>;
