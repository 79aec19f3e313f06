//! Error handling for school ingestion.
//!
//! Errors only surface at the source-retrieval and cache boundaries. Record- and
//! field-level problems never become errors; they are coerced or dropped during
//! assembly.

use std::io;

/// Specialized error type for source retrieval and cache operations
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Error opening or reading a source file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Source bytes were not valid JSON
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// Source decoded, but not into an array of records
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Source retrieval did not finish within the configured bound
    #[error("Timed out after {seconds}s retrieving source '{source_name}'")]
    Timeout {
        /// Name of the source that timed out
        source_name: String,
        /// Configured bound in seconds
        seconds: u64,
    },

    /// No configured source matches the requested name
    #[error("Unknown source: {0}")]
    UnknownSource(String),

    /// A spawned retrieval or parse task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),

    /// Shared state could not be accessed
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl From<tokio::task::JoinError> for IngestError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::Task(error.to_string())
    }
}

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;
