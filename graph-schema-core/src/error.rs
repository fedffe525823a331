//! Error types for graph-schema-core

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Graph-source/storage failures
    #[error("Source error: {0}")]
    Source(String),

    /// Entity id not present in the read scope
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed graph document (bad endpoints, out-of-range ids)
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    /// JSON parsing error (serde_json)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unit-of-work join/panic failure
    #[error("Task error: {0}")]
    Task(String),
}

impl Error {
    /// Create a source error
    pub fn source(msg: impl Into<String>) -> Self {
        Error::Source(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create an invalid graph error
    pub fn invalid_graph(msg: impl Into<String>) -> Self {
        Error::InvalidGraph(msg.into())
    }

    /// Create a task error
    pub fn task(msg: impl Into<String>) -> Self {
        Error::Task(msg.into())
    }
}
