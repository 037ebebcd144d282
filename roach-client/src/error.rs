//! Error types for the print client

use thiserror::Error;

/// Print client error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Network round trip could not complete
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success HTTP status
    #[error("Service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body was not the expected structured verdict
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Service accepted the batch but reports it could not execute it
    #[error("Print rejected: {0}")]
    Rejected(String),
}

/// Result type for print client operations
pub type PrintResult<T> = Result<T, PrintError>;
