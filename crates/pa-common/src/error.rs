//! Error types for the audit tools.
//!
//! Errors carry a stable category for grouping: transport/backend failures
//! surface to the user as messages, while malformed payload shapes never
//! produce an error at all (they degrade to generic rendering instead).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for audit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Audit backend reported failure or was unreachable.
    Backend,
    /// Request parameters failed validation.
    Request,
    /// File I/O errors.
    Io,
    /// JSON serialization/deserialization errors.
    Serialization,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Backend => write!(f, "backend"),
            ErrorCategory::Request => write!(f, "request"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Serialization => write!(f, "serialization"),
        }
    }
}

/// Unified error type for the audit tools.
#[derive(Error, Debug)]
pub enum Error {
    /// The audit backend returned an unsuccessful envelope or was unreachable.
    #[error("audit backend error: {0}")]
    Backend(String),

    /// Request parameters failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Backend(_) => ErrorCategory::Backend,
            Error::InvalidRequest(_) => ErrorCategory::Request,
            Error::Json(_) => ErrorCategory::Serialization,
            Error::Io(_) => ErrorCategory::Io,
        }
    }
}
