//! Error types for the log record system.

use thiserror::Error;

/// Errors that can occur in the log record system.
#[derive(Debug, Error)]
pub enum LogError {
    /// A submission or query parameter failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record exists with the given ID.
    #[error("log record not found: {0}")]
    NotFound(u64),

    /// The storage backend reported a failure.
    #[error("store error: {0}")]
    Store(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogError {
    /// Builds a validation error naming every missing or empty required field.
    #[must_use]
    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::Validation(format!("missing or empty fields: {}", fields.join(", ")))
    }

    /// Returns true if this error maps to a client-input failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this error maps to a missing-record failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias for log record operations.
pub type Result<T> = std::result::Result<T, LogError>;
