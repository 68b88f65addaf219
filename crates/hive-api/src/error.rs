//! Error types for the API server.

use std::net::IpAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hive_logs::LogError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur in the API server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(std::net::SocketAddr, std::io::Error),

    /// Log record not found.
    #[error("log record not found: {0}")]
    NotFound(u64),

    /// Invalid request parameters or body.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Client exceeded its request budget.
    #[error("rate limit exceeded for {0}")]
    RateLimited(IpAddr),

    /// Underlying store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            Self::RateLimited(_) => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
            Self::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            Self::BindFailed(_, _) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };

        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            r#"{"error":"internal_error","message":"failed to serialize error"}"#.to_string()
        });

        (
            status,
            [("content-type", "application/json")],
            json,
        )
            .into_response()
    }
}

impl From<LogError> for ApiError {
    fn from(err: LogError) -> Self {
        match err {
            LogError::Validation(msg) => Self::InvalidRequest(msg),
            LogError::NotFound(id) => Self::NotFound(id),
            LogError::Store(msg) => Self::Storage(msg),
            LogError::Io(e) => Self::Storage(e.to_string()),
            LogError::Serialization(e) => Self::Internal(e.to_string()),
        }
    }
}
