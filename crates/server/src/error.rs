//! Relay error types
//!
//! Structured error responses for the HTTP surface. Read-path misses are
//! client errors with machine-readable codes, never 5xx.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Relay errors
#[derive(Debug, Error)]
pub enum ServerError {
    /// Invalid request parameters
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Session has no buffered history
    #[error("session '{0}' not found")]
    SessionNotFound(String),

    /// No buffered event carries the requested id
    #[error("no event '{id}' in session '{session}'")]
    LookupMiss { session: String, id: String },

    /// Unknown formatter family name
    #[error(transparent)]
    UnknownFormat(#[from] peek_format::UnknownFormat),

    /// Subscriber limit reached for a session
    #[error("session '{session}' has reached the maximum of {max} subscribers")]
    MaxSubscribers { session: String, max: usize },

    /// Request body over the configured limit
    #[error("payload size {size} exceeds limit {limit}")]
    PayloadTooLarge { size: usize, limit: usize },
}

impl ServerError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::LookupMiss { .. } => StatusCode::BAD_REQUEST,
            Self::UnknownFormat(_) => StatusCode::BAD_REQUEST,
            Self::MaxSubscribers { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::SessionNotFound(_) => "SESSION_NOT_FOUND",
            Self::LookupMiss { .. } => "EVENT_NOT_FOUND",
            Self::UnknownFormat(_) => "UNKNOWN_FORMAT",
            Self::MaxSubscribers { .. } => "MAX_SUBSCRIBERS",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code (machine-readable)
    pub error: &'static str,
    /// Error message (human-readable)
    pub message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.code(),
            message: self.to_string(),
        };

        tracing::warn!(
            error_code = body.error,
            error_message = %body.message,
            status = %status,
            "relay error"
        );

        (status, Json(body)).into_response()
    }
}

/// Result type for relay operations
pub type Result<T> = std::result::Result<T, ServerError>;
