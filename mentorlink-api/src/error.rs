//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unresolvable account identity (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// One-shot creation invariant violated (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Appointment against a non-professional mentor (422)
    #[error("Invalid mentor: {0}")]
    InvalidMentor(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<mentorlink_common::Error> for ApiError {
    fn from(err: mentorlink_common::Error) -> Self {
        use mentorlink_common::Error;
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::BadRequest(msg) => ApiError::BadRequest(msg),
            Error::InvariantViolation(msg) => ApiError::Conflict(msg),
            Error::InvalidMentor(msg) => ApiError::InvalidMentor(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::InvalidMentor(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_MENTOR", msg)
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
