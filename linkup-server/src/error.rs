//! Error handling for the Linkup server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use linkup::LinkupError;

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    /// Human readable message
    pub message: String,
    /// Error type
    pub error: String,
}

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    /// Linkup library error
    #[error(transparent)]
    Linkup(#[from] LinkupError),

    /// Missing or invalid credentials
    #[error("{0}")]
    Auth(String),

    /// Validation error
    #[error("{0}")]
    Validation(String),

    /// Bad request error
    #[error("{0}")]
    BadRequest(String),

    /// Not found error
    #[error("{0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Auth(_) => StatusCode::UNAUTHORIZED,
            ServerError::Validation(_) | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Linkup(err) => match err {
                LinkupError::NotFound(_) => StatusCode::NOT_FOUND,
                LinkupError::Forbidden(_) => StatusCode::FORBIDDEN,
                LinkupError::Conflict(_)
                | LinkupError::InvalidOperation(_)
                | LinkupError::Validation(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Auth(_) => "authentication_error",
            ServerError::Validation(_) => "validation_error",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::NotFound(_) => "not_found",
            ServerError::Internal(_) => "internal_error",
            ServerError::Linkup(err) => match err {
                LinkupError::NotFound(_) => "not_found",
                LinkupError::Forbidden(_) => "forbidden",
                LinkupError::Conflict(_) => "conflict",
                LinkupError::InvalidOperation(_) => "invalid_operation",
                LinkupError::Validation(_) => "validation_error",
                LinkupError::Storage(_) => "storage_error",
                _ => "internal_error",
            },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let error_response = ErrorResponse {
            success: false,
            message: self.to_string(),
            error: self.error_type().to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Helper function to create a bad request error
pub fn bad_request(message: &str) -> ServerError {
    ServerError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_errors_map_to_statuses() {
        let cases = [
            (LinkupError::NotFound("User not found".into()), StatusCode::NOT_FOUND),
            (LinkupError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (LinkupError::Conflict("Already connected".into()), StatusCode::BAD_REQUEST),
            (LinkupError::InvalidOperation("x".into()), StatusCode::BAD_REQUEST),
            (LinkupError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (LinkupError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ServerError::from(err).status_code(), status);
        }
    }

    #[test]
    fn message_is_passed_through() {
        let err = ServerError::from(LinkupError::Conflict("Already connected".into()));
        assert_eq!(err.to_string(), "Already connected");
        assert_eq!(ServerError::Auth("Not authorized".into()).status_code(), StatusCode::UNAUTHORIZED);
    }
}
