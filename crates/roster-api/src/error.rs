//! API error handling
//!
//! Internal failures carry a tagged variant per cause; the `IntoResponse`
//! boundary mapping intentionally discards detail before anything reaches
//! the client. Storage and hashing failures are logged server-side and
//! surfaced as a generic failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::password::PasswordError;
use crate::auth::repository::RepositoryError;

/// API error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Always false for errors
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new("Unauthorized")
    }

    pub fn server_error() -> Self {
        Self::new("Server error")
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed input fields, client-correctable
    Validation(String),
    /// Registration email collision
    DuplicateUser,
    /// Unknown email or wrong password; deliberately indistinguishable
    InvalidCredentials,
    /// Resource absent post-authentication
    NotFound(String),
    /// Hash-format or other failures not attributable to caller input
    Internal(String),
    /// Storage failure
    Database(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ApiError::new(msg)),
            AppError::DuplicateUser => (
                StatusCode::BAD_REQUEST,
                ApiError::new("User already exists!"),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("Invalid email or password"),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new(msg)),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, ApiError::server_error())
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, ApiError::server_error())
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateEmail => AppError::DuplicateUser,
            RepositoryError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        // A malformed stored hash is data corruption, never "wrong password"
        AppError::Internal(err.to_string())
    }
}

impl From<roster_core::RosterError> for AppError {
    fn from(err: roster_core::RosterError) -> Self {
        use roster_core::RosterError;

        match err {
            RosterError::NotFound(msg) => AppError::NotFound(msg),
            RosterError::ValidationError(msg) => AppError::Validation(msg),
            RosterError::DatabaseError(msg) => AppError::Database(msg),
            RosterError::ConfigError(msg) => AppError::Internal(format!("Configuration error: {msg}")),
            RosterError::Other(err) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
