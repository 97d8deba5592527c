//! Authentication API handlers
//!
//! HTTP endpoints for registration, login, and the current-user lookup.

use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::models::{LoginRequest, RegisterRequest, UserPublic};
use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::state::AppState;

/// Registration response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

/// Login response with the session token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub access_token: String,
}

/// Current-user response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub success: bool,
    pub user: UserPublic,
}

/// Register a new user account
///
/// # Responses
///
/// * `201 Created` - User successfully registered
/// * `400 Bad Request` - Missing/invalid fields or email already registered
/// * `500 Internal Server Error` - Server error
#[utoipa::path(
    post,
    path = "/api/v1/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Invalid input or duplicate email", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError),
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    state.auth.register(request).await?;

    let response = RegisterResponse {
        success: true,
        message: "User registered successfully!".to_string(),
    };

    Ok((axum::http::StatusCode::CREATED, Json(response)))
}

/// Login with email and password
///
/// An unknown email and a wrong password produce the same response.
///
/// # Responses
///
/// * `200 OK` - Login successful, returns the session token
/// * `401 Unauthorized` - Invalid credentials
/// * `500 Internal Server Error` - Server error
#[utoipa::path(
    post,
    path = "/api/v1/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ApiError),
        (status = 500, description = "Internal server error", body = crate::error::ApiError),
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let access_token = state.auth.login(request).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "User successfully logged in!".to_string(),
        access_token,
    }))
}

/// Get the current user's record
///
/// Returns the record for the authenticated user, without the password
/// hash field.
///
/// # Responses
///
/// * `200 OK` - Current user record
/// * `401 Unauthorized` - Invalid or missing authentication
/// * `404 Not Found` - User record no longer exists
#[utoipa::path(
    get,
    path = "/api/v1/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user record", body = MeResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ApiError),
        (status = 404, description = "User not found", body = crate::error::ApiError),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn me_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.auth.current_user(user.user_id).await?;

    Ok(Json(MeResponse {
        success: true,
        user,
    }))
}
