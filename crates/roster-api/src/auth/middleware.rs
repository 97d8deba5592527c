/// Access gate for protected routes
///
/// Extracts the bearer token from the Authorization header and validates it
/// before the protected handler runs. On success the recovered user id is
/// added to request extensions; on any failure the request is rejected with
/// one opaque 401 body, regardless of which check failed.
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

use super::jwt::{verify_access_token, Claims, JwtError};

/// Authenticated user information extracted from a session token
///
/// Added to request extensions by the gate; handlers extract it with
/// `Extension<AuthenticatedUser>`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User's unique identifier
    pub user_id: Uuid,
}

impl TryFrom<Claims> for AuthenticatedUser {
    type Error = AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AuthError::Token(JwtError::MalformedToken))?;
        Ok(Self { user_id })
    }
}

/// Access gate errors
///
/// Observably distinct internally; the response mapping collapses every
/// variant into the same unauthorized body.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingToken,

    #[error("Invalid Authorization header format")]
    InvalidHeader,

    #[error("Token rejected: {0}")]
    Token(#[from] JwtError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // One opaque response for every failure mode; which check failed
        // stays in the server log only
        tracing::debug!(reason = %self, "request rejected by access gate");
        (StatusCode::UNAUTHORIZED, Json(ApiError::unauthorized())).into_response()
    }
}

/// Authentication middleware that requires a valid session token
///
/// 1. Extracts the Authorization header
/// 2. Validates the Bearer token format
/// 3. Validates the token signature and expiration
/// 4. Adds `AuthenticatedUser` to request extensions
///
/// The signing configuration comes from application state built once at
/// startup. Apply with
/// `route_layer(middleware::from_fn_with_state(state, auth_middleware))`.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidHeader)?;

    let claims = verify_access_token(state.auth.jwt_config(), token)?;
    let user = AuthenticatedUser::try_from(claims)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
