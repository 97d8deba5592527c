//! Session token generation and validation
//!
//! Implements stateless bearer sessions with HMAC-SHA256 signed JWTs.
//! Tokens carry the user id and a bounded validity window; the server keeps
//! no record of issued tokens, so rotating the secret invalidates all of
//! them at once.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use roster_core::AuthConfig;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

/// JWT claims embedded in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Token issuer (always "roster-api")
    pub iss: String,
    /// Subject - user ID
    pub sub: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
    /// Expiration timestamp (Unix epoch)
    pub exp: u64,
}

/// Token generation and validation errors
///
/// The variants are distinct so the server can log what actually failed;
/// the HTTP boundary collapses all of them into one opaque 401.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("System time error: {0}")]
    SystemTimeError(#[from] std::time::SystemTimeError),
}

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for HMAC signing (must be at least 256 bits)
    pub secret: String,
    /// Token lifetime in seconds
    pub expiry_secs: u64,
    /// Token issuer identifier
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-key-change-in-production".to_string(),
            expiry_secs: 3600, // 1 hour
            issuer: "roster-api".to_string(),
        }
    }
}

impl From<&AuthConfig> for JwtConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiry_secs: config.token_expiry_secs,
            issuer: "roster-api".to_string(),
        }
    }
}

/// Issue a signed session token for an authenticated user
pub fn issue_access_token(config: &JwtConfig, user_id: Uuid) -> Result<String, JwtError> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

    let claims = Claims {
        iss: config.issuer.clone(),
        sub: user_id.to_string(),
        iat: now,
        exp: now + config.expiry_secs,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| JwtError::EncodingError(e.to_string()))
}

/// Validate a session token and extract its claims
///
/// Checks the HMAC signature and the expiry window against the current
/// time. Purely functional over (token, secret, now).
pub fn verify_access_token(config: &JwtConfig, token: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        _ => JwtError::MalformedToken,
    })?;

    Ok(token_data.claims)
}
