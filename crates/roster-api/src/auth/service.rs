//! Authentication service layer
//!
//! Business logic for user registration, login, and the "who am I" lookup.
//! The service receives its credential store and signing configuration at
//! construction; nothing here reads ambient process state.

use tokio::task;
use uuid::Uuid;

use crate::error::AppError;

use super::jwt::{issue_access_token, JwtConfig};
use super::models::{LoginRequest, RegisterRequest, UserPublic};
use super::password::{hash_password_with_config, verify_password, PasswordConfig};
use super::repository::{RepositoryError, UserRepository};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    jwt_config: JwtConfig,
    password_config: PasswordConfig,
}

impl AuthService {
    /// Create a new authentication service with an injected credential store
    pub fn new(users: UserRepository, jwt_config: JwtConfig) -> Self {
        Self {
            users,
            jwt_config,
            password_config: PasswordConfig::default(),
        }
    }

    /// Override the password hashing cost parameters
    pub fn with_password_config(mut self, config: PasswordConfig) -> Self {
        self.password_config = config;
        self
    }

    /// Register a new user
    ///
    /// The email pre-check only fails fast; a concurrent registration that
    /// wins the race surfaces as the store's unique violation and maps to
    /// the same duplicate-user error.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserPublic, AppError> {
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::DuplicateUser);
        }

        // Argon2 is CPU-bound; keep it off the async runtime
        let password = request.password;
        let config = self.password_config.clone();
        let password_hash = task::spawn_blocking(move || hash_password_with_config(&password, &config))
            .await
            .map_err(|e| AppError::Internal(format!("hash task failed: {e}")))??;

        let user = match self
            .users
            .insert_user(&request.username, &request.email, &password_hash)
            .await
        {
            Ok(user) => user,
            // Lost the race to a concurrent registration with the same email
            Err(RepositoryError::DuplicateEmail) => return Err(AppError::DuplicateUser),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(user_id = %user.id, "user registered");

        Ok(user.to_public())
    }

    /// Login with email and password, returning a session token
    ///
    /// An unknown email and a wrong password produce the same error so the
    /// response cannot be used to enumerate accounts.
    pub async fn login(&self, request: LoginRequest) -> Result<String, AppError> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password = request.password;
        let stored_hash = user.password_hash.clone();
        let password_valid = task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AppError::Internal(format!("verify task failed: {e}")))??;

        if !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = issue_access_token(&self.jwt_config, user.id)
            .map_err(|e| AppError::Internal(format!("Failed to issue token: {e}")))?;

        tracing::info!(user_id = %user.id, "user logged in");

        Ok(token)
    }

    /// Get the public record for an authenticated user
    pub async fn current_user(&self, user_id: Uuid) -> Result<UserPublic, AppError> {
        self.users
            .find_public_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Token signing configuration in use
    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }
}
