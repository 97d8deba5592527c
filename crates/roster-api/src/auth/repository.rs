//! Credential store for PostgreSQL
//!
//! Database access layer for user identity records. The email UNIQUE
//! constraint at the storage layer is the authoritative duplicate guard;
//! callers treat the unique-violation error as the final arbiter of the
//! registration race.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use super::models::{User, UserPublic};

/// PostgreSQL SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Credential store errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Email already exists")]
    DuplicateEmail,
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return RepositoryError::DuplicateEmail;
            }
        }
        RepositoryError::DatabaseError(err.to_string())
    }
}

/// User repository over a shared connection pool
///
/// Constructed once at startup with an injected pool; no ambient globals.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by email, exactly as stored
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a new user
    ///
    /// Returns `DuplicateEmail` when the email UNIQUE constraint rejects the
    /// insert, which covers the window between a caller's pre-check and this
    /// statement.
    pub async fn insert_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by id, projected without the password hash column
    pub async fn find_public_by_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserPublic>, RepositoryError> {
        let user = sqlx::query_as::<_, UserPublic>(
            "SELECT id, username, email, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
