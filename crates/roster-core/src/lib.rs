//! Roster Core - Domain models, configuration, and shared types
//!
//! This crate defines the core pieces shared across the roster service:
//! - Profile record model and PostgreSQL store
//! - Common error types
//! - Configuration management

pub mod config;
pub mod records;

pub use config::{AppConfig, AuthConfig, ConfigError, DatabaseConfig, LoggingConfig, ServerConfig};
pub use records::{ProfileRecord, ProfileRecordDraft, RecordRepository, RecordStore};

use thiserror::Error;

/// Core error types for roster operations
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RosterError>;

impl From<sqlx::Error> for RosterError {
    fn from(err: sqlx::Error) -> Self {
        RosterError::DatabaseError(err.to_string())
    }
}
