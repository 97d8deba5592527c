//! Application state management

use roster_core::{AppConfig, RecordRepository, RecordStore};
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::jwt::JwtConfig;
use crate::auth::repository::UserRepository;
use crate::auth::service::AuthService;

/// Application state shared across handlers
///
/// Built once at startup with an injected connection pool; services hold
/// their store handles explicitly instead of reaching for process globals.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Database connection pool
    pub db_pool: PgPool,
    /// Authentication service
    pub auth: AuthService,
    /// Profile record store
    pub records: Arc<dyn RecordRepository>,
}

impl AppState {
    /// Create new application state with config and database pool
    pub fn new(config: AppConfig, db_pool: PgPool) -> Self {
        let jwt_config = JwtConfig::from(&config.auth);
        let users = UserRepository::new(db_pool.clone());
        let auth = AuthService::new(users, jwt_config);
        let records = Arc::new(RecordStore::from_pool(db_pool.clone()));

        Self {
            config,
            db_pool,
            auth,
            records,
        }
    }
}
