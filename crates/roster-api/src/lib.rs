//! Roster API - REST server
//!
//! HTTP surface for the roster record-keeping service: registration, login,
//! stateless bearer sessions, and token-gated profile record CRUD.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::auth::register_handler,
        handlers::auth::login_handler,
        handlers::auth::me_handler,
        handlers::records::create_record,
        handlers::records::list_records,
        handlers::records::update_record,
        handlers::records::delete_record,
    ),
    components(schemas(
        auth::models::RegisterRequest,
        auth::models::LoginRequest,
        auth::models::UserPublic,
        handlers::auth::RegisterResponse,
        handlers::auth::LoginResponse,
        handlers::auth::MeResponse,
        handlers::records::RecordPayload,
        handlers::records::RecordResponse,
        handlers::records::RecordListResponse,
        handlers::records::DeleteResponse,
        roster_core::ProfileRecord,
        error::ApiError,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login, and sessions"),
        (name = "records", description = "Profile record management"),
        (name = "health", description = "Service health probes"),
    )
)]
pub struct ApiDoc;

/// Registers the bearer token security scheme
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .nest("/api/v1", routes::api_routes(state.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build a router over a lazily connected pool for integration tests
///
/// Routes that never touch the database (health, gate rejections) work
/// without a running PostgreSQL; the rest need `DATABASE_URL` to point at a
/// live instance.
#[cfg(feature = "test-utils")]
pub fn create_router_for_testing() -> Router {
    use roster_core::AppConfig;
    use sqlx::postgres::PgPoolOptions;

    let config = AppConfig::from_env().unwrap_or_default();
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect_lazy(&config.database.postgres_url)
        .expect("valid database URL");

    create_router(Arc::new(AppState::new(config, pool)))
}
