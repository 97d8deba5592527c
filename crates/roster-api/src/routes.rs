//! API route definitions

use crate::auth::middleware::auth_middleware;
use crate::handlers::{auth, records};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

/// Create API v1 routes
///
/// The access gate is applied with `route_layer`, so it runs for every
/// protected route and nothing else; unauthenticated calls are rejected
/// before any handler body executes.
pub fn api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/register", post(auth::register_handler))
        .route("/login", post(auth::login_handler));

    // Protected routes (authentication required)
    let protected_routes = Router::new()
        .route("/me", get(auth::me_handler))
        // Profile record endpoints
        .route("/records", post(records::create_record))
        .route("/records", get(records::list_records))
        .route("/records/:id", put(records::update_record))
        .route("/records/:id", delete(records::delete_record))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    // Combine routes
    Router::new().merge(public_routes).merge(protected_routes)
}
