//! Route definitions
//!
//! User routes are mounted under /api/users, health under /api/health.

use axum::{
    routing::{get, patch},
    Router,
};

use crate::handlers::{health, users};
use crate::state::AppState;

/// Create the API router (health routes are exported separately so they can
/// bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/users", user_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/detailed", get(health::detailed_health_check))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/:id/activate", patch(users::activate_user))
        .route("/:id/deactivate", patch(users::deactivate_user))
}
