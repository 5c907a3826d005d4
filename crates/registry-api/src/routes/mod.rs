//! Route definitions
//!
//! All routes are mounted at the root.

use axum::{routing::get, Router};

use crate::handlers::{health, users};
use crate::state::AppState;

/// Create the user router (health is exported separately to bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    user_routes()
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/address-a", get(users::list_address_a))
        .route("/users/address-b", get(users::list_address_b))
        .route("/users/latest", get(users::latest_users))
        .route("/users/search/phone", get(users::search_by_phone))
        .route("/users/stats/summary", get(users::user_stats))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}
