//! Route definitions.

use axum::{routing::get, Router};

use super::handlers::{self, AppState};

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/rss", get(handlers::rss))
        .route("/health", get(handlers::health))
        .route("/", get(handlers::docs))
        .with_state(state)
}
