//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Epochs
        .route("/epochs", get(handlers::list_epochs))
        .route("/epochs/:epoch", get(handlers::get_epoch))
        .route("/epochs/:epoch/location", get(handlers::get_location))
        .route("/epochs/:epoch/speed", get(handlers::get_speed))

        // Current position
        .route("/now", get(handlers::get_now))

        // Feed
        .route("/refresh", post(handlers::refresh))

        .with_state(state)
}
