//! Route definitions for the web server.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use super::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Product API
        .route("/api/products", get(handlers::list_products))
        .route(
            "/api/products/search-suggestions",
            get(handlers::search_suggestions),
        )
        .route("/api/products/suggestions", get(handlers::search_suggestions))
        .route("/api/products/filters", get(handlers::filter_options))
        .route("/api/products/{id}", get(handlers::get_product))
        .route("/api/products/{id}/view", post(handlers::record_view))
        // Health and metrics
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}
