//! Route definitions.

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `state` - Shared session, yield source and configuration
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health))
        .route("/api/v1/health", get(handlers::health))
        // Pricing
        .route("/api/v1/price", post(handlers::price_bond))
        .route("/api/v1/ytm", post(handlers::estimate_yield))
        .route("/api/v1/curve", post(handlers::price_curve))
        // Market data
        .route("/api/v1/live-yield", get(handlers::live_yield))
        // Portfolio
        .route(
            "/api/v1/portfolio",
            get(handlers::list_portfolio)
                .post(handlers::add_to_portfolio)
                .delete(handlers::clear_portfolio),
        )
        .route("/api/v1/portfolio/metrics", get(handlers::portfolio_metrics))
        .route("/api/v1/portfolio/:id", delete(handlers::remove_from_portfolio))
        // State
        .with_state(state)
}
