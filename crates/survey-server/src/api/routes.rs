//! REST API routes.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::estates;
use crate::persistence::EstateStore;
use crate::state::AppState;

/// Create the API router.
pub fn create_router<S: EstateStore>() -> Router<Arc<AppState<S>>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/estate", post(estates::create_estate::<S>))
        .route("/estate/:id/tree", post(estates::add_tree::<S>))
        .route("/estate/:id/stats", get(estates::get_estate_stats::<S>))
        .route("/estate/:id/drone-plan", get(estates::get_drone_plan::<S>))
}
