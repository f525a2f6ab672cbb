//! API routes for the survey server.

pub mod error;
pub mod estates;
mod routes;

use crate::persistence::EstateStore;
use crate::state::AppState;
use axum::Router;

pub use error::ApiError;

pub fn routes<S: EstateStore>() -> Router<std::sync::Arc<AppState<S>>> {
    routes::create_router()
}

#[cfg(test)]
mod tests;
