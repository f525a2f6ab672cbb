//! Translation of domain and storage errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use survey_core::CoreError;
use thiserror::Error;

use crate::persistence::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Invalid(#[from] CoreError),

    #[error("invalid input: {0}")]
    BadRequest(String),

    #[error("estate not found")]
    EstateNotFound,

    #[error("no trees found")]
    NoTrees,

    #[error("a tree is already planted at ({x}, {y})")]
    DuplicateTree { x: u32, y: u32 },

    #[error("storage failure")]
    Storage(#[source] StoreError),

    #[error("plan computation failed")]
    Computation(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Invalid(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::EstateNotFound | ApiError::NoTrees => StatusCode::NOT_FOUND,
            ApiError::DuplicateTree { .. } => StatusCode::CONFLICT,
            ApiError::Storage(_) | ApiError::Computation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EstateNotFound(_) => ApiError::EstateNotFound,
            StoreError::DuplicateTree { x, y } => ApiError::DuplicateTree { x, y },
            other => ApiError::Storage(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match &self {
                ApiError::Storage(source) => tracing::error!("{}: {}", self, source),
                _ => tracing::error!("{:?}", self),
            }
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
