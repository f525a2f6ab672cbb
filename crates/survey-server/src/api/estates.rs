//! Estate API endpoints.
//!
//! Estates and trees are plain records; the interesting part is the drone
//! plan, which hands a storage snapshot to the survey core.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use survey_core::{plan_survey, Budget, HeightStats, Plot, SurveyPlan, TreeRecord};

use super::error::ApiError;
use crate::persistence::EstateStore;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateEstateRequest {
    pub width: i64,
    pub length: i64,
}

#[derive(Debug, Deserialize)]
pub struct AddTreeRequest {
    pub x: i64,
    pub y: i64,
    pub height: i64,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct DronePlanQuery {
    #[serde(rename = "max-distance")]
    pub max_distance: Option<String>,
}

impl DronePlanQuery {
    /// Missing or blank values mean no budget.
    fn budget(&self) -> Result<Budget, ApiError> {
        match self.max_distance.as_deref().map(str::trim) {
            None | Some("") => Ok(Budget::UNLIMITED),
            Some(raw) => Ok(Budget::parse(raw)?),
        }
    }
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Create a new estate.
pub async fn create_estate<S: EstateStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateEstateRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let req = body(payload)?;
    let plot = Plot::new(req.width, req.length)?;

    let estate = state.store().create_estate(plot).await?;
    tracing::info!(
        "Created estate {} ({}x{})",
        estate.id,
        estate.width,
        estate.length
    );

    Ok(Json(CreatedResponse { id: estate.id }))
}

/// Plant a tree on an estate.
pub async fn add_tree<S: EstateStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(estate_id): Path<String>,
    payload: Result<Json<AddTreeRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let req = body(payload)?;
    let plot = state.store().plot_dimensions(&estate_id).await?;
    let tree = TreeRecord::placed_in(&plot, req.x, req.y, req.height)?;

    let id = state.store().add_tree(&estate_id, tree).await?;
    tracing::debug!(
        "Planted tree {} at ({}, {}) height {} on estate {}",
        id,
        tree.x,
        tree.y,
        tree.height,
        estate_id
    );

    Ok(Json(CreatedResponse { id }))
}

/// Tree height statistics for an estate.
pub async fn get_estate_stats<S: EstateStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(estate_id): Path<String>,
) -> Result<Json<HeightStats>, ApiError> {
    let trees = state.store().list_trees(&estate_id).await?;
    HeightStats::from_heights(trees.iter().map(|tree| tree.height))
        .map(Json)
        .ok_or(ApiError::NoTrees)
}

/// Flight distance of the serpentine survey, optionally capped by `max-distance`.
pub async fn get_drone_plan<S: EstateStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(estate_id): Path<String>,
    Query(query): Query<DronePlanQuery>,
) -> Result<Json<SurveyPlan>, ApiError> {
    let budget = query.budget()?;
    let input = state.store().load_survey_input(&estate_id).await?;
    let tree_count = input.trees.len();

    // Large plots take a while; keep the sweep off the async workers
    let plan =
        tokio::task::spawn_blocking(move || plan_survey(input.plot, &input.trees, budget)).await??;

    match plan {
        SurveyPlan::Full { total_distance } => tracing::info!(
            "Drone plan for estate {}: {} trees, distance {}",
            estate_id,
            tree_count,
            total_distance
        ),
        SurveyPlan::Truncated { budget, stopped_at } => tracing::info!(
            "Drone plan for estate {} stopped at ({}, {}) with budget {}",
            estate_id,
            stopped_at.x,
            stopped_at.y,
            budget
        ),
    }

    Ok(Json(plan))
}
