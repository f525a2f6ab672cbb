//! Persistence layer for the survey server.
//!
//! Handlers only see the [`EstateStore`] trait. Two implementations exist:
//! SQLite-backed [`SqliteStore`] and the DashMap-backed
//! [`MemoryStore`](crate::state::store::MemoryStore).

pub mod db;
pub mod estates;

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Serialize;
use survey_core::{CoreError, Plot, TreeRecord};
use thiserror::Error;

pub use db::{init_database, Database};
pub use estates::SqliteStore;

/// A stored estate.
#[derive(Debug, Clone, Serialize)]
pub struct Estate {
    pub id: String,
    pub width: u32,
    pub length: u32,
    pub created_at: DateTime<Utc>,
}

impl Estate {
    pub fn new(plot: Plot) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            width: plot.width,
            length: plot.length,
            created_at: Utc::now(),
        }
    }

    pub fn plot(&self) -> Plot {
        Plot {
            width: self.width,
            length: self.length,
        }
    }
}

/// Plot and trees read together, so a plan never mixes two estate versions.
#[derive(Debug, Clone)]
pub struct SurveyInput {
    pub plot: Plot,
    pub trees: Vec<TreeRecord>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("estate {0} not found")]
    EstateNotFound(String),

    #[error("a tree is already planted at ({x}, {y})")]
    DuplicateTree { x: u32, y: u32 },

    #[error("stored record is invalid: {0}")]
    InvalidRecord(#[from] CoreError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage collaborator for estates and trees.
pub trait EstateStore: Send + Sync + 'static {
    fn create_estate(&self, plot: Plot) -> impl Future<Output = Result<Estate, StoreError>> + Send;

    /// Plant a tree and return its id. Position checks against the plot are
    /// the caller's job; uniqueness is enforced here.
    fn add_tree(
        &self,
        estate_id: &str,
        tree: TreeRecord,
    ) -> impl Future<Output = Result<String, StoreError>> + Send;

    fn plot_dimensions(
        &self,
        estate_id: &str,
    ) -> impl Future<Output = Result<Plot, StoreError>> + Send;

    /// Trees of an estate in no particular order. Fails with
    /// [`StoreError::EstateNotFound`] for an unknown estate.
    fn list_trees(
        &self,
        estate_id: &str,
    ) -> impl Future<Output = Result<Vec<TreeRecord>, StoreError>> + Send;

    /// Consistent snapshot of plot and trees for one plan computation.
    fn load_survey_input(
        &self,
        estate_id: &str,
    ) -> impl Future<Output = Result<SurveyInput, StoreError>> + Send;
}
