//! In-memory estate store using DashMap.

use std::collections::HashMap;

use dashmap::DashMap;
use survey_core::{Plot, Position, TreeRecord};

use crate::persistence::{Estate, EstateStore, StoreError, SurveyInput};

struct EstateEntry {
    estate: Estate,
    /// Canopy height by position
    trees: HashMap<Position, u32>,
}

/// Thread-safe [`EstateStore`] kept in process memory.
///
/// Each estate and its trees live under one map entry, so every read sees a
/// consistent snapshot.
#[derive(Default)]
pub struct MemoryStore {
    estates: DashMap<String, EstateEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn estate_count(&self) -> usize {
        self.estates.len()
    }
}

impl EstateStore for MemoryStore {
    async fn create_estate(&self, plot: Plot) -> Result<Estate, StoreError> {
        let estate = Estate::new(plot);
        self.estates.insert(
            estate.id.clone(),
            EstateEntry {
                estate: estate.clone(),
                trees: HashMap::new(),
            },
        );
        Ok(estate)
    }

    async fn add_tree(&self, estate_id: &str, tree: TreeRecord) -> Result<String, StoreError> {
        let mut entry = self
            .estates
            .get_mut(estate_id)
            .ok_or_else(|| StoreError::EstateNotFound(estate_id.to_string()))?;

        let position = tree.position();
        if entry.trees.contains_key(&position) {
            return Err(StoreError::DuplicateTree {
                x: tree.x,
                y: tree.y,
            });
        }

        entry.trees.insert(position, tree.height);
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn plot_dimensions(&self, estate_id: &str) -> Result<Plot, StoreError> {
        self.estates
            .get(estate_id)
            .map(|entry| entry.estate.plot())
            .ok_or_else(|| StoreError::EstateNotFound(estate_id.to_string()))
    }

    async fn list_trees(&self, estate_id: &str) -> Result<Vec<TreeRecord>, StoreError> {
        self.estates
            .get(estate_id)
            .map(|entry| collect_trees(&entry))
            .ok_or_else(|| StoreError::EstateNotFound(estate_id.to_string()))
    }

    async fn load_survey_input(&self, estate_id: &str) -> Result<SurveyInput, StoreError> {
        let entry = self
            .estates
            .get(estate_id)
            .ok_or_else(|| StoreError::EstateNotFound(estate_id.to_string()))?;
        Ok(SurveyInput {
            plot: entry.estate.plot(),
            trees: collect_trees(&entry),
        })
    }
}

fn collect_trees(entry: &EstateEntry) -> Vec<TreeRecord> {
    entry
        .trees
        .iter()
        .map(|(position, &height)| TreeRecord::new(position.x, position.y, height))
        .collect()
}
