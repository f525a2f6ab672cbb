//! JSON estate description shared by the CLI tools.
//!
//! ```json
//! { "width": 2, "length": 2, "trees": [{ "x": 2, "y": 1, "height": 5 }] }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use survey_core::{plan_survey, Budget, HeightStats, Plot, SurveyPlan, TreeRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstateFile {
    pub width: u32,
    pub length: u32,
    #[serde(default)]
    pub trees: Vec<TreeRecord>,
}

impl EstateFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid estate file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn plot(&self) -> Plot {
        Plot {
            width: self.width,
            length: self.length,
        }
    }

    pub fn plan(&self, budget: Budget) -> Result<SurveyPlan> {
        Ok(plan_survey(self.plot(), &self.trees, budget)?)
    }

    pub fn stats(&self) -> Option<HeightStats> {
        HeightStats::from_heights(self.trees.iter().map(|tree| tree.height))
    }
}
