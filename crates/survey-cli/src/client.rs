//! Blocking HTTP client for the survey server.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use survey_core::{Budget, HeightStats, SurveyPlan, TreeRecord};

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: String,
}

/// HTTP client for the estate endpoints.
pub struct SurveyClient {
    client: Client,
    base_url: String,
}

impl SurveyClient {
    /// Create a new client for `base_url` (e.g. "http://localhost:3000").
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create an estate and return its id.
    pub fn create_estate(&self, width: u32, length: u32) -> Result<String> {
        let url = format!("{}/estate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "width": width, "length": length }))
            .send()
            .context("Failed to send estate request")?
            .error_for_status()
            .context("Server rejected estate")?;
        Ok(response.json::<CreatedResponse>()?.id)
    }

    /// Plant a tree and return its id.
    pub fn add_tree(&self, estate_id: &str, tree: &TreeRecord) -> Result<String> {
        let url = format!("{}/estate/{}/tree", self.base_url, estate_id);
        let response = self
            .client
            .post(&url)
            .json(tree)
            .send()
            .context("Failed to send tree request")?
            .error_for_status()
            .with_context(|| format!("Server rejected tree at ({}, {})", tree.x, tree.y))?;
        Ok(response.json::<CreatedResponse>()?.id)
    }

    pub fn stats(&self, estate_id: &str) -> Result<HeightStats> {
        let url = format!("{}/estate/{}/stats", self.base_url, estate_id);
        let response = self.client.get(&url).send()?.error_for_status()?;
        Ok(response.json()?)
    }

    pub fn drone_plan(&self, estate_id: &str, budget: Budget) -> Result<SurveyPlan> {
        let url = format!("{}/estate/{}/drone-plan", self.base_url, estate_id);
        let mut request = self.client.get(&url);
        if budget.limit().is_some() {
            request = request.query(&[("max-distance", budget.value())]);
        }
        let response = request.send()?.error_for_status()?;
        Ok(response.json()?)
    }
}
