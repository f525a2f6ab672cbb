//! Server configuration from environment.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// SQLite file path. Empty selects the in-memory store.
    pub database_path: String,
    pub database_max_connections: u32,
    pub cors_permissive: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SURVEY_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            database_path: env::var("SURVEY_DATABASE_PATH")
                .unwrap_or_else(|_| "data/survey.db".to_string()),
            database_max_connections: env::var("SURVEY_DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(5),
            cors_permissive: env::var("SURVEY_CORS_PERMISSIVE")
                .map(|s| parse_bool(&s))
                .unwrap_or(true),
        }
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_path.trim().is_empty()
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
