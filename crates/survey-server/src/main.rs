//! Survey Server - estate records and drone survey planning

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use survey_server::config::Config;
use survey_server::persistence::{self, EstateStore, SqliteStore};
use survey_server::state::{AppState, MemoryStore};
use survey_server::api;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("survey_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting Survey Server...");

    let config = Config::from_env();

    if config.uses_memory_store() {
        tracing::warn!("SURVEY_DATABASE_PATH is empty; estates are kept in memory only");
        serve(&config, MemoryStore::new()).await
    } else {
        let db = persistence::init_database(
            &config.database_path,
            config.database_max_connections,
        )
        .await?;
        serve(&config, SqliteStore::new(db)).await
    }
}

async fn serve<S: EstateStore>(config: &Config, store: S) -> Result<()> {
    let state = Arc::new(AppState::new(store));

    let mut app = api::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http());
    if config.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
