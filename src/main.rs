//! Catalog Server - local library catalog
//!
//! Serves the catalog pages and form endpoints over HTTP.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_server::{
    api,
    config::{AppConfig, LogFormat, StorageBackend},
    repository::{postgres, Repository},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("catalog_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting Catalog Server v{}", env!("CARGO_PKG_VERSION"));

    let repository = match config.database.backend {
        StorageBackend::Postgres => {
            let pool = postgres::connect(&config.database)
                .await
                .context("Failed to prepare database")?;
            Repository::new(pool)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store; nothing will be persisted");
            Repository::in_memory()
        }
    };

    let state = AppState::new(config, repository);
    let addr = state
        .config
        .server
        .socket_addr()
        .context("Invalid host address")?;

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
