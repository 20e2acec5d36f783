use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use fut_api::app::{self, AppState, Storage};
use fut_api::config::{Config, StorageBackend};
use fut_api::middleware;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics()?;

    info!("Starting fut API v{}", env!("CARGO_PKG_VERSION"));

    let storage = match config.storage.backend {
        StorageBackend::Postgres => {
            let pool = persistence::db::create_pool(&(&config.database).into()).await?;

            info!("Running database migrations...");
            persistence::db::run_migrations(&pool).await?;
            info!("Migrations completed");

            Storage::Postgres(pool)
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on shutdown");
            Storage::Memory(Arc::new(persistence::InMemoryStore::new()))
        }
    };

    let addr = config.socket_addr()?;
    let app = app::create_app(AppState::new(config, storage));

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
