use axum::Router;
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use database::postgres::DatabaseConnection;
use domain_items::{ApiDoc, InMemoryItemRepository, ItemRepository, ItemService, PgItemRepository, handlers};
use std::time::Duration;
use tracing::info;

mod config;
mod ready;

use config::{Config, StorageBackend};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);
const DB_CONNECT_RETRIES: u32 = 5;

/// Item routes under `/items` plus docs, probes and the 404 fallback.
fn build_app<R: ItemRepository + 'static>(
    service: ItemService<R>,
    config: &Config,
    db: Option<DatabaseConnection>,
) -> Router {
    let routes = Router::new()
        .nest("/items", handlers::router(service))
        .merge(health_router(config.app))
        .merge(ready::ready_router(db));

    create_router::<ApiDoc>(routes)
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    match config.storage.clone() {
        StorageBackend::Memory => {
            info!("Using in-memory item storage");
            let service = ItemService::new(InMemoryItemRepository::new());
            let app = build_app(service, &config, None);

            create_production_app(app, &config.server, SHUTDOWN_TIMEOUT, async {})
                .await
                .map_err(|e| eyre::eyre!("Server error: {}", e))?;
        }
        StorageBackend::Postgres(pg) => {
            info!("Using PostgreSQL item storage");
            let db = database::postgres::connect_from_config_with_retry(
                pg,
                Some(RetryConfig::new().with_max_retries(DB_CONNECT_RETRIES)),
            )
            .await
            .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

            let service = ItemService::new(PgItemRepository::new(db.clone()));
            let app = build_app(service, &config, Some(db.clone()));

            create_production_app(app, &config.server, SHUTDOWN_TIMEOUT, async move {
                info!("Shutting down: closing database connections");
                if let Err(e) = database::postgres::close(db).await {
                    tracing::error!("Error closing PostgreSQL: {}", e);
                }
            })
            .await
            .map_err(|e| eyre::eyre!("Server error: {}", e))?;
        }
    }

    info!("Items API shutdown complete");
    Ok(())
}
