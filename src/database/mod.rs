pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{DatabaseBackend, DatabaseConfig};

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{SessionMode, StoreError, StoreResult, ZoneSession, ZoneStore};

pub async fn init_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Some(Duration::from_secs(config.idle_timeout)))
        .connect(&config.url)
        .await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await?;
    Ok(())
}

/// Opens the configured backend, running migrations first when asked to.
pub async fn open_store(config: &DatabaseConfig, migrate: bool) -> Result<Arc<dyn ZoneStore>> {
    match config.backend {
        DatabaseBackend::Postgres => {
            let pool = init_pool(config).await?;
            info!("Connected to PostgreSQL ({} max connections)", config.max_connections);

            if migrate {
                info!("Running database migrations...");
                run_migrations(&pool).await?;
                info!("Migrations completed successfully");
            }

            Ok(Arc::new(PgStore::new(pool)))
        }
        DatabaseBackend::Memory => {
            if migrate {
                warn!("Memory backend has no schema; --migrate ignored");
            }
            warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
