use async_trait::async_trait;
use thiserror::Error;

use super::models::{Distribution, Zone};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// How a session applies its writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Every write is persisted as soon as it is issued.
    Direct,
    /// Writes become visible on `commit`; dropping the session discards them.
    Transaction,
}

#[async_trait]
pub trait ZoneStore: Send + Sync {
    async fn begin(&self, mode: SessionMode) -> StoreResult<Box<dyn ZoneSession>>;

    /// Cheap round-trip used by the health probe.
    async fn ping(&self) -> StoreResult<()>;
}

#[async_trait]
pub trait ZoneSession: Send {
    async fn find_zone(&mut self, id: i64) -> StoreResult<Option<Zone>>;

    async fn save_zone_name(&mut self, id: i64, name: &str) -> StoreResult<()>;

    async fn find_distribution(&mut self, id: i64) -> StoreResult<Option<Distribution>>;

    async fn list_distributions(&mut self, zone_id: i64) -> StoreResult<Vec<Distribution>>;

    async fn create_distribution(&mut self, zone_id: i64, percentage: f64) -> StoreResult<Distribution>;

    async fn update_distribution_percentage(&mut self, id: i64, percentage: f64) -> StoreResult<()>;

    async fn delete_distribution(&mut self, id: i64) -> StoreResult<()>;

    async fn commit(self: Box<Self>) -> StoreResult<()>;
}
