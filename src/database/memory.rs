use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};
use tracing::debug;

use super::models::{Distribution, Zone};
use super::store::{SessionMode, StoreError, StoreResult, ZoneSession, ZoneStore};

#[derive(Debug, Clone, Default)]
struct Tables {
    zones: HashMap<i64, Zone>,
    distributions: BTreeMap<i64, Distribution>,
    last_distribution_id: i64,
}

impl Tables {
    fn find_zone(&self, id: i64) -> Option<Zone> {
        self.zones.get(&id).cloned()
    }

    fn save_zone_name(&mut self, id: i64, name: &str) -> StoreResult<()> {
        let zone = self
            .zones
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("Zone {id}")))?;
        zone.name = name.to_string();
        zone.updated_at = Utc::now();
        Ok(())
    }

    fn find_distribution(&self, id: i64) -> Option<Distribution> {
        self.distributions.get(&id).cloned()
    }

    fn list_distributions(&self, zone_id: i64) -> Vec<Distribution> {
        self.distributions
            .values()
            .filter(|d| d.zone_id == zone_id)
            .cloned()
            .collect()
    }

    fn create_distribution(&mut self, zone_id: i64, percentage: f64) -> StoreResult<Distribution> {
        if !self.zones.contains_key(&zone_id) {
            return Err(StoreError::Database(format!(
                "distributions.zone_id references missing zone {zone_id}"
            )));
        }

        self.last_distribution_id += 1;
        let now = Utc::now();
        let distribution = Distribution {
            id: self.last_distribution_id,
            zone_id,
            percentage,
            created_at: now,
            updated_at: now,
        };
        self.distributions.insert(distribution.id, distribution.clone());
        Ok(distribution)
    }

    fn update_distribution_percentage(&mut self, id: i64, percentage: f64) -> StoreResult<()> {
        let distribution = self
            .distributions
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("Distribution {id}")))?;
        distribution.percentage = percentage;
        distribution.updated_at = Utc::now();
        Ok(())
    }

    fn delete_distribution(&mut self, id: i64) -> StoreResult<()> {
        self.distributions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("Distribution {id}")))
    }
}

/// In-process store for development and tests. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zones are never created through the API, so they have to be seeded.
    pub async fn insert_zone(&self, id: i64, name: &str) -> Zone {
        let zone = Zone::new(id, name);
        self.tables.write().await.zones.insert(id, zone.clone());
        zone
    }

    pub async fn insert_distribution(&self, zone_id: i64, percentage: f64) -> StoreResult<Distribution> {
        self.tables.write().await.create_distribution(zone_id, percentage)
    }

    pub async fn zone(&self, id: i64) -> Option<Zone> {
        self.tables.read().await.find_zone(id)
    }

    pub async fn distribution(&self, id: i64) -> Option<Distribution> {
        self.tables.read().await.find_distribution(id)
    }

    pub async fn distributions(&self, zone_id: i64) -> Vec<Distribution> {
        self.tables.read().await.list_distributions(zone_id)
    }
}

#[async_trait]
impl ZoneStore for MemoryStore {
    async fn begin(&self, mode: SessionMode) -> StoreResult<Box<dyn ZoneSession>> {
        let session = match mode {
            SessionMode::Direct => MemorySession::Direct(Arc::clone(&self.tables)),
            SessionMode::Transaction => {
                let guard = Arc::clone(&self.tables).write_owned().await;
                let pending = (*guard).clone();
                MemorySession::Tx { guard, pending }
            }
        };
        Ok(Box::new(session))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

enum MemorySession {
    Direct(Arc<RwLock<Tables>>),
    // Holds the write lock until commit or drop, so other sessions wait
    // instead of interleaving with the pending copy.
    Tx {
        guard: OwnedRwLockWriteGuard<Tables>,
        pending: Tables,
    },
}

#[async_trait]
impl ZoneSession for MemorySession {
    async fn find_zone(&mut self, id: i64) -> StoreResult<Option<Zone>> {
        Ok(match self {
            MemorySession::Direct(tables) => tables.read().await.find_zone(id),
            MemorySession::Tx { pending, .. } => pending.find_zone(id),
        })
    }

    async fn save_zone_name(&mut self, id: i64, name: &str) -> StoreResult<()> {
        match self {
            MemorySession::Direct(tables) => tables.write().await.save_zone_name(id, name),
            MemorySession::Tx { pending, .. } => pending.save_zone_name(id, name),
        }
    }

    async fn find_distribution(&mut self, id: i64) -> StoreResult<Option<Distribution>> {
        Ok(match self {
            MemorySession::Direct(tables) => tables.read().await.find_distribution(id),
            MemorySession::Tx { pending, .. } => pending.find_distribution(id),
        })
    }

    async fn list_distributions(&mut self, zone_id: i64) -> StoreResult<Vec<Distribution>> {
        Ok(match self {
            MemorySession::Direct(tables) => tables.read().await.list_distributions(zone_id),
            MemorySession::Tx { pending, .. } => pending.list_distributions(zone_id),
        })
    }

    async fn create_distribution(&mut self, zone_id: i64, percentage: f64) -> StoreResult<Distribution> {
        let distribution = match self {
            MemorySession::Direct(tables) => tables.write().await.create_distribution(zone_id, percentage)?,
            MemorySession::Tx { pending, .. } => pending.create_distribution(zone_id, percentage)?,
        };
        debug!("Inserted distribution {} for zone {}", distribution.id, zone_id);
        Ok(distribution)
    }

    async fn update_distribution_percentage(&mut self, id: i64, percentage: f64) -> StoreResult<()> {
        match self {
            MemorySession::Direct(tables) => tables.write().await.update_distribution_percentage(id, percentage),
            MemorySession::Tx { pending, .. } => pending.update_distribution_percentage(id, percentage),
        }
    }

    async fn delete_distribution(&mut self, id: i64) -> StoreResult<()> {
        match self {
            MemorySession::Direct(tables) => tables.write().await.delete_distribution(id),
            MemorySession::Tx { pending, .. } => pending.delete_distribution(id),
        }
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        if let MemorySession::Tx { mut guard, pending } = *self {
            *guard = pending;
        }
        Ok(())
    }
}
