// Runtime SQL queries backing the zone store
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use super::models::{Distribution, Zone};
use super::store::{SessionMode, StoreError, StoreResult, ZoneSession, ZoneStore};

const ZONE_COLUMNS: &str = "id, name, created_at, updated_at";
const DISTRIBUTION_COLUMNS: &str = "id, zone_id, percentage, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ZoneStore for PgStore {
    async fn begin(&self, mode: SessionMode) -> StoreResult<Box<dyn ZoneSession>> {
        let session = match mode {
            SessionMode::Direct => PgSession::Pool(self.pool.clone()),
            SessionMode::Transaction => PgSession::Tx(self.pool.begin().await?),
        };
        Ok(Box::new(session))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

enum PgSession {
    Pool(PgPool),
    Tx(Transaction<'static, Postgres>),
}

// Runs a query against whichever executor the session holds.
macro_rules! run {
    ($session:expr, $query:expr, $method:ident) => {
        match $session {
            PgSession::Pool(pool) => $query.$method(&*pool).await,
            PgSession::Tx(tx) => $query.$method(&mut **tx).await,
        }
    };
}

#[async_trait]
impl ZoneSession for PgSession {
    async fn find_zone(&mut self, id: i64) -> StoreResult<Option<Zone>> {
        let sql = format!("SELECT {ZONE_COLUMNS} FROM zones WHERE id = $1");
        let zone = run!(
            self,
            sqlx::query_as::<_, Zone>(&sql).bind(id),
            fetch_optional
        )?;
        Ok(zone)
    }

    async fn save_zone_name(&mut self, id: i64, name: &str) -> StoreResult<()> {
        let result = run!(
            self,
            sqlx::query("UPDATE zones SET name = $1, updated_at = NOW() WHERE id = $2")
                .bind(name)
                .bind(id),
            execute
        )?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Zone {id}")));
        }
        Ok(())
    }

    async fn find_distribution(&mut self, id: i64) -> StoreResult<Option<Distribution>> {
        let sql = format!("SELECT {DISTRIBUTION_COLUMNS} FROM distributions WHERE id = $1");
        let distribution = run!(
            self,
            sqlx::query_as::<_, Distribution>(&sql).bind(id),
            fetch_optional
        )?;
        Ok(distribution)
    }

    async fn list_distributions(&mut self, zone_id: i64) -> StoreResult<Vec<Distribution>> {
        let sql = format!(
            "SELECT {DISTRIBUTION_COLUMNS} FROM distributions WHERE zone_id = $1 ORDER BY id"
        );
        let distributions = run!(
            self,
            sqlx::query_as::<_, Distribution>(&sql).bind(zone_id),
            fetch_all
        )?;
        Ok(distributions)
    }

    async fn create_distribution(&mut self, zone_id: i64, percentage: f64) -> StoreResult<Distribution> {
        let sql = format!(
            "INSERT INTO distributions (zone_id, percentage) VALUES ($1, $2) RETURNING {DISTRIBUTION_COLUMNS}"
        );
        let distribution = run!(
            self,
            sqlx::query_as::<_, Distribution>(&sql)
                .bind(zone_id)
                .bind(percentage),
            fetch_one
        )?;

        debug!("Inserted distribution {} for zone {}", distribution.id, zone_id);
        Ok(distribution)
    }

    async fn update_distribution_percentage(&mut self, id: i64, percentage: f64) -> StoreResult<()> {
        let result = run!(
            self,
            sqlx::query(
                "UPDATE distributions SET percentage = $1, updated_at = NOW() WHERE id = $2"
            )
            .bind(percentage)
            .bind(id),
            execute
        )?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Distribution {id}")));
        }
        Ok(())
    }

    async fn delete_distribution(&mut self, id: i64) -> StoreResult<()> {
        let result = run!(
            self,
            sqlx::query("DELETE FROM distributions WHERE id = $1").bind(id),
            execute
        )?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Distribution {id}")));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        match *self {
            PgSession::Pool(_) => Ok(()),
            PgSession::Tx(tx) => {
                tx.commit().await?;
                Ok(())
            }
        }
    }
}
