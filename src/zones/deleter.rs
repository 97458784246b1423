use thiserror::Error;
use tracing::info;

use crate::database::models::Distribution;
use crate::database::{SessionMode, StoreError, ZoneStore};

#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("Distribution {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Removes one distribution and returns the row as it was before deletion.
pub async fn delete_distribution(store: &dyn ZoneStore, id: i64) -> Result<Distribution, DeleteError> {
    let mut session = store.begin(SessionMode::Direct).await?;

    let distribution = session
        .find_distribution(id)
        .await?
        .ok_or(DeleteError::NotFound(id))?;

    // Someone else may have removed it since the lookup.
    session.delete_distribution(id).await.map_err(|e| match e {
        StoreError::NotFound(_) => DeleteError::NotFound(id),
        other => DeleteError::Store(other),
    })?;
    session.commit().await?;

    info!("Deleted distribution {} from zone {}", id, distribution.zone_id);
    Ok(distribution)
}
