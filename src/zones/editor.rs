use thiserror::Error;
use tracing::{debug, info, warn};

use crate::database::models::total_percentage;
use crate::database::{SessionMode, StoreError, ZoneStore};

/// A validated edit of one zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneEdit {
    pub zone_id: i64,
    pub name: String,
    pub changes: Vec<DistributionChange>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistributionChange {
    Update { id: i64, percentage: f64 },
    Create { percentage: f64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditSummary {
    pub updated: Vec<i64>,
    pub created: Vec<i64>,
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Zone {0} not found")]
    ZoneNotFound(i64),

    #[error("Distribution {0} not found")]
    DistributionNotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Applies `edit` change by change, in order, then renames the zone.
///
/// With [`SessionMode::Direct`] a failure leaves every change made before it
/// in place. With [`SessionMode::Transaction`] nothing is kept unless the
/// whole edit succeeds.
pub async fn apply_edit(
    store: &dyn ZoneStore,
    edit: &ZoneEdit,
    mode: SessionMode,
) -> Result<EditSummary, EditError> {
    let mut session = store.begin(mode).await?;

    let zone = session
        .find_zone(edit.zone_id)
        .await?
        .ok_or(EditError::ZoneNotFound(edit.zone_id))?;

    let mut summary = EditSummary::default();

    for change in &edit.changes {
        match *change {
            DistributionChange::Update { id, percentage } => {
                if session.find_distribution(id).await?.is_none() {
                    return Err(EditError::DistributionNotFound(id));
                }

                session
                    .update_distribution_percentage(id, percentage)
                    .await
                    .map_err(|e| match e {
                        StoreError::NotFound(_) => EditError::DistributionNotFound(id),
                        other => EditError::Store(other),
                    })?;
                debug!("Distribution {} set to {}%", id, percentage);
                summary.updated.push(id);
            }
            DistributionChange::Create { percentage } => {
                let distribution = session.create_distribution(zone.id, percentage).await?;
                summary.created.push(distribution.id);
            }
        }
    }

    session
        .save_zone_name(zone.id, &edit.name)
        .await
        .map_err(|e| match e {
            StoreError::NotFound(_) => EditError::ZoneNotFound(zone.id),
            other => EditError::Store(other),
        })?;

    match session.list_distributions(zone.id).await {
        Ok(distributions) => {
            let total = total_percentage(&distributions);
            if (total - 100.0).abs() > 1e-6 {
                warn!("Zone {} distributions sum to {}%, not 100%", zone.id, total);
            }
        }
        Err(e) => warn!("Could not total distributions for zone {}: {}", zone.id, e),
    }

    session.commit().await?;

    info!(
        "Edited zone {}: {} distributions updated, {} created",
        zone.id,
        summary.updated.len(),
        summary.created.len()
    );

    Ok(summary)
}
