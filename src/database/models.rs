use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Distribution {
    pub id: i64,
    pub zone_id: i64,
    pub percentage: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Zone {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Sum of the percentages of a zone's distributions.
///
/// Nothing requires this to equal 100; callers that care must check it.
pub fn total_percentage(distributions: &[Distribution]) -> f64 {
    distributions.iter().map(|d| d.percentage).sum()
}
