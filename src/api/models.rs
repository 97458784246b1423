use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

// Zone models
#[derive(Debug, Deserialize)]
pub struct EditZoneRequest {
    pub id: i64,
    pub name: String,
    pub distributions: Vec<DistributionEntry>,
}

/// One element of `distributions`: updates `id` when present, creates otherwise.
#[derive(Debug, Deserialize)]
pub struct DistributionEntry {
    pub id: Option<i64>,
    pub percentage: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// System models
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub timestamp: DateTime<Utc>,
}
