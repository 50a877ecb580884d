//! Bucket Listing Entities

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Bucket as presented to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketInfo {
    pub name: String,
    /// Region the listing was made against; the provider does not filter by it
    pub region: String,
    pub created_at: Option<DateTime<Utc>>,
    pub website_enabled: bool,
    pub cors_enabled: bool,
}

/// Result of a head-style existence probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum BucketStatus {
    Exists,
    Missing,
    /// The bucket may exist, but these credentials cannot see it
    Forbidden,
    /// The probe itself failed
    Unknown(String),
}

impl BucketStatus {
    pub fn exists(&self) -> bool {
        matches!(self, BucketStatus::Exists)
    }
}

/// Details for one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketDetails {
    pub name: String,
    pub region: String,
    pub endpoint: String,
    pub status: BucketStatus,
}
