//! Tracked Buckets
//!
//! Remembers buckets created during a run so they can be removed again.
//! A registry belongs to one run; [`CleanupGuard`] drains it when the run
//! ends, however it ends.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::buckets::BucketLifecycleManager;
use crate::domain::entities::BucketStatus;
use crate::domain::ports::StoreConnector;
use crate::domain::value_objects::{BucketName, RegionConfig};

/// Buckets removed and buckets left behind by a drain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

/// Run-scoped set of created buckets, safe to share between deployments
#[derive(Debug, Default)]
pub struct TrackedBuckets {
    buckets: Mutex<BTreeMap<String, RegionConfig>>,
}

impl TrackedBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, RegionConfig>> {
        self.buckets.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn track(&self, bucket: &BucketName, region: &RegionConfig) {
        tracing::debug!(bucket = %bucket, "tracking bucket");
        self.lock().insert(bucket.to_string(), region.clone());
    }

    /// Returns whether the bucket was tracked
    pub fn untrack(&self, bucket: &str) -> bool {
        self.lock().remove(bucket).is_some()
    }

    pub fn tracked(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Force-delete every tracked bucket that still exists.
    ///
    /// Buckets already gone are simply forgotten. Buckets that could not be
    /// deleted stay tracked.
    pub fn drain(&self, connector: &dyn StoreConnector) -> DrainReport {
        let snapshot: Vec<(String, RegionConfig)> = self
            .lock()
            .iter()
            .map(|(name, region)| (name.clone(), region.clone()))
            .collect();

        let mut report = DrainReport::default();
        for (name, region) in snapshot {
            let Ok(bucket) = BucketName::parse(&name) else {
                self.untrack(&name);
                continue;
            };
            let store = match connector.connect(&region) {
                Ok(store) => store,
                Err(err) => {
                    tracing::error!(bucket = %name, error = %err, "cannot reach region for cleanup");
                    report.failed.push(name);
                    continue;
                }
            };
            let manager = BucketLifecycleManager::new(store.as_ref(), &region);

            if manager.probe(&bucket) == BucketStatus::Missing {
                self.untrack(&name);
                continue;
            }
            if manager.delete(&bucket, true) {
                self.untrack(&name);
                report.deleted.push(name);
            } else {
                report.failed.push(name);
            }
        }
        report
    }
}

/// Drains a [`TrackedBuckets`] when dropped, unless disarmed.
pub struct CleanupGuard {
    registry: Arc<TrackedBuckets>,
    connector: Arc<dyn StoreConnector>,
    armed: bool,
}

impl CleanupGuard {
    pub fn new(registry: Arc<TrackedBuckets>, connector: Arc<dyn StoreConnector>) -> Self {
        Self {
            registry,
            connector,
            armed: true,
        }
    }

    pub fn registry(&self) -> Arc<TrackedBuckets> {
        Arc::clone(&self.registry)
    }

    /// Keep everything that was created
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if !self.armed || self.registry.is_empty() {
            return;
        }
        tracing::info!(count = self.registry.len(), "removing buckets created by this run");
        let report = self.registry.drain(self.connector.as_ref());
        if !report.failed.is_empty() {
            tracing::warn!(buckets = ?report.failed, "some buckets could not be removed");
        }
    }
}
