//! Bucket Lifecycle
//!
//! Create, delete, list and probe buckets in one region. Provider failures
//! stop here: mutating calls log and report `false`, listings propagate a
//! [`BucketshipError::Provider`].

use chrono::Utc;

use crate::domain::entities::{BucketDetails, BucketInfo, BucketStatus};
use crate::domain::ports::{CannedAcl, ObjectStore, StoreError, VersionMarker};
use crate::domain::value_objects::{BucketName, RegionConfig};
use crate::error::{BucketshipError, BucketshipResult};

/// Largest batch accepted by the provider's batch delete
pub const DELETE_BATCH: usize = 1000;

/// What a create call ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// The bucket was already ours; nothing changed
    AlreadyOwned,
}

pub struct BucketLifecycleManager<'a> {
    store: &'a dyn ObjectStore,
    region: &'a RegionConfig,
}

impl<'a> BucketLifecycleManager<'a> {
    pub fn new(store: &'a dyn ObjectStore, region: &'a RegionConfig) -> Self {
        Self { store, region }
    }

    pub fn region(&self) -> &RegionConfig {
        self.region
    }

    /// Create `bucket` with the given canned ACL.
    ///
    /// A bucket we already own is not an error.
    pub fn create(&self, bucket: &BucketName, acl: CannedAcl) -> BucketshipResult<CreateOutcome> {
        match self.store.create_bucket(bucket, acl) {
            Ok(()) => {
                tracing::info!(bucket = %bucket, region = self.region.id(), "bucket created");
                Ok(CreateOutcome::Created)
            }
            Err(StoreError::AlreadyOwned { .. }) => {
                tracing::debug!(bucket = %bucket, "bucket already owned");
                Ok(CreateOutcome::AlreadyOwned)
            }
            Err(err) => Err(err.into_error("create_bucket")),
        }
    }

    /// Delete `bucket`; with `force`, every object version and delete marker goes first.
    pub fn delete(&self, bucket: &BucketName, force: bool) -> bool {
        if force {
            if let Err(err) = self.purge(bucket) {
                tracing::error!(bucket = %bucket, error = %err, "failed to empty bucket");
                return false;
            }
        }
        match self.store.delete_bucket(bucket) {
            Ok(()) => {
                tracing::info!(bucket = %bucket, "bucket deleted");
                true
            }
            Err(err) => {
                tracing::error!(bucket = %bucket, error = %err, "failed to delete bucket");
                false
            }
        }
    }

    /// Remove every object version and delete marker; returns how many were removed.
    pub fn purge(&self, bucket: &BucketName) -> BucketshipResult<usize> {
        let mut removed = 0;
        let mut marker: Option<VersionMarker> = None;

        loop {
            let page = self
                .store
                .list_object_versions(bucket, marker.as_ref())
                .map_err(|e| e.into_error("list_object_versions"))?;
            let deleted_here = !page.entries.is_empty();

            for batch in page.entries.chunks(DELETE_BATCH) {
                let refused = self
                    .store
                    .delete_objects(bucket, batch)
                    .map_err(|e| e.into_error("delete_objects"))?;
                if !refused.is_empty() {
                    return Err(BucketshipError::Provider {
                        operation: "delete_objects".to_string(),
                        message: format!("could not delete {}", refused.join(", ")),
                    });
                }
                removed += batch.len();
            }

            match page.next {
                // Deleting shifts what the next page holds; restart from the top.
                Some(_) if deleted_here => marker = None,
                Some(next) => marker = Some(next),
                None => break,
            }
        }

        tracing::debug!(bucket = %bucket, removed, "bucket emptied");
        Ok(removed)
    }

    /// Every bucket the credentials can see, tagged with this region.
    pub fn list(&self) -> BucketshipResult<Vec<BucketInfo>> {
        let buckets = self
            .store
            .list_buckets()
            .map_err(|e| e.into_error("list_buckets"))?;

        Ok(buckets
            .into_iter()
            .map(|b| BucketInfo {
                name: b.name,
                region: self.region.id().to_string(),
                created_at: b.created_at,
                website_enabled: false,
                cors_enabled: false,
            })
            .collect())
    }

    /// Buckets whose name starts with `prefix`
    pub fn list_with_prefix(&self, prefix: &str) -> BucketshipResult<Vec<BucketInfo>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|b| b.name.starts_with(prefix))
            .collect())
    }

    /// Head-style probe keeping "missing" and "forbidden" apart
    pub fn probe(&self, bucket: &BucketName) -> BucketStatus {
        match self.store.head_bucket(bucket) {
            Ok(()) => BucketStatus::Exists,
            Err(StoreError::NotFound { .. }) => BucketStatus::Missing,
            Err(StoreError::Forbidden { .. }) => BucketStatus::Forbidden,
            Err(other) => BucketStatus::Unknown(other.to_string()),
        }
    }

    /// `true` only for an accessible bucket.
    ///
    /// A forbidden bucket is an error rather than `false`, since it may well
    /// exist under another account.
    pub fn exists(&self, bucket: &BucketName) -> BucketshipResult<bool> {
        match self.probe(bucket) {
            BucketStatus::Exists => Ok(true),
            BucketStatus::Missing => Ok(false),
            BucketStatus::Forbidden => Err(BucketshipError::BucketForbidden {
                bucket: bucket.to_string(),
            }),
            BucketStatus::Unknown(message) => Err(BucketshipError::Provider {
                operation: "head_bucket".to_string(),
                message,
            }),
        }
    }

    pub fn details(&self, bucket: &BucketName) -> BucketDetails {
        BucketDetails {
            name: bucket.to_string(),
            region: self.region.id().to_string(),
            endpoint: self.region.endpoint().to_string(),
            status: self.probe(bucket),
        }
    }

    /// Every key under `prefix`, following pagination
    pub fn list_files(
        &self,
        bucket: &BucketName,
        prefix: Option<&str>,
    ) -> BucketshipResult<Vec<String>> {
        let mut keys = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let page = self
                .store
                .list_objects(bucket, prefix, token.as_deref())
                .map_err(|e| e.into_error("list_objects"))?;
            keys.extend(page.keys);
            match page.next_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }
        Ok(keys)
    }

    pub fn delete_file(&self, bucket: &BucketName, key: &str) -> bool {
        match self.store.delete_object(bucket, key) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(bucket = %bucket, key, error = %err, "failed to delete object");
                false
            }
        }
    }
}

/// Today's date as `YYYY-MM-DD`; typed to confirm deleting every bucket
pub fn today_phrase() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
