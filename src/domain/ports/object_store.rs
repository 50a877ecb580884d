//! Object Store Port
//!
//! The storage operations the deployment flow consumes. Adapters translate
//! provider failures into [`StoreError`] so no SDK type crosses this seam.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::value_objects::{BucketName, CorsPolicy, RegionConfig};
use crate::error::{BucketshipError, BucketshipResult};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a storage adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("access to {resource} denied")]
    Forbidden { resource: String },

    /// Bucket already exists and belongs to the caller
    #[error("bucket {bucket} already exists and is owned by you")]
    AlreadyOwned { bucket: String },

    /// Bucket name is taken by another account
    #[error("bucket name {bucket} is already taken")]
    NameTaken { bucket: String },

    #[error("could not read {path}: {message}")]
    Local { path: String, message: String },

    #[error("{operation}: {message}")]
    Provider { operation: String, message: String },
}

impl StoreError {
    pub fn provider(operation: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Provider {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn into_error(self, operation: &str) -> BucketshipError {
        match self {
            StoreError::Forbidden { resource } => BucketshipError::BucketForbidden { bucket: resource },
            StoreError::Provider { operation, message } => {
                BucketshipError::Provider { operation, message }
            }
            other => BucketshipError::Provider {
                operation: operation.to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Canned access control applied to buckets and objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedAcl {
    Private,
    PublicRead,
}

/// Bucket as reported by the provider's listing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBucket {
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of a key listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectPage {
    pub keys: Vec<String>,
    pub next_token: Option<String>,
}

/// Object version or delete marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectVersion {
    pub key: String,
    pub version_id: Option<String>,
}

/// Where the next version page starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionMarker {
    pub key_marker: String,
    pub version_id_marker: Option<String>,
}

/// One page of a version listing; versions and delete markers together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionPage {
    pub entries: Vec<ObjectVersion>,
    pub next: Option<VersionMarker>,
}

/// Upload request for one local file
#[derive(Debug, Clone, Copy)]
pub struct PutObject<'a> {
    pub key: &'a str,
    pub body: &'a Path,
    pub content_type: Option<&'a str>,
    pub acl: CannedAcl,
}

/// Index and error documents for website hosting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteDocuments {
    pub index: String,
    pub error: String,
}

impl Default for WebsiteDocuments {
    fn default() -> Self {
        Self {
            index: "index.html".to_string(),
            error: "error.html".to_string(),
        }
    }
}

/// Storage operations bound to one region.
///
/// Implementations must be shareable across upload workers.
pub trait ObjectStore: Send + Sync {
    fn create_bucket(&self, bucket: &BucketName, acl: CannedAcl) -> StoreResult<()>;

    fn delete_bucket(&self, bucket: &BucketName) -> StoreResult<()>;

    fn list_buckets(&self) -> StoreResult<Vec<RemoteBucket>>;

    /// `Ok` when the bucket exists and is accessible.
    ///
    /// Adapters must report `NotFound` and `Forbidden` distinctly.
    fn head_bucket(&self, bucket: &BucketName) -> StoreResult<()>;

    fn put_object(&self, bucket: &BucketName, request: PutObject<'_>) -> StoreResult<()>;

    fn list_objects(
        &self,
        bucket: &BucketName,
        prefix: Option<&str>,
        token: Option<&str>,
    ) -> StoreResult<ObjectPage>;

    fn list_object_versions(
        &self,
        bucket: &BucketName,
        from: Option<&VersionMarker>,
    ) -> StoreResult<VersionPage>;

    /// Delete a batch; returns the keys the provider refused to delete.
    fn delete_objects(
        &self,
        bucket: &BucketName,
        objects: &[ObjectVersion],
    ) -> StoreResult<Vec<String>>;

    fn delete_object(&self, bucket: &BucketName, key: &str) -> StoreResult<()>;

    fn put_bucket_cors(&self, bucket: &BucketName, policy: &CorsPolicy) -> StoreResult<()>;

    fn put_bucket_website(
        &self,
        bucket: &BucketName,
        documents: &WebsiteDocuments,
    ) -> StoreResult<()>;

    fn put_bucket_acl(&self, bucket: &BucketName, acl: CannedAcl) -> StoreResult<()>;

    fn put_object_acl(&self, bucket: &BucketName, key: &str, acl: CannedAcl) -> StoreResult<()>;
}

/// Opens an [`ObjectStore`] for a region.
pub trait StoreConnector: Send + Sync {
    fn connect(&self, region: &RegionConfig) -> BucketshipResult<Arc<dyn ObjectStore>>;
}

impl<T: StoreConnector + ?Sized> StoreConnector for Arc<T> {
    fn connect(&self, region: &RegionConfig) -> BucketshipResult<Arc<dyn ObjectStore>> {
        (**self).connect(region)
    }
}
