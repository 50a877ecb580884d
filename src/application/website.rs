//! Static Website Configuration
//!
//! Enables website hosting on a bucket and opens it (and its objects) for
//! public reads.

use crate::domain::ports::{CannedAcl, ObjectStore, WebsiteDocuments};
use crate::domain::value_objects::BucketName;
use crate::error::BucketshipResult;

/// Per-object ACL results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AclReport {
    pub updated: usize,
    pub failed: Vec<String>,
}

impl AclReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct WebsiteConfigurator<'a> {
    store: &'a dyn ObjectStore,
    documents: WebsiteDocuments,
}

impl<'a> WebsiteConfigurator<'a> {
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self {
            store,
            documents: WebsiteDocuments::default(),
        }
    }

    pub fn with_documents(mut self, documents: WebsiteDocuments) -> Self {
        self.documents = documents;
        self
    }

    /// Turn on website hosting with the configured index and error documents.
    pub fn configure(&self, bucket: &BucketName) -> BucketshipResult<()> {
        self.store
            .put_bucket_website(bucket, &self.documents)
            .map_err(|e| e.into_error("put_bucket_website"))?;
        tracing::info!(
            bucket = %bucket,
            index = %self.documents.index,
            error = %self.documents.error,
            "website hosting enabled"
        );
        Ok(())
    }

    pub fn make_bucket_public(&self, bucket: &BucketName) -> BucketshipResult<()> {
        self.store
            .put_bucket_acl(bucket, CannedAcl::PublicRead)
            .map_err(|e| e.into_error("put_bucket_acl"))
    }

    /// Set public-read on each key; failures are collected, not fatal.
    pub fn make_objects_public<I, S>(&self, bucket: &BucketName, keys: I) -> AclReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = AclReport::default();
        for key in keys {
            let key = key.as_ref();
            match self.store.put_object_acl(bucket, key, CannedAcl::PublicRead) {
                Ok(()) => report.updated += 1,
                Err(err) => {
                    tracing::warn!(bucket = %bucket, key, error = %err, "object ACL not set");
                    report.failed.push(key.to_string());
                }
            }
        }
        report
    }
}
