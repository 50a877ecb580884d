//! Object Storage Adapters
//!
//! - `S3ObjectStore` - `aws-sdk-s3` client bound to one region
//! - `S3Connector` - builds stores per region from one credential pair

mod s3;

use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::domain::ports::{ObjectStore, StoreConnector};
use crate::domain::value_objects::{Credentials, RegionConfig};
use crate::error::BucketshipResult;

pub use s3::S3ObjectStore;

/// Opens S3 stores that share one runtime
pub struct S3Connector {
    credentials: Credentials,
    runtime: Arc<Runtime>,
}

impl S3Connector {
    pub fn new(credentials: Credentials) -> BucketshipResult<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("bucketship-s3")
            .build()?;
        Ok(Self {
            credentials,
            runtime: Arc::new(runtime),
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl StoreConnector for S3Connector {
    fn connect(&self, region: &RegionConfig) -> BucketshipResult<Arc<dyn ObjectStore>> {
        tracing::debug!(region = region.id(), endpoint = region.endpoint(), "opening store");
        let store = S3ObjectStore::new(&self.credentials, region, Arc::clone(&self.runtime));
        Ok(Arc::new(store))
    }
}
