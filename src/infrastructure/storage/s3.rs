//! S3 Object Store
//!
//! `aws-sdk-s3` is async; the deployment flow is not. Each store drives the
//! SDK on a runtime shared through its connector.

use std::sync::Arc;

use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketCannedAcl, BucketLocationConstraint, CorsConfiguration, CorsRule,
    CreateBucketConfiguration, Delete, ErrorDocument, IndexDocument, ObjectCannedAcl,
    ObjectIdentifier, WebsiteConfiguration,
};
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use tokio::runtime::Runtime;

use crate::domain::ports::{
    CannedAcl, ObjectPage, ObjectStore, ObjectVersion, PutObject, RemoteBucket, StoreError,
    StoreResult, VersionMarker, VersionPage, WebsiteDocuments,
};
use crate::domain::value_objects::{BucketName, CorsPolicy, Credentials, RegionConfig};

/// Name the SDK records as the credential provider
const PROVIDER_NAME: &str = "bucketship";

pub struct S3ObjectStore {
    client: Client,
    runtime: Arc<Runtime>,
    region: String,
}

impl S3ObjectStore {
    pub fn new(credentials: &Credentials, region: &RegionConfig, runtime: Arc<Runtime>) -> Self {
        let creds = aws_sdk_s3::config::Credentials::new(
            credentials.access_key(),
            credentials.secret_key(),
            None,
            None,
            PROVIDER_NAME,
        );
        let config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.region_code().to_string()))
            .endpoint_url(region.endpoint())
            .credentials_provider(creds)
            .build();

        Self {
            client: Client::from_conf(config),
            runtime,
            region: region.region_code().to_string(),
        }
    }
}

impl ObjectStore for S3ObjectStore {
    fn create_bucket(&self, bucket: &BucketName, acl: CannedAcl) -> StoreResult<()> {
        let location = CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
            .build();
        let request = self
            .client
            .create_bucket()
            .bucket(bucket.as_str())
            .create_bucket_configuration(location)
            .acl(bucket_acl(acl));

        self.runtime
            .block_on(request.send())
            .map(|_| ())
            .map_err(|err| classify("create_bucket", bucket.as_str(), err))
    }

    fn delete_bucket(&self, bucket: &BucketName) -> StoreResult<()> {
        let request = self.client.delete_bucket().bucket(bucket.as_str());
        self.runtime
            .block_on(request.send())
            .map(|_| ())
            .map_err(|err| classify("delete_bucket", bucket.as_str(), err))
    }

    fn list_buckets(&self) -> StoreResult<Vec<RemoteBucket>> {
        let response = self
            .runtime
            .block_on(self.client.list_buckets().send())
            .map_err(|err| classify("list_buckets", "buckets", err))?;

        Ok(response
            .buckets()
            .iter()
            .filter_map(|bucket| {
                let name = bucket.name()?.to_string();
                let created_at = bucket.creation_date().and_then(|date| {
                    DateTime::<Utc>::from_timestamp(date.secs(), date.subsec_nanos())
                });
                Some(RemoteBucket { name, created_at })
            })
            .collect())
    }

    fn head_bucket(&self, bucket: &BucketName) -> StoreResult<()> {
        let request = self.client.head_bucket().bucket(bucket.as_str());
        self.runtime
            .block_on(request.send())
            .map(|_| ())
            .map_err(|err| classify("head_bucket", bucket.as_str(), err))
    }

    fn put_object(&self, bucket: &BucketName, request: PutObject<'_>) -> StoreResult<()> {
        let body = self
            .runtime
            .block_on(ByteStream::from_path(request.body))
            .map_err(|err| StoreError::Local {
                path: request.body.display().to_string(),
                message: err.to_string(),
            })?;

        let upload = self
            .client
            .put_object()
            .bucket(bucket.as_str())
            .key(request.key)
            .body(body)
            .set_content_type(request.content_type.map(str::to_string))
            .acl(object_acl(request.acl));
        self.runtime
            .block_on(upload.send())
            .map(|_| ())
            .map_err(|err| classify("put_object", request.key, err))
    }

    fn list_objects(
        &self,
        bucket: &BucketName,
        prefix: Option<&str>,
        token: Option<&str>,
    ) -> StoreResult<ObjectPage> {
        let request = self
            .client
            .list_objects_v2()
            .bucket(bucket.as_str())
            .set_prefix(prefix.map(str::to_string))
            .set_continuation_token(token.map(str::to_string));

        let response = self
            .runtime
            .block_on(request.send())
            .map_err(|err| classify("list_objects", bucket.as_str(), err))?;

        let keys = response
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect();
        let next_token = match response.is_truncated() {
            Some(true) => response.next_continuation_token().map(str::to_string),
            _ => None,
        };
        Ok(ObjectPage { keys, next_token })
    }

    fn list_object_versions(
        &self,
        bucket: &BucketName,
        from: Option<&VersionMarker>,
    ) -> StoreResult<VersionPage> {
        let request = self
            .client
            .list_object_versions()
            .bucket(bucket.as_str())
            .set_key_marker(from.map(|m| m.key_marker.clone()))
            .set_version_id_marker(from.and_then(|m| m.version_id_marker.clone()));

        let response = self
            .runtime
            .block_on(request.send())
            .map_err(|err| classify("list_object_versions", bucket.as_str(), err))?;

        let versions = response.versions().iter().filter_map(|v| {
            Some(ObjectVersion {
                key: v.key()?.to_string(),
                version_id: v.version_id().map(str::to_string),
            })
        });
        let markers = response.delete_markers().iter().filter_map(|m| {
            Some(ObjectVersion {
                key: m.key()?.to_string(),
                version_id: m.version_id().map(str::to_string),
            })
        });
        let entries = versions.chain(markers).collect();

        let next = match (response.is_truncated(), response.next_key_marker()) {
            (Some(true), Some(key)) => Some(VersionMarker {
                key_marker: key.to_string(),
                version_id_marker: response.next_version_id_marker().map(str::to_string),
            }),
            _ => None,
        };
        Ok(VersionPage { entries, next })
    }

    fn delete_objects(
        &self,
        bucket: &BucketName,
        objects: &[ObjectVersion],
    ) -> StoreResult<Vec<String>> {
        if objects.is_empty() {
            return Ok(Vec::new());
        }
        let identifiers = objects
            .iter()
            .map(|object| {
                ObjectIdentifier::builder()
                    .key(&object.key)
                    .set_version_id(object.version_id.clone())
                    .build()
                    .map_err(|err| StoreError::provider("delete_objects", err.to_string()))
            })
            .collect::<StoreResult<Vec<_>>>()?;
        let delete = Delete::builder()
            .set_objects(Some(identifiers))
            .quiet(true)
            .build()
            .map_err(|err| StoreError::provider("delete_objects", err.to_string()))?;

        let request = self
            .client
            .delete_objects()
            .bucket(bucket.as_str())
            .delete(delete);
        let response = self
            .runtime
            .block_on(request.send())
            .map_err(|err| classify("delete_objects", bucket.as_str(), err))?;

        Ok(response
            .errors()
            .iter()
            .filter_map(|failure| failure.key().map(str::to_string))
            .collect())
    }

    fn delete_object(&self, bucket: &BucketName, key: &str) -> StoreResult<()> {
        let request = self
            .client
            .delete_object()
            .bucket(bucket.as_str())
            .key(key);
        self.runtime
            .block_on(request.send())
            .map(|_| ())
            .map_err(|err| classify("delete_object", key, err))
    }

    fn put_bucket_cors(&self, bucket: &BucketName, policy: &CorsPolicy) -> StoreResult<()> {
        let build_err = |err: aws_sdk_s3::error::BuildError| {
            StoreError::provider("put_bucket_cors", err.to_string())
        };
        let rule = CorsRule::builder()
            .set_allowed_origins(Some(policy.allowed_origins.clone()))
            .set_allowed_methods(Some(policy.allowed_methods.clone()))
            .set_allowed_headers(Some(policy.allowed_headers.clone()))
            .set_expose_headers(Some(policy.expose_headers.clone()))
            .max_age_seconds(i32::try_from(policy.max_age_seconds).unwrap_or(i32::MAX))
            .build()
            .map_err(build_err)?;
        let configuration = CorsConfiguration::builder()
            .cors_rules(rule)
            .build()
            .map_err(build_err)?;

        let request = self
            .client
            .put_bucket_cors()
            .bucket(bucket.as_str())
            .cors_configuration(configuration);
        self.runtime
            .block_on(request.send())
            .map(|_| ())
            .map_err(|err| classify("put_bucket_cors", bucket.as_str(), err))
    }

    fn put_bucket_website(
        &self,
        bucket: &BucketName,
        documents: &WebsiteDocuments,
    ) -> StoreResult<()> {
        let build_err = |err: aws_sdk_s3::error::BuildError| {
            StoreError::provider("put_bucket_website", err.to_string())
        };
        let index = IndexDocument::builder()
            .suffix(&documents.index)
            .build()
            .map_err(build_err)?;
        let error = ErrorDocument::builder()
            .key(&documents.error)
            .build()
            .map_err(build_err)?;
        let configuration = WebsiteConfiguration::builder()
            .index_document(index)
            .error_document(error)
            .build();

        let request = self
            .client
            .put_bucket_website()
            .bucket(bucket.as_str())
            .website_configuration(configuration);
        self.runtime
            .block_on(request.send())
            .map(|_| ())
            .map_err(|err| classify("put_bucket_website", bucket.as_str(), err))
    }

    fn put_bucket_acl(&self, bucket: &BucketName, acl: CannedAcl) -> StoreResult<()> {
        let request = self
            .client
            .put_bucket_acl()
            .bucket(bucket.as_str())
            .acl(bucket_acl(acl));
        self.runtime
            .block_on(request.send())
            .map(|_| ())
            .map_err(|err| classify("put_bucket_acl", bucket.as_str(), err))
    }

    fn put_object_acl(&self, bucket: &BucketName, key: &str, acl: CannedAcl) -> StoreResult<()> {
        let request = self
            .client
            .put_object_acl()
            .bucket(bucket.as_str())
            .key(key)
            .acl(object_acl(acl));
        self.runtime
            .block_on(request.send())
            .map(|_| ())
            .map_err(|err| classify("put_object_acl", key, err))
    }
}

fn bucket_acl(acl: CannedAcl) -> BucketCannedAcl {
    match acl {
        CannedAcl::Private => BucketCannedAcl::Private,
        CannedAcl::PublicRead => BucketCannedAcl::PublicRead,
    }
}

fn object_acl(acl: CannedAcl) -> ObjectCannedAcl {
    match acl {
        CannedAcl::Private => ObjectCannedAcl::Private,
        CannedAcl::PublicRead => ObjectCannedAcl::PublicRead,
    }
}

/// Map an SDK failure onto the port's error kinds.
///
/// Head requests carry no error body, so the HTTP status is consulted when
/// the provider code is missing.
fn classify<E>(operation: &str, resource: &str, err: SdkError<E, HttpResponse>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let status = err.raw_response().map(|response| response.status().as_u16());
    let kind = error_kind(err.code(), status);
    tracing::debug!(operation, resource, code = ?err.code(), status = ?status, "provider error");

    let resource = resource.to_string();
    match kind {
        ErrorKind::AlreadyOwned => StoreError::AlreadyOwned { bucket: resource },
        ErrorKind::NameTaken => StoreError::NameTaken { bucket: resource },
        ErrorKind::NotFound => StoreError::NotFound { resource },
        ErrorKind::Forbidden => StoreError::Forbidden { resource },
        ErrorKind::Other => {
            StoreError::provider(operation, DisplayErrorContext(&err).to_string())
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ErrorKind {
    AlreadyOwned,
    NameTaken,
    NotFound,
    Forbidden,
    Other,
}

fn error_kind(code: Option<&str>, status: Option<u16>) -> ErrorKind {
    match (code, status) {
        (Some("BucketAlreadyOwnedByYou"), _) => ErrorKind::AlreadyOwned,
        (Some("BucketAlreadyExists"), _) => ErrorKind::NameTaken,
        (Some("NoSuchBucket" | "NoSuchKey" | "NotFound"), _) | (_, Some(404)) => {
            ErrorKind::NotFound
        }
        (Some("AccessDenied" | "Forbidden"), _) | (_, Some(403)) => ErrorKind::Forbidden,
        _ => ErrorKind::Other,
    }
}
