//! In-memory port implementations shared by use-case unit tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::domain::ports::{
    CannedAcl, Confirmer, DeployEvent, DeployEventSink, ObjectPage, ObjectStore, ObjectVersion,
    PreflightProbe, PreflightResponse, PutObject, RemoteBucket, StoreConnector, StoreError,
    StoreResult, VersionMarker, VersionPage, WebsiteDocuments,
};
use crate::domain::value_objects::{BucketName, CorsPolicy, RegionConfig};
use crate::error::BucketshipResult;

#[derive(Debug, Default, Clone)]
pub struct MemoryBucket {
    pub objects: BTreeMap<String, Option<String>>,
    pub public_objects: HashSet<String>,
    /// Extra (key, version) pairs that only show up in version listings
    pub old_versions: Vec<ObjectVersion>,
    pub cors: Option<CorsPolicy>,
    pub website: Option<WebsiteDocuments>,
    pub public: bool,
}

#[derive(Default)]
struct State {
    buckets: BTreeMap<String, MemoryBucket>,
    calls: Vec<String>,
    failing_keys: HashSet<String>,
    failing_ops: HashSet<String>,
    forbidden: HashSet<String>,
}

/// Object store backed by maps; records every call name in order.
pub struct MemoryStore {
    state: Mutex<State>,
    page_size: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            page_size: 2,
        }
    }

    pub fn with_bucket(self, name: &str, keys: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let bucket = state.buckets.entry(name.to_string()).or_default();
            for key in keys {
                bucket.objects.insert(key.to_string(), None);
            }
        }
        self
    }

    pub fn with_old_versions(self, name: &str, key: &str, versions: usize) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let bucket = state.buckets.entry(name.to_string()).or_default();
            for i in 0..versions {
                bucket.old_versions.push(ObjectVersion {
                    key: key.to_string(),
                    version_id: Some(format!("v{}", i)),
                });
            }
        }
        self
    }

    pub fn fail_upload(self, key: &str) -> Self {
        self.state.lock().unwrap().failing_keys.insert(key.to_string());
        self
    }

    pub fn fail_operation(self, op: &str) -> Self {
        self.state.lock().unwrap().failing_ops.insert(op.to_string());
        self
    }

    pub fn forbid(self, bucket: &str) -> Self {
        self.state.lock().unwrap().forbidden.insert(bucket.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == op).count()
    }

    pub fn bucket(&self, name: &str) -> Option<MemoryBucket> {
        self.state.lock().unwrap().buckets.get(name).cloned()
    }

    pub fn bucket_names(&self) -> Vec<String> {
        self.state.lock().unwrap().buckets.keys().cloned().collect()
    }

    fn enter(&self, op: &str) -> StoreResult<std::sync::MutexGuard<'_, State>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(op.to_string());
        if state.failing_ops.contains(op) {
            return Err(StoreError::provider(op, "injected failure"));
        }
        Ok(state)
    }

    fn existing<'s>(
        state: &'s mut State,
        bucket: &BucketName,
    ) -> StoreResult<&'s mut MemoryBucket> {
        if state.forbidden.contains(bucket.as_str()) {
            return Err(StoreError::Forbidden {
                resource: bucket.to_string(),
            });
        }
        state
            .buckets
            .get_mut(bucket.as_str())
            .ok_or_else(|| StoreError::NotFound {
                resource: bucket.to_string(),
            })
    }
}

impl ObjectStore for MemoryStore {
    fn create_bucket(&self, bucket: &BucketName, acl: CannedAcl) -> StoreResult<()> {
        let mut state = self.enter("create_bucket")?;
        if state.buckets.contains_key(bucket.as_str()) {
            return Err(StoreError::AlreadyOwned {
                bucket: bucket.to_string(),
            });
        }
        state.buckets.insert(
            bucket.to_string(),
            MemoryBucket {
                public: acl == CannedAcl::PublicRead,
                ..Default::default()
            },
        );
        Ok(())
    }

    fn delete_bucket(&self, bucket: &BucketName) -> StoreResult<()> {
        let mut state = self.enter("delete_bucket")?;
        let existing = Self::existing(&mut state, bucket)?;
        if !existing.objects.is_empty() || !existing.old_versions.is_empty() {
            return Err(StoreError::provider("delete_bucket", "BucketNotEmpty"));
        }
        state.buckets.remove(bucket.as_str());
        Ok(())
    }

    fn list_buckets(&self) -> StoreResult<Vec<RemoteBucket>> {
        let state = self.enter("list_buckets")?;
        Ok(state
            .buckets
            .keys()
            .map(|name| RemoteBucket {
                name: name.clone(),
                created_at: None,
            })
            .collect())
    }

    fn head_bucket(&self, bucket: &BucketName) -> StoreResult<()> {
        let mut state = self.enter("head_bucket")?;
        Self::existing(&mut state, bucket).map(|_| ())
    }

    fn put_object(&self, bucket: &BucketName, request: PutObject<'_>) -> StoreResult<()> {
        let mut state = self.enter("put_object")?;
        if state.failing_keys.contains(request.key) {
            return Err(StoreError::provider("put_object", "injected upload failure"));
        }
        let existing = Self::existing(&mut state, bucket)?;
        existing.objects.insert(
            request.key.to_string(),
            request.content_type.map(str::to_string),
        );
        if request.acl == CannedAcl::PublicRead {
            existing.public_objects.insert(request.key.to_string());
        }
        Ok(())
    }

    fn list_objects(
        &self,
        bucket: &BucketName,
        prefix: Option<&str>,
        token: Option<&str>,
    ) -> StoreResult<ObjectPage> {
        let mut state = self.enter("list_objects")?;
        let existing = Self::existing(&mut state, bucket)?;
        let keys: Vec<String> = existing
            .objects
            .keys()
            .filter(|k| prefix.map_or(true, |p| k.starts_with(p)))
            .filter(|k| token.map_or(true, |t| k.as_str() > t))
            .take(self.page_size + 1)
            .cloned()
            .collect();
        let more = keys.len() > self.page_size;
        let keys: Vec<String> = keys.into_iter().take(self.page_size).collect();
        Ok(ObjectPage {
            next_token: if more { keys.last().cloned() } else { None },
            keys,
        })
    }

    fn list_object_versions(
        &self,
        bucket: &BucketName,
        from: Option<&VersionMarker>,
    ) -> StoreResult<VersionPage> {
        let mut state = self.enter("list_object_versions")?;
        let existing = Self::existing(&mut state, bucket)?;
        let mut all: Vec<ObjectVersion> = existing
            .objects
            .keys()
            .map(|k| ObjectVersion {
                key: k.clone(),
                version_id: Some("current".to_string()),
            })
            .chain(existing.old_versions.iter().cloned())
            .collect();
        all.sort_by(|a, b| (&a.key, &a.version_id).cmp(&(&b.key, &b.version_id)));

        let start = match from {
            Some(marker) => all
                .iter()
                .position(|v| {
                    v.key == marker.key_marker && v.version_id == marker.version_id_marker
                })
                .map(|i| i + 1)
                .unwrap_or(all.len()),
            None => 0,
        };
        let entries: Vec<ObjectVersion> =
            all.iter().skip(start).take(self.page_size).cloned().collect();
        let next = if start + entries.len() < all.len() {
            entries.last().map(|v| VersionMarker {
                key_marker: v.key.clone(),
                version_id_marker: v.version_id.clone(),
            })
        } else {
            None
        };
        Ok(VersionPage { entries, next })
    }

    fn delete_objects(
        &self,
        bucket: &BucketName,
        objects: &[ObjectVersion],
    ) -> StoreResult<Vec<String>> {
        let mut state = self.enter("delete_objects")?;
        let existing = Self::existing(&mut state, bucket)?;
        for object in objects {
            match object.version_id.as_deref() {
                Some("current") => {
                    existing.objects.remove(&object.key);
                }
                _ => existing.old_versions.retain(|v| v != object),
            }
        }
        Ok(Vec::new())
    }

    fn delete_object(&self, bucket: &BucketName, key: &str) -> StoreResult<()> {
        let mut state = self.enter("delete_object")?;
        let existing = Self::existing(&mut state, bucket)?;
        existing.objects.remove(key);
        Ok(())
    }

    fn put_bucket_cors(&self, bucket: &BucketName, policy: &CorsPolicy) -> StoreResult<()> {
        let mut state = self.enter("put_bucket_cors")?;
        Self::existing(&mut state, bucket)?.cors = Some(policy.clone());
        Ok(())
    }

    fn put_bucket_website(
        &self,
        bucket: &BucketName,
        documents: &WebsiteDocuments,
    ) -> StoreResult<()> {
        let mut state = self.enter("put_bucket_website")?;
        Self::existing(&mut state, bucket)?.website = Some(documents.clone());
        Ok(())
    }

    fn put_bucket_acl(&self, bucket: &BucketName, acl: CannedAcl) -> StoreResult<()> {
        let mut state = self.enter("put_bucket_acl")?;
        Self::existing(&mut state, bucket)?.public = acl == CannedAcl::PublicRead;
        Ok(())
    }

    fn put_object_acl(&self, bucket: &BucketName, key: &str, acl: CannedAcl) -> StoreResult<()> {
        let mut state = self.enter("put_object_acl")?;
        let existing = Self::existing(&mut state, bucket)?;
        if acl == CannedAcl::PublicRead {
            existing.public_objects.insert(key.to_string());
        }
        Ok(())
    }
}

/// Hands out the same store for every region.
pub struct SharedConnector(pub Arc<MemoryStore>);

impl StoreConnector for SharedConnector {
    fn connect(&self, _region: &RegionConfig) -> BucketshipResult<Arc<dyn ObjectStore>> {
        let store: Arc<dyn ObjectStore> = self.0.clone();
        Ok(store)
    }
}

/// Preflight probe answering every request with the same allow-origin header.
pub struct StaticProbe(pub Option<String>);

impl PreflightProbe for StaticProbe {
    fn preflight(&self, _url: &str, origin: &str) -> Result<PreflightResponse, String> {
        let allow_origin = match self.0.as_deref() {
            Some("<echo>") => Some(origin.to_string()),
            other => other.map(str::to_string),
        };
        Ok(PreflightResponse {
            status: 200,
            allow_origin,
        })
    }
}

/// Replays scripted answers in order; records the prompts it saw.
#[derive(Default)]
pub struct ScriptedConfirmer {
    answers: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().rev().map(|s| s.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn ask(&self, prompt: &str) -> BucketshipResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answers.lock().unwrap().pop().unwrap_or_default())
    }
}

/// Event sink keeping every event.
#[derive(Default)]
pub struct RecordingSink(pub Mutex<Vec<DeployEvent>>);

impl RecordingSink {
    pub fn events(&self) -> Vec<DeployEvent> {
        self.0.lock().unwrap().clone()
    }
}

impl DeployEventSink for RecordingSink {
    fn on_event(&self, event: DeployEvent) {
        self.0.lock().unwrap().push(event);
    }
}
