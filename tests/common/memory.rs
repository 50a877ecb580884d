//! In-memory implementations of the public ports.
//!
//! Integration tests drive the use cases through these instead of a real
//! provider. Listings return a single page.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use bucketship::domain::ports::{
    CannedAcl, Confirmer, DeployEvent, DeployEventSink, ObjectPage, ObjectStore, ObjectVersion,
    PreflightProbe, PreflightResponse, PutObject, RemoteBucket, StoreConnector, StoreError,
    StoreResult, VersionMarker, VersionPage, WebsiteDocuments,
};
use bucketship::domain::value_objects::{BucketName, CorsPolicy, RegionConfig};
use bucketship::BucketshipResult;

#[derive(Debug, Default, Clone)]
pub struct MemoryBucket {
    pub objects: BTreeMap<String, Option<String>>,
    pub cors: Option<CorsPolicy>,
    pub website: Option<WebsiteDocuments>,
    pub public: bool,
}

#[derive(Default)]
struct State {
    buckets: BTreeMap<String, MemoryBucket>,
    calls: Vec<String>,
    failing_ops: HashSet<String>,
}

/// Object store backed by maps; records every call name in order.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
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

    /// Make every call to `op` fail with a provider error
    pub fn fail_operation(self, op: &str) -> Self {
        self.state.lock().unwrap().failing_ops.insert(op.to_string());
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

    fn existing<'s>(state: &'s mut State, bucket: &BucketName) -> StoreResult<&'s mut MemoryBucket> {
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
                ..MemoryBucket::default()
            },
        );
        Ok(())
    }

    fn delete_bucket(&self, bucket: &BucketName) -> StoreResult<()> {
        let mut state = self.enter("delete_bucket")?;
        if !Self::existing(&mut state, bucket)?.objects.is_empty() {
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
        Self::existing(&mut state, bucket)?.objects.insert(
            request.key.to_string(),
            request.content_type.map(str::to_string),
        );
        Ok(())
    }

    fn list_objects(
        &self,
        bucket: &BucketName,
        prefix: Option<&str>,
        _token: Option<&str>,
    ) -> StoreResult<ObjectPage> {
        let mut state = self.enter("list_objects")?;
        let keys = Self::existing(&mut state, bucket)?
            .objects
            .keys()
            .filter(|k| prefix.map_or(true, |p| k.starts_with(p)))
            .cloned()
            .collect();
        Ok(ObjectPage {
            keys,
            next_token: None,
        })
    }

    fn list_object_versions(
        &self,
        bucket: &BucketName,
        _from: Option<&VersionMarker>,
    ) -> StoreResult<VersionPage> {
        let mut state = self.enter("list_object_versions")?;
        let entries = Self::existing(&mut state, bucket)?
            .objects
            .keys()
            .map(|key| ObjectVersion {
                key: key.clone(),
                version_id: None,
            })
            .collect();
        Ok(VersionPage {
            entries,
            next: None,
        })
    }

    fn delete_objects(
        &self,
        bucket: &BucketName,
        objects: &[ObjectVersion],
    ) -> StoreResult<Vec<String>> {
        let mut state = self.enter("delete_objects")?;
        let existing = Self::existing(&mut state, bucket)?;
        for object in objects {
            existing.objects.remove(&object.key);
        }
        Ok(Vec::new())
    }

    fn delete_object(&self, bucket: &BucketName, key: &str) -> StoreResult<()> {
        let mut state = self.enter("delete_object")?;
        Self::existing(&mut state, bucket)?.objects.remove(key);
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

    fn put_object_acl(&self, bucket: &BucketName, _key: &str, _acl: CannedAcl) -> StoreResult<()> {
        let mut state = self.enter("put_object_acl")?;
        Self::existing(&mut state, bucket).map(|_| ())
    }
}

/// Hands out the same store for every region.
#[derive(Clone)]
pub struct MemoryConnector(pub Arc<MemoryStore>);

impl MemoryConnector {
    pub fn new(store: MemoryStore) -> Self {
        Self(Arc::new(store))
    }

    pub fn store(&self) -> &MemoryStore {
        &self.0
    }
}

impl StoreConnector for MemoryConnector {
    fn connect(&self, _region: &RegionConfig) -> BucketshipResult<Arc<dyn ObjectStore>> {
        let store: Arc<dyn ObjectStore> = self.0.clone();
        Ok(store)
    }
}

/// Preflight probe that echoes the origin back, or answers with nothing.
pub struct EchoProbe {
    pub allow: bool,
}

impl PreflightProbe for EchoProbe {
    fn preflight(&self, _url: &str, origin: &str) -> Result<PreflightResponse, String> {
        Ok(PreflightResponse {
            status: 200,
            allow_origin: self.allow.then(|| origin.to_string()),
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
pub struct RecordingSink(Mutex<Vec<DeployEvent>>);

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
