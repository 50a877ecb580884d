//! Application Layer
//!
//! Use cases that orchestrate the deployment flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT talk to the network or terminal directly
//! - Coordinates ports provided by Infrastructure
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - One deployment through its states (validate, confirm, preview, execute)
//! - `MultiEnvironmentCoordinator` - Rollout across environments, stopping at the first failure
//! - `CleanupUseCase` - Typed-confirmation bulk deletion
//!
//! ## Services
//!
//! - `FileSyncEngine` - Plan and upload a source tree
//! - `BucketLifecycleManager` - Create, delete, list and probe buckets
//! - `WebsiteConfigurator` - Website hosting and public ACLs
//! - `CorsPolicyEngine` - Apply and live-test CORS policies
//! - `TrackedBuckets` - Run-scoped record of created buckets

pub mod buckets;
pub mod cleanup;
pub mod cors;
pub mod deploy;
pub mod multi_env;
pub mod registry;
pub mod sync;
pub mod website;

#[cfg(test)]
pub(crate) mod testing;

pub use buckets::{today_phrase, BucketLifecycleManager, CreateOutcome, DELETE_BATCH};
pub use cleanup::{CleanupOptions, CleanupResult, CleanupStatus, CleanupUseCase};
pub use cors::{CorsCheck, CorsPolicyEngine, CorsTestReport, DEFAULT_TEST_PATH};
pub use deploy::{DeployOptions, DeployUseCase, DEPLOY_PROMPT, PROCEED_PROMPT};
pub use multi_env::{
    EnvironmentRun, EnvironmentStatus, MultiEnvOptions, MultiEnvReport,
    MultiEnvironmentCoordinator,
};
pub use registry::{CleanupGuard, DrainReport, TrackedBuckets};
pub use sync::{
    plan_sync, FileSyncEngine, PlannedUpload, SyncOptions, SyncPlan, SyncReport, UploadFailure,
};
pub use website::{AclReport, WebsiteConfigurator};
