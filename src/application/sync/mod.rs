//! File synchronization: planning keys, then uploading them.

mod engine;
mod plan;

pub use engine::{FileSyncEngine, SyncOptions, SyncReport, UploadFailure, DEFAULT_WORKERS};
pub use plan::{plan_sync, plan_sync_excluding, PlannedUpload, SyncPlan, EXCLUDED_NAMES};
