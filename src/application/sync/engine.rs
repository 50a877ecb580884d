//! File Sync Engine
//!
//! Uploads a [`SyncPlan`] with a bounded pool of worker threads. A failing
//! file is recorded and skipped; the remaining uploads continue.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::plan::{plan_sync_excluding, SyncPlan};
use crate::domain::ports::{CannedAcl, DeployEvent, DeployEventSink, ObjectStore, PutObject};
use crate::domain::value_objects::BucketName;
use crate::error::BucketshipResult;

/// Upload workers used when nothing else is configured
pub const DEFAULT_WORKERS: usize = 4;

/// Options for one sync pass
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub destination_prefix: String,
    /// Flatten keys to file names
    pub static_website: bool,
    /// Plan only; no upload calls
    pub dry_run: bool,
    pub workers: usize,
    /// File or directory names skipped in addition to the built-in ones
    pub exclude: Vec<String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            destination_prefix: String::new(),
            static_website: false,
            dry_run: false,
            workers: DEFAULT_WORKERS,
            exclude: Vec::new(),
        }
    }
}

impl SyncOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.destination_prefix = prefix.into();
        self
    }

    pub fn with_static_website(mut self, static_website: bool) -> Self {
        self.static_website = static_website;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }
}

/// A file that could not be uploaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadFailure {
    pub key: String,
    pub error: String,
}

/// Outcome of a sync pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Files the plan contained
    pub planned: usize,
    /// Keys now present remotely; always empty for a dry run
    pub uploaded: BTreeSet<String>,
    pub failures: Vec<UploadFailure>,
    /// Stopped early because of an interrupt
    pub interrupted: bool,
    pub dry_run: bool,
}

impl SyncReport {
    pub fn uploaded_keys(&self) -> Vec<String> {
        self.uploaded.iter().cloned().collect()
    }

    /// Files were expected but none made it
    pub fn nothing_uploaded(&self) -> bool {
        !self.dry_run && self.planned > 0 && self.uploaded.is_empty()
    }
}

/// Synchronizes a local source into a bucket
pub struct FileSyncEngine<'a> {
    store: &'a dyn ObjectStore,
    interrupt: Option<Arc<AtomicBool>>,
}

impl<'a> FileSyncEngine<'a> {
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self {
            store,
            interrupt: None,
        }
    }

    /// Stop handing out uploads once `flag` is set
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    pub fn sync(
        &self,
        source: &Path,
        bucket: &BucketName,
        options: &SyncOptions,
        events: &dyn DeployEventSink,
    ) -> BucketshipResult<SyncReport> {
        let plan = plan_sync_excluding(
            source,
            &options.destination_prefix,
            options.static_website,
            &options.exclude,
        )?;
        tracing::debug!(
            bucket = %bucket,
            files = plan.len(),
            dry_run = options.dry_run,
            "sync planned"
        );

        if options.dry_run {
            for entry in &plan.entries {
                events.on_event(DeployEvent::Planned {
                    local: entry.local.clone(),
                    bucket: bucket.to_string(),
                    key: entry.key.clone(),
                });
            }
            return Ok(SyncReport {
                planned: plan.len(),
                dry_run: true,
                ..Default::default()
            });
        }

        Ok(self.upload(bucket, &plan, options.workers, events))
    }

    fn upload(
        &self,
        bucket: &BucketName,
        plan: &SyncPlan,
        workers: usize,
        events: &dyn DeployEventSink,
    ) -> SyncReport {
        let total = plan.len();
        let next = AtomicUsize::new(0);
        let report = Mutex::new(SyncReport {
            planned: total,
            ..Default::default()
        });
        let workers = workers.clamp(1, total.max(1));

        std::thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    if self.interrupted() {
                        break;
                    }
                    let index = next.fetch_add(1, Ordering::SeqCst);
                    let Some(entry) = plan.entries.get(index) else {
                        break;
                    };

                    let outcome = self.store.put_object(
                        bucket,
                        PutObject {
                            key: &entry.key,
                            body: &entry.local,
                            content_type: entry.content_type.as_deref(),
                            acl: CannedAcl::PublicRead,
                        },
                    );

                    let mut report = report.lock().unwrap_or_else(|e| e.into_inner());
                    match outcome {
                        Ok(()) => {
                            report.uploaded.insert(entry.key.clone());
                            if events.wants_detailed_events() {
                                events.on_event(DeployEvent::FileUploaded {
                                    index: index + 1,
                                    total,
                                    key: entry.key.clone(),
                                });
                            }
                        }
                        Err(err) => {
                            tracing::warn!(key = %entry.key, error = %err, "upload failed");
                            report.failures.push(UploadFailure {
                                key: entry.key.clone(),
                                error: err.to_string(),
                            });
                            events.on_event(DeployEvent::FileFailed {
                                index: index + 1,
                                key: entry.key.clone(),
                                error: err.to_string(),
                            });
                        }
                    }
                });
            }
        });

        let mut report = report.into_inner().unwrap_or_else(|e| e.into_inner());
        report.failures.sort_by(|a, b| a.key.cmp(&b.key));
        report.interrupted =
            self.interrupted() && report.uploaded.len() + report.failures.len() < total;
        report
    }
}
