//! Deploy Event Port
//!
//! Observable progress for deploy operations: terminal rendering,
//! NDJSON streams for CI, or nothing at all.

use std::path::PathBuf;

/// Execution step of a deployment, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStep {
    CreateBucket,
    SyncFiles,
    ConfigureWebsite,
    ApplyCors,
    GenerateUrls,
}

impl DeployStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeployStep::CreateBucket => "create_bucket",
            DeployStep::SyncFiles => "sync_files",
            DeployStep::ConfigureWebsite => "configure_website",
            DeployStep::ApplyCors => "apply_cors",
            DeployStep::GenerateUrls => "generate_urls",
        }
    }
}

/// Event emitted during deploy operations
#[derive(Debug, Clone)]
pub enum DeployEvent {
    /// Deploy started
    Started {
        environment: String,
        bucket: String,
        source: PathBuf,
        dry_run: bool,
    },

    /// Dry-run plan line: the file would be uploaded under `key`
    Planned {
        local: PathBuf,
        bucket: String,
        key: String,
    },

    /// An execution step began
    StepStarted { step: DeployStep },

    /// A non-fatal step failed; deployment continues
    StepWarning { step: DeployStep, message: String },

    /// File uploaded
    FileUploaded {
        index: usize,
        total: usize,
        key: String,
    },

    /// File upload failed; remaining uploads continue
    FileFailed {
        index: usize,
        key: String,
        error: String,
    },

    /// Deploy finished executing
    Completed { uploaded: usize, failed: usize },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: progress lines in the terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Check if this sink wants per-file events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
