//! Tracing Event Sink
//!
//! Turns deploy events into `tracing` records so `-v` runs and library
//! consumers see progress without a terminal renderer.

use crate::domain::ports::{DeployEvent, DeployEventSink};

/// Event sink that logs every event through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink {
    per_file: bool,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self { per_file: true }
    }

    /// Only step and summary events; uploads are not logged one by one
    pub fn summary_only() -> Self {
        Self { per_file: false }
    }
}

impl DeployEventSink for LogEventSink {
    fn on_event(&self, event: DeployEvent) {
        match event {
            DeployEvent::Started {
                environment,
                bucket,
                source,
                dry_run,
            } => tracing::info!(
                environment = %environment,
                bucket = %bucket,
                source = %source.display(),
                dry_run,
                "deploy started"
            ),
            DeployEvent::Planned { local, bucket, key } => tracing::info!(
                local = %local.display(),
                bucket = %bucket,
                key = %key,
                "would upload"
            ),
            DeployEvent::StepStarted { step } => {
                tracing::info!(step = step.as_str(), "step started")
            }
            DeployEvent::StepWarning { step, message } => {
                tracing::warn!(step = step.as_str(), message = %message, "step failed; continuing")
            }
            DeployEvent::FileUploaded { index, total, key } => {
                tracing::debug!(index, total, key = %key, "uploaded")
            }
            DeployEvent::FileFailed { index, key, error } => {
                tracing::warn!(index, key = %key, error = %error, "upload failed")
            }
            DeployEvent::Completed { uploaded, failed } => {
                tracing::info!(uploaded, failed, "deploy finished")
            }
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.per_file
    }
}
