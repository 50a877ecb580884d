//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Upload workers emit concurrently; one line per event
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Write any JSON value as one line; used for command results
    pub fn emit(&self, value: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", value);
            let _ = writer.flush();
        }
    }
}

/// Map a deploy event to its NDJSON shape
pub fn event_to_json(event: &DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::Started {
            environment,
            bucket,
            source,
            dry_run,
        } => serde_json::json!({
            "event": "start",
            "command": "deploy",
            "environment": environment,
            "bucket": bucket,
            "source": source.display().to_string(),
            "dry_run": dry_run,
        }),

        DeployEvent::Planned { local, bucket, key } => serde_json::json!({
            "event": "planned",
            "command": "deploy",
            "local": local.display().to_string(),
            "bucket": bucket,
            "key": key,
        }),

        DeployEvent::StepStarted { step } => serde_json::json!({
            "event": "step",
            "command": "deploy",
            "step": step.as_str(),
        }),

        DeployEvent::StepWarning { step, message } => serde_json::json!({
            "event": "warning",
            "command": "deploy",
            "step": step.as_str(),
            "message": message,
        }),

        DeployEvent::FileUploaded { index, total, key } => serde_json::json!({
            "event": "item_uploaded",
            "command": "deploy",
            "index": index,
            "total": total,
            "key": key,
        }),

        DeployEvent::FileFailed { index, key, error } => serde_json::json!({
            "event": "item_error",
            "command": "deploy",
            "index": index,
            "key": key,
            "error": error,
        }),

        DeployEvent::Completed { uploaded, failed } => {
            let status = if *failed == 0 { "success" } else { "partial" };
            serde_json::json!({
                "event": "complete",
                "command": "deploy",
                "status": status,
                "uploaded": uploaded,
                "errors": failed,
            })
        }
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.emit(event_to_json(&event));
    }
}
