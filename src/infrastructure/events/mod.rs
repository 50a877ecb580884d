//! Event Sink Implementations
//!
//! Provides concrete implementations of DeployEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - LogEventSink: structured `tracing` records
//!
//! The terminal renderer lives in the binary's `ui` layer and forwards
//! to a `LogEventSink`.

mod json;
mod log;

pub use json::{event_to_json, JsonEventSink};
pub use log::LogEventSink;
