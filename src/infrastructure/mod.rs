//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all network and terminal I/O.
//!
//! ## Structure
//!
//! - `storage/` - S3 object store and per-region connector (aws-sdk-s3)
//! - `http/` - CORS preflight probe (reqwest)
//! - `prompt/` - Terminal confirmation prompts (dialoguer)
//! - `events/` - Deploy event sinks (NDJSON, tracing)

pub mod events;
pub mod http;
pub mod prompt;
pub mod storage;

// Re-export for convenience
pub use events::{event_to_json, JsonEventSink, LogEventSink};
pub use http::HttpPreflightProbe;
pub use prompt::{select_confirmer, InteractiveConfirmer};
pub use storage::{S3Connector, S3ObjectStore};
