//! HTTP adapters

mod preflight;

pub use preflight::{HttpPreflightProbe, PREFLIGHT_TIMEOUT};
