//! Domain Entities

mod bucket;
mod deployment;
mod environment;

pub use bucket::{BucketDetails, BucketInfo, BucketStatus};
pub use deployment::{CancelReason, DeployOutcome, DeployState, DeploymentResult};
pub use environment::{DeployKind, Environment, EnvironmentConfig, EnvironmentOverrides};
