//! Bucketship - environment-aware deployments to S3-compatible object storage
//!
//! Bucketship publishes a local build directory to a per-environment bucket,
//! configures static website hosting and CORS, and gates risky environments
//! behind confirmation prompts and dry-run previews.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    CleanupUseCase, DeployOptions, DeployUseCase, MultiEnvironmentCoordinator, TrackedBuckets,
};
pub use config::{Config, CredentialChain};
pub use domain::entities::{DeployKind, DeployOutcome, DeploymentResult, Environment, EnvironmentConfig};
pub use domain::value_objects::{BucketName, CorsSettings, Credentials, RegionCatalog, RegionConfig};
pub use error::{BucketshipError, BucketshipResult};
