//! Error types for Bucketship
//!
//! Library code returns [`BucketshipError`]; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Bucketship operations
pub type BucketshipResult<T> = Result<T, BucketshipError>;

/// Main error type for Bucketship operations
#[derive(Error, Debug)]
pub enum BucketshipError {
    /// Bucket name failed validation before any network call
    #[error("invalid bucket name '{name}': {reason}")]
    InvalidBucketName { name: String, reason: String },

    /// Region identifier not present in the catalog
    #[error("unknown region '{region}' (available: {})", .available.join(", "))]
    UnknownRegion {
        region: String,
        available: Vec<String>,
    },

    /// Custom region endpoint is not an https URL
    #[error("invalid endpoint '{endpoint}': must start with https://")]
    InvalidEndpoint { endpoint: String },

    /// Custom provider region code contains unsupported characters
    #[error("invalid region code '{code}': only alphanumerics, '-' and '_' are allowed")]
    InvalidRegionCode { code: String },

    /// Local source path does not exist
    #[error("source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// CORS settings violate a value constraint
    #[error("invalid CORS settings: {0}")]
    InvalidCorsSettings(String),

    /// Environment name is not one of the known environments
    #[error("unknown environment '{name}' (known: {})", .known.join(", "))]
    UnknownEnvironment { name: String, known: Vec<String> },

    /// No credential source produced a usable key pair
    #[error("no credentials found (searched: {})", .searched.join(", "))]
    NoCredentials { searched: Vec<String> },

    /// Credentials were found but are malformed
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Storage provider call failed
    #[error("{operation} failed: {message}")]
    Provider { operation: String, message: String },

    /// Bucket exists but the credentials may not access it
    #[error("access to bucket '{bucket}' is forbidden")]
    BucketForbidden { bucket: String },

    /// Settings file could not be parsed
    #[error("invalid config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Interactive prompt could not be read
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
