//! Domain Services
//!
//! Stateless computations over value objects. Nothing here performs I/O.

pub mod cors_presets;
pub mod url_generator;

pub use cors_presets::{derive_for_bucket, CorsPolicyKind, EnvironmentCorsSet, FrameworkTemplate};
pub use url_generator::{bucket_base_url, direct_url, file_urls, website_url, FileUrls};
