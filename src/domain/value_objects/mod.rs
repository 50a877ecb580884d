//! Domain Value Objects
//!
//! Immutable value types validated at construction.

mod bucket_name;
mod cors;
mod credentials;
mod region;
mod remote_key;

pub use bucket_name::BucketName;
pub use cors::{CorsPolicy, CorsPreset, CorsSettings};
pub(crate) use cors::strings;
pub use credentials::{mask_access_key, Credentials};
pub use region::{RegionCatalog, RegionConfig, DEFAULT_REGION};
pub use remote_key::{clean_key, remote_key};
