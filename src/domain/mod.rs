//! Domain Layer
//!
//! Deployment rules without network or file system access.
//!
//! ## Structure
//!
//! - `value_objects/` - Validated values (BucketName, RegionConfig, CorsSettings, Credentials)
//! - `entities/` - Environment configuration, deployment results, bucket listings
//! - `services/` - CORS presets and URL generation
//! - `ports/` - Interfaces implemented by infrastructure (object store, preflight, prompts, events)

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
