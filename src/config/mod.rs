//! Configuration module for Bucketship
//!
//! Settings hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (`STAGING_REGION`, `DEPLOY_ENV`, ...)
//! 3. Project config (`./bucketship.toml`)
//! 4. User config (`~/.config/bucketship/config.toml`)
//! 5. Built-in defaults (lowest priority)
//!
//! Credentials are resolved separately by [`CredentialChain`].

mod credentials;
mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use credentials::{parse_ini, CredentialChain, CREDENTIAL_SECTIONS, DEFAULT_CREDENTIAL_FILE};
pub use loader::{
    config_paths, load_or_default_with_warnings, user_config_dir, ConfigWarning,
    PROJECT_CONFIG_FILE,
};
pub use types::{ColorMode, Config, EnvironmentSection, OutputConfig, SyncConfig};
