//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::application::sync::DEFAULT_WORKERS;
use crate::domain::entities::{Environment, EnvironmentConfig, EnvironmentOverrides};
use crate::domain::value_objects::CorsPreset;
use crate::error::BucketshipResult;

use super::loader::{self, ConfigWarning};

/// `[environments.<name>]` table; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors: Option<CorsPreset>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_website: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_confirmation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run_first: Option<bool>,
}

impl EnvironmentSection {
    pub fn overrides(&self) -> EnvironmentOverrides {
        EnvironmentOverrides {
            bucket_prefix: self.bucket_prefix.clone(),
            region: self.region.clone(),
            cors: self.cors,
            domains: self.domains.clone(),
            extra_origins: Vec::new(),
            static_website: self.static_website,
            require_confirmation: self.require_confirmation,
            dry_run_first: self.dry_run_first,
        }
    }
}

/// Sync configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Parallel uploads per deployment
    #[serde(default)]
    pub workers: Option<usize>,

    /// File or directory names never uploaded
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl SyncConfig {
    pub fn workers(&self) -> usize {
        self.workers.unwrap_or(DEFAULT_WORKERS).max(1)
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Environment used when a command names none
    #[serde(default)]
    pub default_environment: Option<String>,

    /// Keyed by environment name or alias (`dev`, `prod`, ...)
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentSection>,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> BucketshipResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> BucketshipResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Apply `DEPLOY_ENV` and `BUCKETSHIP_WORKERS`
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }

    /// File section for `environment`, whichever alias it was written under
    pub fn section(&self, environment: Environment) -> Option<&EnvironmentSection> {
        self.environments
            .iter()
            .find(|(name, _)| name.parse::<Environment>().ok() == Some(environment))
            .map(|(_, section)| section)
    }

    /// Built-in defaults, then this file's section, then environment variables
    pub fn environment(
        &self,
        environment: Environment,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> EnvironmentConfig {
        let base = EnvironmentConfig::builtin(environment);
        let merged = match self.section(environment) {
            Some(section) => base.with_overrides(&section.overrides()),
            None => base,
        };
        merged.with_env(get_env)
    }

    /// Environment used when none is named; development when unset
    pub fn default_environment(&self) -> BucketshipResult<Environment> {
        match &self.default_environment {
            Some(name) => name.parse(),
            None => Ok(Environment::Development),
        }
    }
}
