//! Environment Configuration
//!
//! Each named environment resolves to one immutable [`EnvironmentConfig`]:
//! built-in defaults, then environment variables, then explicit overrides.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::services::CorsPolicyKind;
use crate::domain::value_objects::{
    BucketName, CorsPreset, RegionCatalog, RegionConfig, DEFAULT_REGION,
};
use crate::error::{BucketshipError, BucketshipResult};

/// Named deployment target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Every environment, in rollout order
    pub const ALL: [Environment; 3] = [
        Environment::Development,
        Environment::Staging,
        Environment::Production,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Prefix of the environment variables that configure this environment
    pub fn var_prefix(&self) -> &'static str {
        match self {
            Environment::Development => "DEV",
            Environment::Staging => "STAGING",
            Environment::Production => "PROD",
        }
    }

    /// Phrase the user must type to delete this environment's buckets
    pub fn deletion_phrase(&self) -> String {
        format!("DELETE-{}", self.as_str())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = BucketshipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(BucketshipError::UnknownEnvironment {
                name: s.to_string(),
                known: Environment::ALL.iter().map(|e| e.to_string()).collect(),
            }),
        }
    }
}

/// Resolved settings for one environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentConfig {
    pub environment: Environment,
    pub bucket_prefix: String,
    pub region: String,
    pub cors: CorsPreset,
    pub domains: Vec<String>,
    /// Origins allowed next to the bucket's own addresses
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_origins: Vec<String>,
    pub static_website: bool,
    pub require_confirmation: bool,
    pub dry_run_first: bool,
}

/// Optional replacements merged over an [`EnvironmentConfig`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentOverrides {
    pub bucket_prefix: Option<String>,
    pub region: Option<String>,
    pub cors: Option<CorsPreset>,
    /// Replaces the domain list
    pub domains: Option<Vec<String>>,
    /// Origins allowed next to the bucket's own addresses
    pub extra_origins: Vec<String>,
    pub static_website: Option<bool>,
    pub require_confirmation: Option<bool>,
    pub dry_run_first: Option<bool>,
}

impl EnvironmentOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl EnvironmentConfig {
    /// Built-in defaults, ignoring the process environment
    pub fn builtin(environment: Environment) -> Self {
        match environment {
            Environment::Development => Self {
                environment,
                bucket_prefix: "myapp-dev".to_string(),
                region: DEFAULT_REGION.to_string(),
                cors: CorsPreset::Development,
                domains: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:8080".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                    "http://127.0.0.1:8080".to_string(),
                ],
                extra_origins: Vec::new(),
                static_website: true,
                require_confirmation: false,
                dry_run_first: false,
            },
            Environment::Staging => Self {
                environment,
                bucket_prefix: "myapp-staging".to_string(),
                region: DEFAULT_REGION.to_string(),
                cors: CorsPreset::ApiAssets,
                domains: vec!["https://staging.myapp.com".to_string()],
                extra_origins: Vec::new(),
                static_website: true,
                require_confirmation: true,
                dry_run_first: true,
            },
            Environment::Production => Self {
                environment,
                bucket_prefix: "myapp-prod".to_string(),
                region: "GRA".to_string(),
                cors: CorsPreset::ApiAssets,
                domains: vec![
                    "https://myapp.com".to_string(),
                    "https://www.myapp.com".to_string(),
                ],
                extra_origins: Vec::new(),
                static_website: true,
                require_confirmation: true,
                dry_run_first: true,
            },
        }
    }

    /// Defaults for a named environment; unknown names are fatal.
    pub fn for_name(
        name: &str,
        get_env: impl Fn(&str) -> Option<String>,
    ) -> BucketshipResult<Self> {
        let environment: Environment = name.parse()?;
        Ok(Self::builtin(environment).with_env(get_env))
    }

    /// Apply `{PREFIX}_BUCKET_PREFIX`, `{PREFIX}_REGION` and the domain variables.
    pub fn with_env(mut self, get_env: impl Fn(&str) -> Option<String>) -> Self {
        let prefix = self.environment.var_prefix();
        let non_empty = |key: String| get_env(&key).filter(|v| !v.trim().is_empty());

        if let Some(bucket_prefix) = non_empty(format!("{}_BUCKET_PREFIX", prefix)) {
            self.bucket_prefix = bucket_prefix;
        }
        if let Some(region) = non_empty(format!("{}_REGION", prefix)) {
            self.region = region;
        }

        match self.environment {
            Environment::Development => {}
            Environment::Staging => {
                if let Some(domain) = non_empty("STAGING_DOMAIN".to_string()) {
                    self.domains = vec![domain];
                }
            }
            Environment::Production => {
                for (slot, key) in ["PROD_DOMAIN", "PROD_WWW_DOMAIN"].into_iter().enumerate() {
                    if let Some(domain) = non_empty(key.to_string()) {
                        match self.domains.get_mut(slot) {
                            Some(existing) => *existing = domain,
                            None => self.domains.push(domain),
                        }
                    }
                }
            }
        }
        self
    }

    /// Merge explicit overrides; `extra_origins` accumulate.
    pub fn with_overrides(mut self, overrides: &EnvironmentOverrides) -> Self {
        if let Some(prefix) = &overrides.bucket_prefix {
            self.bucket_prefix = prefix.clone();
        }
        if let Some(region) = &overrides.region {
            self.region = region.clone();
        }
        if let Some(cors) = overrides.cors {
            self.cors = cors;
        }
        if let Some(domains) = &overrides.domains {
            self.domains = domains.clone();
        }
        self.extra_origins
            .extend(overrides.extra_origins.iter().cloned());
        if let Some(flag) = overrides.static_website {
            self.static_website = flag;
        }
        if let Some(flag) = overrides.require_confirmation {
            self.require_confirmation = flag;
        }
        if let Some(flag) = overrides.dry_run_first {
            self.dry_run_first = flag;
        }
        self
    }

    pub fn region_config(&self) -> BucketshipResult<RegionConfig> {
        RegionCatalog::get(&self.region)
    }

    /// CORS policy kind this environment gives `bucket`
    pub fn cors_kind(&self, bucket: &BucketName, region: &RegionConfig) -> CorsPolicyKind {
        self.cors_kind_with(self.cors, bucket, region)
    }

    fn cors_kind_with(
        &self,
        preset: CorsPreset,
        bucket: &BucketName,
        region: &RegionConfig,
    ) -> CorsPolicyKind {
        CorsPolicyKind::for_bucket(preset, &self.domains, &self.extra_origins, bucket, region)
    }
}

/// What is being deployed; decides bucket suffix, layout and CORS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployKind {
    Frontend,
    Assets,
    Docs,
}

impl DeployKind {
    pub fn bucket_suffix(&self) -> &'static str {
        match self {
            DeployKind::Frontend => "frontend",
            DeployKind::Assets => "assets",
            DeployKind::Docs => "docs",
        }
    }

    pub fn static_website(&self, config: &EnvironmentConfig) -> bool {
        match self {
            DeployKind::Frontend => config.static_website,
            DeployKind::Assets => false,
            DeployKind::Docs => true,
        }
    }

    pub fn cors_preset(&self, config: &EnvironmentConfig) -> CorsPreset {
        match self {
            DeployKind::Frontend => config.cors,
            DeployKind::Assets => CorsPreset::CdnAssets,
            DeployKind::Docs => CorsPreset::WebsiteHosting,
        }
    }

    pub fn cors_kind(
        &self,
        config: &EnvironmentConfig,
        bucket: &BucketName,
        region: &RegionConfig,
    ) -> CorsPolicyKind {
        config.cors_kind_with(self.cors_preset(config), bucket, region)
    }
}

impl fmt::Display for DeployKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bucket_suffix())
    }
}
