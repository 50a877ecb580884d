//! Deploy Options

use std::path::PathBuf;

use crate::domain::entities::{DeployKind, EnvironmentConfig};
use crate::domain::ports::WebsiteDocuments;
use crate::domain::services::CorsPolicyKind;
use crate::domain::value_objects::{BucketName, CorsSettings, RegionConfig};
use crate::error::BucketshipResult;

/// Asked before anything happens when the environment requires confirmation
pub const DEPLOY_PROMPT: &str = "Proceed with deployment? (y/N)";

/// Asked after a dry-run preview
pub const PROCEED_PROMPT: &str = "Proceed with actual deployment? (y/N)";

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Resolved environment settings
    pub config: EnvironmentConfig,
    /// File or directory to publish
    pub source: PathBuf,
    /// Decides bucket suffix, layout and default CORS
    pub kind: DeployKind,
    /// Replaces the `{prefix}-{kind}` bucket name
    pub bucket_name: Option<String>,
    /// Prepended to every remote key
    pub destination_prefix: String,
    /// Leave the bucket's CORS configuration untouched
    pub skip_cors: bool,
    /// Overrides the environment's `dry_run_first`
    pub dry_run: Option<bool>,
    /// Replaces the CORS settings derived from `kind`
    pub cors: Option<CorsSettings>,
    pub website: WebsiteDocuments,
}

impl DeployOptions {
    pub fn new(config: EnvironmentConfig, source: impl Into<PathBuf>) -> Self {
        Self {
            config,
            source: source.into(),
            kind: DeployKind::Frontend,
            bucket_name: None,
            destination_prefix: String::new(),
            skip_cors: false,
            dry_run: None,
            cors: None,
            website: WebsiteDocuments::default(),
        }
    }

    pub fn with_kind(mut self, kind: DeployKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_bucket_name(mut self, name: impl Into<String>) -> Self {
        self.bucket_name = Some(name.into());
        self
    }

    pub fn with_destination_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.destination_prefix = prefix.into();
        self
    }

    pub fn with_skip_cors(mut self, skip: bool) -> Self {
        self.skip_cors = skip;
        self
    }

    pub fn with_dry_run(mut self, dry_run: Option<bool>) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_cors(mut self, settings: CorsSettings) -> Self {
        self.cors = Some(settings);
        self
    }

    pub fn with_website_documents(mut self, documents: WebsiteDocuments) -> Self {
        self.website = documents;
        self
    }

    /// Explicit name if given, otherwise `{prefix}-{kind}`
    pub fn bucket(&self) -> BucketshipResult<BucketName> {
        match &self.bucket_name {
            Some(name) => BucketName::parse(name),
            None => BucketName::with_suffix(&self.config.bucket_prefix, self.kind.bucket_suffix()),
        }
    }

    pub fn preview_first(&self) -> bool {
        self.dry_run.unwrap_or(self.config.dry_run_first)
    }

    pub fn static_website(&self) -> bool {
        self.kind.static_website(&self.config)
    }

    pub fn cors_kind(&self, bucket: &BucketName, region: &RegionConfig) -> CorsPolicyKind {
        self.kind.cors_kind(&self.config, bucket, region)
    }

    /// Settings `bucket` receives; explicit settings win over the kind's.
    pub fn cors_settings_for(&self, bucket: &BucketName, region: &RegionConfig) -> CorsSettings {
        match &self.cors {
            Some(settings) => settings.clone(),
            None => self.cors_kind(bucket, region).settings(),
        }
    }

    /// Settings for the bucket and region these options resolve to
    pub fn cors_settings(&self) -> BucketshipResult<CorsSettings> {
        let bucket = self.bucket()?;
        let region = self.config.region_config()?;
        Ok(self.cors_settings_for(&bucket, &region))
    }
}
