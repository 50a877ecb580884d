//! CORS Policy Engine
//!
//! Applies computed settings to a bucket and checks them with live
//! preflight requests. The check is black-box: a failing origin may mean a
//! wrong policy or a misbehaving server, and the two look the same here.

use serde::Serialize;

use crate::domain::entities::EnvironmentConfig;
use crate::domain::ports::{origin_allowed, ObjectStore, PreflightProbe};
use crate::domain::services::{direct_url, CorsPolicyKind};
use crate::domain::value_objects::{BucketName, CorsPolicy, CorsSettings, RegionConfig};

/// Path probed by environment-wide checks
pub const DEFAULT_TEST_PATH: &str = "index.html";

/// Result of one preflight check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorsCheck {
    pub origin: String,
    pub url: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Results for several origins against one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorsTestReport {
    pub bucket: String,
    pub checks: Vec<CorsCheck>,
}

impl CorsTestReport {
    /// An empty report does not pass.
    pub fn all_passed(&self) -> bool {
        !self.checks.is_empty() && self.checks.iter().all(|c| c.passed)
    }

    pub fn failed(&self) -> impl Iterator<Item = &CorsCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

pub struct CorsPolicyEngine<'a> {
    store: &'a dyn ObjectStore,
    probe: &'a dyn PreflightProbe,
    region: &'a RegionConfig,
}

impl<'a> CorsPolicyEngine<'a> {
    pub fn new(
        store: &'a dyn ObjectStore,
        probe: &'a dyn PreflightProbe,
        region: &'a RegionConfig,
    ) -> Self {
        Self {
            store,
            probe,
            region,
        }
    }

    /// Settings for a policy kind
    pub fn compute(&self, kind: &CorsPolicyKind) -> CorsSettings {
        kind.settings()
    }

    /// Send `settings` as the bucket's CORS configuration.
    ///
    /// Returns `false` on any provider failure; the error is logged.
    pub fn apply(&self, bucket: &BucketName, settings: &CorsSettings) -> bool {
        let policy = CorsPolicy::from(settings);
        match self.store.put_bucket_cors(bucket, &policy) {
            Ok(()) => {
                tracing::info!(
                    bucket = %bucket,
                    origins = policy.allowed_origins.len(),
                    max_age = policy.max_age_seconds,
                    "CORS policy applied"
                );
                true
            }
            Err(err) => {
                tracing::warn!(bucket = %bucket, error = %err, "CORS policy not applied");
                false
            }
        }
    }

    /// Preflight `path` on the bucket's direct URL from `origin`.
    pub fn test(&self, bucket: &BucketName, origin: &str, path: &str) -> CorsCheck {
        let url = direct_url(bucket, path, self.region);
        match self.probe.preflight(&url, origin) {
            Ok(response) => {
                let passed = origin_allowed(origin, response.allow_origin.as_deref());
                tracing::debug!(
                    url = %url,
                    origin,
                    status = response.status,
                    passed,
                    "preflight answered"
                );
                CorsCheck {
                    origin: origin.to_string(),
                    url,
                    passed,
                    status: Some(response.status),
                    allow_origin: response.allow_origin,
                    error: None,
                }
            }
            Err(error) => {
                tracing::warn!(url = %url, origin, error = %error, "preflight failed");
                CorsCheck {
                    origin: origin.to_string(),
                    url,
                    passed: false,
                    status: None,
                    allow_origin: None,
                    error: Some(error),
                }
            }
        }
    }

    pub fn test_origins<I, S>(&self, bucket: &BucketName, origins: I, path: &str) -> CorsTestReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        CorsTestReport {
            bucket: bucket.to_string(),
            checks: origins
                .into_iter()
                .map(|origin| self.test(bucket, origin.as_ref(), path))
                .collect(),
        }
    }

    /// Check every configured domain of an environment against `index.html`.
    pub fn test_environment(
        &self,
        bucket: &BucketName,
        config: &EnvironmentConfig,
    ) -> CorsTestReport {
        self.test_origins(bucket, &config.domains, DEFAULT_TEST_PATH)
    }
}
