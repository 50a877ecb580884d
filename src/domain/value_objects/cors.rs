//! CORS Value Objects
//!
//! `CorsSettings` is what callers compute; `CorsPolicy` is the wire-ready
//! rule shape sent to the storage provider.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BucketshipError, BucketshipResult};

/// Cross-origin rules for one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub expose_headers: Vec<String>,
    pub max_age: u32,
}

impl CorsSettings {
    /// Build settings from caller input.
    ///
    /// Origins are kept verbatim, including duplicates.
    pub fn new(
        allowed_origins: Vec<String>,
        allowed_methods: Vec<String>,
        allowed_headers: Vec<String>,
        expose_headers: Vec<String>,
        max_age: u32,
    ) -> BucketshipResult<Self> {
        if allowed_origins.is_empty() {
            return Err(BucketshipError::InvalidCorsSettings(
                "at least one allowed origin is required".to_string(),
            ));
        }
        if allowed_methods.is_empty() {
            return Err(BucketshipError::InvalidCorsSettings(
                "at least one allowed method is required".to_string(),
            ));
        }
        Ok(Self {
            allowed_origins,
            allowed_methods,
            allowed_headers,
            expose_headers,
            max_age,
        })
    }

    pub fn allows_origin(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == "*" || o == origin)
    }
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: strings(&["http://localhost:8000", "http://127.0.0.1:8000"]),
            allowed_methods: strings(&["GET", "HEAD"]),
            allowed_headers: strings(&["*"]),
            expose_headers: strings(&["ETag", "Content-Length", "Content-Type"]),
            max_age: 3600,
        }
    }
}

/// Provider-facing CORS rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CorsPolicy {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub expose_headers: Vec<String>,
    pub max_age_seconds: u32,
}

impl From<&CorsSettings> for CorsPolicy {
    fn from(settings: &CorsSettings) -> Self {
        Self {
            allowed_origins: settings.allowed_origins.clone(),
            allowed_methods: settings.allowed_methods.clone(),
            allowed_headers: settings.allowed_headers.clone(),
            expose_headers: settings.expose_headers.clone(),
            max_age_seconds: settings.max_age,
        }
    }
}

/// Name of a CORS preset as stored in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorsPreset {
    WebsiteHosting,
    ApiAssets,
    CdnAssets,
    Development,
    SecureApi,
    MobileAppAssets,
    /// Derived from the bucket's own addresses
    Auto,
}

impl CorsPreset {
    pub const ALL: [CorsPreset; 7] = [
        CorsPreset::WebsiteHosting,
        CorsPreset::ApiAssets,
        CorsPreset::CdnAssets,
        CorsPreset::Development,
        CorsPreset::SecureApi,
        CorsPreset::MobileAppAssets,
        CorsPreset::Auto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CorsPreset::WebsiteHosting => "website_hosting",
            CorsPreset::ApiAssets => "api_assets",
            CorsPreset::CdnAssets => "cdn_assets",
            CorsPreset::Development => "development",
            CorsPreset::SecureApi => "secure_api",
            CorsPreset::MobileAppAssets => "mobile_app_assets",
            CorsPreset::Auto => "auto",
        }
    }
}

impl fmt::Display for CorsPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorsPreset {
    type Err = BucketshipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "website" | "website_hosting" => Ok(CorsPreset::WebsiteHosting),
            "api" | "api_assets" => Ok(CorsPreset::ApiAssets),
            "cdn" | "cdn_assets" => Ok(CorsPreset::CdnAssets),
            "dev" | "development" => Ok(CorsPreset::Development),
            "secure_api" => Ok(CorsPreset::SecureApi),
            "mobile" | "mobile_app_assets" => Ok(CorsPreset::MobileAppAssets),
            "auto" | "bucket" => Ok(CorsPreset::Auto),
            _ => Err(BucketshipError::InvalidCorsSettings(format!(
                "unknown CORS type '{}' (expected one of: {})",
                s,
                CorsPreset::ALL
                    .iter()
                    .map(CorsPreset::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
