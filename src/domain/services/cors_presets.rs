//! CORS Presets
//!
//! Each policy kind is a pure function of its own parameters. Explicit kinds
//! keep caller-supplied origins verbatim; only [`derive_for_bucket`] sorts
//! and deduplicates.

use std::collections::BTreeSet;

use crate::domain::value_objects::{strings, BucketName, CorsPreset, CorsSettings, RegionConfig};

/// Ports opened by the development preset when none are given
pub const DEFAULT_DEV_PORTS: [u16; 5] = [3000, 3001, 8000, 8080, 9000];

/// A CORS policy kind together with the parameters it needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicyKind {
    WebsiteHosting,
    ApiAssets { domains: Vec<String> },
    CdnAssets,
    Development { ports: Vec<u16> },
    SecureApi { domains: Vec<String> },
    MobileAppAssets { domains: Vec<String> },
    BucketDerived {
        bucket: BucketName,
        region: RegionConfig,
        extra_origins: Vec<String>,
    },
}

impl CorsPolicyKind {
    /// The kind named by `preset` for `bucket`.
    ///
    /// `domains` feed the kinds that take any. Extra origins only make sense
    /// next to the bucket's own addresses, so any of them (or the `auto`
    /// preset) selects [`CorsPolicyKind::BucketDerived`], which then also
    /// carries `domains`.
    pub fn for_bucket(
        preset: CorsPreset,
        domains: &[String],
        extra_origins: &[String],
        bucket: &BucketName,
        region: &RegionConfig,
    ) -> Self {
        if preset == CorsPreset::Auto || !extra_origins.is_empty() {
            let mut origins = domains.to_vec();
            origins.extend(extra_origins.iter().cloned());
            return CorsPolicyKind::BucketDerived {
                bucket: bucket.clone(),
                region: region.clone(),
                extra_origins: origins,
            };
        }

        match preset {
            CorsPreset::WebsiteHosting => CorsPolicyKind::WebsiteHosting,
            CorsPreset::ApiAssets => CorsPolicyKind::ApiAssets {
                domains: domains.to_vec(),
            },
            CorsPreset::CdnAssets => CorsPolicyKind::CdnAssets,
            CorsPreset::Development => CorsPolicyKind::Development {
                ports: DEFAULT_DEV_PORTS.to_vec(),
            },
            CorsPreset::SecureApi => CorsPolicyKind::SecureApi {
                domains: domains.to_vec(),
            },
            CorsPreset::MobileAppAssets => CorsPolicyKind::MobileAppAssets {
                domains: domains.to_vec(),
            },
            CorsPreset::Auto => CorsPolicyKind::BucketDerived {
                bucket: bucket.clone(),
                region: region.clone(),
                extra_origins: domains.to_vec(),
            },
        }
    }

    pub fn preset(&self) -> CorsPreset {
        match self {
            CorsPolicyKind::WebsiteHosting => CorsPreset::WebsiteHosting,
            CorsPolicyKind::ApiAssets { .. } => CorsPreset::ApiAssets,
            CorsPolicyKind::CdnAssets => CorsPreset::CdnAssets,
            CorsPolicyKind::Development { .. } => CorsPreset::Development,
            CorsPolicyKind::SecureApi { .. } => CorsPreset::SecureApi,
            CorsPolicyKind::MobileAppAssets { .. } => CorsPreset::MobileAppAssets,
            CorsPolicyKind::BucketDerived { .. } => CorsPreset::Auto,
        }
    }

    pub fn settings(&self) -> CorsSettings {
        match self {
            CorsPolicyKind::WebsiteHosting => website_hosting(),
            CorsPolicyKind::ApiAssets { domains } => api_assets(domains),
            CorsPolicyKind::CdnAssets => cdn_assets(),
            CorsPolicyKind::Development { ports } => development(ports),
            CorsPolicyKind::SecureApi { domains } => secure_api(domains),
            CorsPolicyKind::MobileAppAssets { domains } => mobile_app_assets(domains),
            CorsPolicyKind::BucketDerived {
                bucket,
                region,
                extra_origins,
            } => derive_for_bucket(bucket, region, extra_origins),
        }
    }
}

pub fn website_hosting() -> CorsSettings {
    CorsSettings {
        allowed_origins: strings(&["*"]),
        allowed_methods: strings(&["GET", "HEAD"]),
        allowed_headers: strings(&["*"]),
        expose_headers: strings(&["ETag", "Content-Length", "Content-Type"]),
        max_age: 86_400,
    }
}

pub fn api_assets(domains: &[String]) -> CorsSettings {
    CorsSettings {
        allowed_origins: domains.to_vec(),
        allowed_methods: strings(&["GET", "HEAD", "POST", "PUT"]),
        allowed_headers: strings(&[
            "Authorization",
            "Content-Type",
            "X-API-Key",
            "X-Requested-With",
            "Accept",
            "Origin",
        ]),
        expose_headers: strings(&[
            "ETag",
            "Content-Length",
            "Content-Type",
            "X-RateLimit-Remaining",
        ]),
        max_age: 3_600,
    }
}

pub fn cdn_assets() -> CorsSettings {
    CorsSettings {
        allowed_origins: strings(&["*"]),
        allowed_methods: strings(&["GET", "HEAD"]),
        allowed_headers: strings(&["Range", "If-Modified-Since", "If-None-Match", "Accept"]),
        expose_headers: strings(&[
            "Content-Length",
            "Content-Type",
            "Last-Modified",
            "ETag",
            "Accept-Ranges",
        ]),
        max_age: 604_800,
    }
}

pub fn development(ports: &[u16]) -> CorsSettings {
    const HOSTS: [&str; 4] = [
        "http://localhost",
        "http://127.0.0.1",
        "https://localhost",
        "https://127.0.0.1",
    ];

    let mut origins = strings(&HOSTS);
    for port in ports {
        origins.extend(HOSTS.iter().map(|host| format!("{}:{}", host, port)));
    }

    CorsSettings {
        allowed_origins: origins,
        allowed_methods: strings(&["GET", "HEAD", "POST", "PUT", "DELETE", "OPTIONS", "PATCH"]),
        allowed_headers: strings(&["*"]),
        expose_headers: strings(&["*"]),
        max_age: 300,
    }
}

pub fn secure_api(domains: &[String]) -> CorsSettings {
    CorsSettings {
        allowed_origins: domains.to_vec(),
        allowed_methods: strings(&["GET", "HEAD"]),
        allowed_headers: strings(&[
            "Authorization",
            "Content-Type",
            "X-CSRF-Token",
            "X-Requested-With",
        ]),
        expose_headers: strings(&["Content-Type", "Content-Length"]),
        max_age: 600,
    }
}

pub fn mobile_app_assets(domains: &[String]) -> CorsSettings {
    let mut origins = domains.to_vec();
    origins.extend(strings(&[
        "http://localhost",
        "https://localhost",
        "file://",
        "ionic://localhost",
        "http://localhost:8100",
        "capacitor://localhost",
    ]));

    CorsSettings {
        allowed_origins: origins,
        allowed_methods: strings(&["GET", "HEAD", "POST"]),
        allowed_headers: strings(&[
            "Content-Type",
            "Authorization",
            "X-Requested-With",
            "Accept",
            "Origin",
            "User-Agent",
        ]),
        expose_headers: strings(&["Content-Length", "Content-Type", "ETag"]),
        max_age: 7_200,
    }
}

/// Settings derived from a bucket's own addresses.
///
/// Starts from the default local origins, appends `extra_origins`, then the
/// bucket's direct and website origins; the final list is sorted and
/// deduplicated.
pub fn derive_for_bucket(
    bucket: &BucketName,
    region: &RegionConfig,
    extra_origins: &[String],
) -> CorsSettings {
    let base = CorsSettings::default();

    let mut origins: BTreeSet<String> = base.allowed_origins.iter().cloned().collect();
    origins.extend(extra_origins.iter().cloned());
    origins.insert(format!("https://{}.{}", bucket, region.endpoint_host()));
    origins.insert(format!("https://{}.{}", bucket, region.website_suffix()));

    CorsSettings {
        allowed_origins: origins.into_iter().collect(),
        ..base
    }
}

/// Front-end framework whose dev server ports differ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkTemplate {
    React,
    Vue,
    StaticSite,
}

/// Development, staging and production settings for one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentCorsSet {
    pub development: CorsSettings,
    pub staging: CorsSettings,
    pub production: CorsSettings,
}

impl FrameworkTemplate {
    pub fn settings_for(&self, domain: &str) -> EnvironmentCorsSet {
        let domain = domain.trim_start_matches("https://").trim_end_matches('/');
        match self {
            FrameworkTemplate::React | FrameworkTemplate::Vue => {
                let ports: &[u16] = if *self == FrameworkTemplate::React {
                    &[3000, 3001]
                } else {
                    &[8080, 8081]
                };
                EnvironmentCorsSet {
                    development: development(ports),
                    staging: api_assets(&[format!("https://staging.{}", domain)]),
                    production: api_assets(&[
                        format!("https://{}", domain),
                        format!("https://www.{}", domain),
                    ]),
                }
            }
            FrameworkTemplate::StaticSite => EnvironmentCorsSet {
                development: development(&[4000, 1313]),
                staging: website_hosting(),
                production: website_hosting(),
            },
        }
    }
}
