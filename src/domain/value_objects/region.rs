//! Region Catalog
//!
//! Static table of storage regions. Every entry follows the provider's
//! `s3.{code}` / `s3-website.{code}` naming.

use std::fmt;

use serde::Serialize;

use crate::error::{BucketshipError, BucketshipResult};

/// Region used when nothing else is configured
pub const DEFAULT_REGION: &str = "EU-WEST-PAR";

const PROVIDER_DOMAIN: &str = "io.cloud.ovh.net";

/// (identifier, provider region code, description)
const BUILTIN_REGIONS: &[(&str, &str, &str)] = &[
    ("EU-WEST-PAR", "eu-west-par", "Europe (France - Paris)"),
    ("GRA", "gra", "Europe (France - Gravelines)"),
    ("RBX", "rbx", "Europe (France - Roubaix)"),
    ("SBG", "sbg", "Europe (France - Strasbourg)"),
    ("DE", "de", "Europe (Germany - Frankfurt)"),
    ("UK", "uk", "Europe (United Kingdom - London)"),
    ("WAW", "waw", "Europe (Poland - Warsaw)"),
    ("BHS", "bhs", "North America (Canada - Beauharnois)"),
    ("CA-EAST-TOR", "ca-east-tor", "North America (Canada - Toronto)"),
    ("SGP", "sgp", "Asia-Pacific (Singapore)"),
    ("AP-SOUTHEAST-SYD", "ap-southeast-syd", "Asia-Pacific (Australia - Sydney)"),
    ("AP-SOUTH-MUM", "ap-south-mum", "Asia-Pacific (India - Mumbai)"),
];

/// Connection details for one storage region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionConfig {
    id: String,
    endpoint: String,
    website_suffix: String,
    region_code: String,
    description: String,
}

impl RegionConfig {
    /// Build a region outside the catalog (e.g. a private endpoint).
    pub fn custom(
        id: impl Into<String>,
        endpoint: impl Into<String>,
        website_suffix: impl Into<String>,
        region_code: impl Into<String>,
        description: impl Into<String>,
    ) -> BucketshipResult<Self> {
        let endpoint = endpoint.into();
        let region_code = region_code.into();

        if !endpoint.starts_with("https://") {
            return Err(BucketshipError::InvalidEndpoint { endpoint });
        }
        if region_code.is_empty()
            || !region_code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(BucketshipError::InvalidRegionCode { code: region_code });
        }

        Ok(Self {
            id: id.into(),
            endpoint,
            website_suffix: website_suffix.into(),
            region_code,
            description: description.into(),
        })
    }

    fn builtin(id: &str, code: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            endpoint: format!("https://s3.{}.{}", code, PROVIDER_DOMAIN),
            website_suffix: format!("s3-website.{}.{}", code, PROVIDER_DOMAIN),
            region_code: code.to_string(),
            description: description.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Endpoint without its scheme, e.g. `s3.gra.io.cloud.ovh.net`
    pub fn endpoint_host(&self) -> &str {
        self.endpoint
            .strip_prefix("https://")
            .unwrap_or(&self.endpoint)
            .trim_end_matches('/')
    }

    pub fn website_suffix(&self) -> &str {
        &self.website_suffix
    }

    pub fn region_code(&self) -> &str {
        &self.region_code
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for RegionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.description)
    }
}

/// Lookup table over the built-in regions
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionCatalog;

impl RegionCatalog {
    /// Resolve a region identifier (case-insensitive).
    pub fn get(id: &str) -> BucketshipResult<RegionConfig> {
        let wanted = id.trim();
        BUILTIN_REGIONS
            .iter()
            .find(|(rid, _, _)| rid.eq_ignore_ascii_case(wanted))
            .map(|(rid, code, desc)| RegionConfig::builtin(rid, code, desc))
            .ok_or_else(|| BucketshipError::UnknownRegion {
                region: id.to_string(),
                available: Self::ids().map(str::to_string).collect(),
            })
    }

    pub fn default_region() -> RegionConfig {
        let (id, code, desc) = BUILTIN_REGIONS[0];
        RegionConfig::builtin(id, code, desc)
    }

    pub fn ids() -> impl Iterator<Item = &'static str> {
        BUILTIN_REGIONS.iter().map(|(id, _, _)| *id)
    }

    pub fn all() -> Vec<RegionConfig> {
        BUILTIN_REGIONS
            .iter()
            .map(|(id, code, desc)| RegionConfig::builtin(id, code, desc))
            .collect()
    }

    pub fn is_known(id: &str) -> bool {
        Self::ids().any(|rid| rid.eq_ignore_ascii_case(id.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_twelve_regions_with_default_first() {
        assert_eq!(RegionCatalog::all().len(), 12);
        assert_eq!(RegionCatalog::default_region().id(), DEFAULT_REGION);
    }

    #[test]
    fn get_builds_endpoint_and_website_suffix_from_code() {
        let gra = RegionCatalog::get("GRA").unwrap();
        assert_eq!(gra.endpoint(), "https://s3.gra.io.cloud.ovh.net");
        assert_eq!(gra.endpoint_host(), "s3.gra.io.cloud.ovh.net");
        assert_eq!(gra.website_suffix(), "s3-website.gra.io.cloud.ovh.net");
        assert_eq!(gra.region_code(), "gra");
    }

    #[test]
    fn get_is_case_insensitive() {
        let par = RegionCatalog::get("eu-west-par").unwrap();
        assert_eq!(par.id(), "EU-WEST-PAR");
        assert_eq!(par.description(), "Europe (France - Paris)");
    }

    #[test]
    fn unknown_region_lists_available() {
        let err = RegionCatalog::get("MOON").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("MOON"));
        assert!(msg.contains("GRA"));
        assert!(msg.contains("AP-SOUTH-MUM"));
    }

    #[test]
    fn custom_region_requires_https() {
        let err =
            RegionConfig::custom("X", "http://s3.local", "web.local", "x", "Local").unwrap_err();
        assert!(matches!(err, BucketshipError::InvalidEndpoint { .. }));
    }

    #[test]
    fn custom_region_rejects_bad_code() {
        let err =
            RegionConfig::custom("X", "https://s3.local", "web.local", "x.y", "Local").unwrap_err();
        assert!(matches!(err, BucketshipError::InvalidRegionCode { .. }));
    }

    #[test]
    fn custom_region_host_strips_trailing_slash() {
        let region =
            RegionConfig::custom("X", "https://s3.local/", "web.local", "x_1", "Local").unwrap();
        assert_eq!(region.endpoint_host(), "s3.local");
    }
}
