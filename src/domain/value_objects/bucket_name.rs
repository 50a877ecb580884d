//! Bucket Name Value Object
//!
//! A validated bucket name. Construction is the only place where naming rules
//! are checked, so every `BucketName` that reaches a storage call is valid.

use std::fmt;

use serde::Serialize;

use crate::error::{BucketshipError, BucketshipResult};

/// Validated, lower-cased bucket name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BucketName(String);

impl BucketName {
    pub const MIN_LEN: usize = 3;
    pub const MAX_LEN: usize = 63;

    /// Validate and normalize a candidate name.
    ///
    /// Surrounding whitespace is trimmed and the result is lower-cased.
    /// Only ASCII alphanumerics, `-` and `_` are accepted.
    pub fn parse(candidate: &str) -> BucketshipResult<Self> {
        let trimmed = candidate.trim();
        let invalid = |reason: &str| BucketshipError::InvalidBucketName {
            name: candidate.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("name is empty"));
        }

        let len = trimmed.chars().count();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            return Err(invalid("must be 3-63 characters"));
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(invalid(&format!("character '{}' is not allowed", bad)));
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Bucket name derived from an environment prefix and a deployment suffix
    pub fn with_suffix(prefix: &str, suffix: &str) -> BucketshipResult<Self> {
        Self::parse(&format!("{}-{}", prefix, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when this bucket belongs to the given environment prefix
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(&prefix.to_ascii_lowercase())
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BucketName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for BucketName {
    type Err = BucketshipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
