//! Credentials Value Object

use std::fmt;

use crate::error::{BucketshipError, BucketshipResult};

const MIN_KEY_LEN: usize = 20;

/// Access key pair for the storage provider
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> BucketshipResult<Self> {
        let access_key = access_key.into().trim().to_string();
        let secret_key = secret_key.into().trim().to_string();

        validate_key("access key", &access_key)?;
        validate_key("secret key", &secret_key)?;

        Ok(Self {
            access_key,
            secret_key,
        })
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn masked_access_key(&self) -> String {
        mask_access_key(&self.access_key, 4)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.masked_access_key())
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

fn validate_key(label: &str, value: &str) -> BucketshipResult<()> {
    if value.is_empty() {
        return Err(BucketshipError::InvalidCredentials(format!(
            "{} is empty",
            label
        )));
    }
    if value.chars().count() < MIN_KEY_LEN {
        return Err(BucketshipError::InvalidCredentials(format!(
            "{} must be at least {} characters",
            label, MIN_KEY_LEN
        )));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(BucketshipError::InvalidCredentials(format!(
            "{} contains unsupported characters",
            label
        )));
    }
    Ok(())
}

/// Show the first `visible` characters and star out the rest.
pub fn mask_access_key(key: &str, visible: usize) -> String {
    let len = key.chars().count();
    if len <= visible {
        return "*".repeat(8);
    }
    let head: String = key.chars().take(visible).collect();
    format!("{}{}", head, "*".repeat(len - visible))
}
