//! Credential Source Chain
//!
//! Resolution order:
//! 1. Explicit key pair (command-line)
//! 2. Pair cached by an earlier resolution
//! 3. `AWS_*` then `OVH_*` environment variables
//! 4. `rclone.conf`, first existing candidate path

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::domain::value_objects::Credentials;
use crate::error::{BucketshipError, BucketshipResult};

/// rclone sections holding storage keys, in lookup order
pub const CREDENTIAL_SECTIONS: &[&str] = &["StorageS3", "ovh", "s3"];

pub const DEFAULT_CREDENTIAL_FILE: &str = "rclone.conf";

type GetEnv = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

pub struct CredentialChain {
    config_file: PathBuf,
    config_dir: Option<PathBuf>,
    get_env: GetEnv,
    cache: OnceLock<Credentials>,
}

impl CredentialChain {
    pub fn new() -> Self {
        Self {
            config_file: PathBuf::from(DEFAULT_CREDENTIAL_FILE),
            config_dir: super::loader::user_config_dir(),
            get_env: Box::new(|key| std::env::var(key).ok()),
            cache: OnceLock::new(),
        }
    }

    /// First path searched, instead of `./rclone.conf`
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = path.into();
        self
    }

    /// Replace the user configuration directory
    pub fn with_config_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.config_dir = dir;
        self
    }

    pub fn with_env<F>(mut self, get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.get_env = Box::new(get_env);
        self
    }

    /// Candidate credential files, in search order
    pub fn search_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.config_file.clone()];
        if let Some(dir) = &self.config_dir {
            paths.push(dir.join("rclone").join(DEFAULT_CREDENTIAL_FILE));
        }
        paths.push(PathBuf::from("/etc/rclone").join(DEFAULT_CREDENTIAL_FILE));
        paths
    }

    /// Resolve a key pair.
    ///
    /// An explicit pair is validated and returned as-is; it is never cached.
    pub fn resolve(&self, explicit: Option<(&str, &str)>) -> BucketshipResult<Credentials> {
        if let Some((access_key, secret_key)) = explicit {
            return Credentials::new(access_key, secret_key);
        }
        if let Some(cached) = self.cache.get() {
            return Ok(cached.clone());
        }

        let found = match self.from_env() {
            Some(credentials) => credentials,
            None => self.from_file()?,
        };
        Ok(self.cache.get_or_init(|| found).clone())
    }

    fn from_env(&self) -> Option<Credentials> {
        let lookup = |primary: &str, fallback: &str| {
            (self.get_env)(primary)
                .filter(|v| !v.is_empty())
                .or_else(|| (self.get_env)(fallback).filter(|v| !v.is_empty()))
        };
        let access_key = lookup("AWS_ACCESS_KEY_ID", "OVH_ACCESS_KEY_ID")?;
        let secret_key = lookup("AWS_SECRET_ACCESS_KEY", "OVH_SECRET_ACCESS_KEY")?;

        match Credentials::new(access_key, secret_key) {
            Ok(credentials) => {
                tracing::debug!(access_key = %credentials.masked_access_key(), "credentials from environment");
                Some(credentials)
            }
            Err(err) => {
                tracing::warn!(error = %err, "ignoring invalid credentials in environment");
                None
            }
        }
    }

    fn from_file(&self) -> BucketshipResult<Credentials> {
        let paths = self.search_paths();
        let searched = || {
            let mut searched = vec!["environment".to_string()];
            searched.extend(paths.iter().map(|p| p.display().to_string()));
            searched
        };

        let Some(path) = paths.iter().find(|p| p.is_file()) else {
            return Err(BucketshipError::NoCredentials {
                searched: searched(),
            });
        };
        tracing::info!(path = %path.display(), "reading credentials");

        let sections = parse_ini(&fs::read_to_string(path)?);
        let Some(section) = CREDENTIAL_SECTIONS
            .iter()
            .find_map(|name| sections.get(*name))
        else {
            let mut available: Vec<&str> = sections.keys().map(String::as_str).collect();
            available.sort_unstable();
            tracing::warn!(
                path = %path.display(),
                available = ?available,
                "no storage section in credential file"
            );
            return Err(BucketshipError::NoCredentials {
                searched: searched(),
            });
        };

        match (section.get("access_key_id"), section.get("secret_access_key")) {
            (Some(access_key), Some(secret_key)) => {
                Credentials::new(access_key.as_str(), secret_key.as_str())
            }
            _ => Err(BucketshipError::InvalidCredentials(format!(
                "{} is missing access_key_id or secret_access_key",
                path.display()
            ))),
        }
    }
}

impl Default for CredentialChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal INI reader: `[section]` headers and `key = value` lines.
///
/// Comment lines start with `#` or `;`. Keys before the first header are
/// dropped.
pub fn parse_ini(content: &str) -> HashMap<String, HashMap<String, String>> {
    let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim().to_string();
            sections.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }
        let (Some(section), Some((key, value))) = (&current, line.split_once('=')) else {
            continue;
        };
        if let Some(entries) = sections.get_mut(section) {
            entries.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    sections
}
