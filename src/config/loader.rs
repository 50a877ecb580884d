//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::Environment;
use crate::error::{BucketshipError, BucketshipResult};

use super::types::Config;

/// Project settings file, relative to the working directory
pub const PROJECT_CONFIG_FILE: &str = "bucketship.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> BucketshipResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BucketshipError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut warnings: Vec<ConfigWarning> = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key, KNOWN_KEYS),
            }
        })
        .collect();

    // Environment tables are a free-form map; unknown names are typos
    for name in config.environments.keys() {
        if name.parse::<Environment>().is_err() {
            warnings.push(ConfigWarning {
                key: name.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, name),
                suggestion: suggest_key(name, ENVIRONMENT_NAMES),
            });
        }
    }

    Ok((config, warnings))
}

/// Candidate settings files, in lookup order
pub fn config_paths(project_root: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(root) = project_root {
        paths.push(root.join(PROJECT_CONFIG_FILE));
    }
    if let Some(dir) = user_config_dir() {
        paths.push(dir.join("bucketship").join("config.toml"));
    }
    paths
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> Config {
    load_or_default_with_warnings(project_root).0
}

/// Like [`load_or_default`], keeping the warnings of the file that was used.
///
/// A file that fails to parse is logged and skipped.
pub fn load_or_default_with_warnings(project_root: Option<&Path>) -> (Config, Vec<ConfigWarning>) {
    for path in config_paths(project_root) {
        if !path.exists() {
            continue;
        }
        match load_with_warnings(&path) {
            Ok((config, warnings)) => {
                tracing::debug!(path = %path.display(), "loaded settings");
                return (Config::with_env_overrides(config), warnings);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable settings file");
            }
        }
    }

    (Config::default().with_env_overrides(), Vec::new())
}

/// Apply process-level environment variable overrides
pub fn with_env_overrides(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    // DEPLOY_ENV
    if let Some(name) = get_env("DEPLOY_ENV").filter(|v| !v.trim().is_empty()) {
        config.default_environment = Some(name);
    }

    // BUCKETSHIP_WORKERS
    if let Some(raw) = get_env("BUCKETSHIP_WORKERS") {
        match raw.trim().parse::<usize>() {
            Ok(workers) if workers > 0 => config.sync.workers = Some(workers),
            _ => tracing::warn!(value = %raw, "ignoring invalid BUCKETSHIP_WORKERS"),
        }
    }

    config
}

/// XDG config directory, falling back to the platform default
pub fn user_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .or_else(dirs::config_dir)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

const KNOWN_KEYS: &[&str] = &[
    "default_environment",
    "environments",
    "bucket_prefix",
    "region",
    "cors",
    "domains",
    "static_website",
    "require_confirmation",
    "dry_run_first",
    "sync",
    "workers",
    "exclude",
    "output",
    "color",
    "unicode",
];

const ENVIRONMENT_NAMES: &[&str] = &["development", "dev", "staging", "stage", "production", "prod"];

fn suggest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
