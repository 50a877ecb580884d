//! Sync Planning
//!
//! Walks a local source and maps every publishable file to its remote key.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::value_objects::remote_key;
use crate::error::{BucketshipError, BucketshipResult};

/// Names never uploaded, wherever they appear in the tree
pub const EXCLUDED_NAMES: &[&str] = &[".DS_Store", "__pycache__"];

/// One local file and where it will land
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpload {
    pub local: PathBuf,
    pub key: String,
    pub content_type: Option<String>,
}

/// Ordered set of uploads, one per remote key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub entries: Vec<PlannedUpload>,
}

impl SyncPlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }
}

fn is_excluded(name: &OsStr, extra: &[String]) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.')
        || EXCLUDED_NAMES.contains(&name.as_ref())
        || extra.iter().any(|e| e == name.as_ref())
}

/// Plan uploads for `source`.
///
/// A single file is a one-entry plan. Directories are walked recursively,
/// skipping hidden entries and [`EXCLUDED_NAMES`]. With `flatten`, several
/// files may map to one key; the last in path order wins.
pub fn plan_sync(source: &Path, prefix: &str, flatten: bool) -> BucketshipResult<SyncPlan> {
    plan_sync_excluding(source, prefix, flatten, &[])
}

/// Like [`plan_sync`], also skipping entries named in `exclude`
pub fn plan_sync_excluding(
    source: &Path,
    prefix: &str,
    flatten: bool,
    exclude: &[String],
) -> BucketshipResult<SyncPlan> {
    if !source.exists() {
        return Err(BucketshipError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    let mut files: Vec<PathBuf> = Vec::new();
    if source.is_file() {
        files.push(source.to_path_buf());
    } else {
        let extra = exclude.to_vec();
        let walker = WalkBuilder::new(source)
            .standard_filters(false)
            .hidden(true)
            .follow_links(true)
            .sort_by_file_path(|a, b| a.cmp(b))
            .filter_entry(move |entry| !is_excluded(entry.file_name(), &extra))
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| BucketshipError::Io(std::io::Error::other(e.to_string())))?;
            if entry.file_type().is_some_and(|t| t.is_file()) {
                files.push(entry.into_path());
            }
        }
    }

    let mut by_key: BTreeMap<String, PlannedUpload> = BTreeMap::new();
    for local in files {
        let key = remote_key(source, &local, prefix, flatten);
        if key.is_empty() {
            continue;
        }
        let content_type = mime_guess::from_path(&local)
            .first_raw()
            .map(str::to_string);
        let planned = PlannedUpload {
            local,
            key: key.clone(),
            content_type,
        };
        if let Some(previous) = by_key.insert(key.clone(), planned) {
            tracing::warn!(
                key = %key,
                replaced = %previous.local.display(),
                "several files map to the same key"
            );
        }
    }

    Ok(SyncPlan {
        entries: by_key.into_values().collect(),
    })
}
