//! Remote Key Computation
//!
//! Remote keys always use `/` separators and never start with one.

use std::path::{Component, Path};

/// Strip leading separators from a key or URL path.
pub fn clean_key(key: &str) -> String {
    key.trim_start_matches('/').to_string()
}

/// Compute the remote key for `file` found under `root`.
///
/// With `flatten`, directory structure is discarded and only the file name
/// is kept. The destination prefix is joined in front either way.
pub fn remote_key(root: &Path, file: &Path, prefix: &str, flatten: bool) -> String {
    let tail = if flatten {
        file.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        let relative = file.strip_prefix(root).unwrap_or(file);
        let joined = join_components(relative);
        if joined.is_empty() {
            // Single-file source: the file is its own root.
            file.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        } else {
            joined
        }
    };

    let prefix = prefix.trim_matches('/');
    let parts: Vec<&str> = [prefix, tail.as_str()]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();

    clean_key(&parts.join("/"))
}

fn join_components(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
