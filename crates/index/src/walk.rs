//! Project traversal.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use taskweaver_core::file::to_slash;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Every regular file under `root`, relative to it, `/`-separated, sorted.
///
/// Entries named like one of `excluded` are pruned together with everything
/// beneath them. A missing or non-directory root yields an empty list.
pub fn list_relative(root: &Path, excluded: &[String]) -> Vec<String> {
    if !root.is_dir() {
        debug!(root = %root.display(), "Project root is not a directory");
        return Vec::new();
    }

    let mut found: Vec<PathBuf> = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry, excluded));

    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() => found.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => debug!(error = %e, "Skipping unreadable entry"),
        }
    }

    // Strip the root only once the walk has finished.
    let mut relative: Vec<String> = found
        .iter()
        .filter_map(|path| path.strip_prefix(root).ok())
        .map(to_slash)
        .collect();
    relative.sort();
    relative
}

fn is_excluded(entry: &DirEntry, excluded: &[String]) -> bool {
    let name = entry.file_name();
    excluded.iter().any(|segment| name == OsStr::new(segment))
}

/// Whether `relative` has one of `extensions` (case-insensitive). An empty
/// extension list matches everything.
pub fn has_extension(relative: &str, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    Path::new(relative)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}
