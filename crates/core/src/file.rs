//! File references: project-relative identity, absolute location.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` segments and fold `..` into the
/// preceding segment. Does not touch the filesystem or follow symlinks.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().map(|c| c.as_os_str()).collect()
}

/// A file in the working set.
///
/// Equality, ordering, and hashing use the normalized absolute path only, so
/// `src/a.ts`, `./src/a.ts`, and `/root/src/a.ts` collapse to one entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReference {
    /// Path relative to the project root, `/`-separated. Paths outside the
    /// root keep their absolute form here.
    pub relative: String,

    /// Normalized absolute path used for all I/O.
    pub absolute: PathBuf,
}

impl FileReference {
    /// Resolve `path` against `root`. Absolute inputs are kept as-is.
    pub fn resolve(root: &Path, path: impl AsRef<Path>) -> Self {
        let root = normalize_path(root);
        let absolute = normalize_path(&root.join(path.as_ref()));
        let relative = match absolute.strip_prefix(&root) {
            Ok(rel) => to_slash(rel),
            Err(_) => absolute.to_string_lossy().into_owned(),
        };
        Self { relative, absolute }
    }
}

impl PartialEq for FileReference {
    fn eq(&self, other: &Self) -> bool {
        self.absolute == other.absolute
    }
}

impl Eq for FileReference {}

impl Hash for FileReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.absolute.hash(state);
    }
}

impl PartialOrd for FileReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FileReference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute.cmp(&other.absolute)
    }
}

impl std::fmt::Display for FileReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.relative)
    }
}

/// A project file as shown in the host's file picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceFile {
    pub relative_path: String,
    pub absolute_path: String,
}

/// Render a relative path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
