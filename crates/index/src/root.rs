//! Project root resolution.

use std::path::{Path, PathBuf};
use taskweaver_core::Error;

/// Pick the project root: an explicit path wins over the configured one,
/// which wins over the working directory. A file resolves to its parent
/// directory. The result is canonical.
pub fn resolve_project_root(
    explicit: Option<&Path>,
    configured: Option<&str>,
    cwd: Option<&Path>,
) -> Result<PathBuf, Error> {
    let candidate = explicit
        .map(Path::to_path_buf)
        .or_else(|| configured.map(PathBuf::from))
        .or_else(|| cwd.map(Path::to_path_buf))
        .ok_or_else(|| Error::config("no project root: pass --root or set project.root"))?;

    let candidate = if candidate.is_file() {
        candidate
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::config(format!("{} has no parent", candidate.display())))?
    } else {
        candidate
    };

    if !candidate.is_dir() {
        return Err(Error::config(format!(
            "project root {} is not a directory",
            candidate.display()
        )));
    }

    std::fs::canonicalize(&candidate).map_err(|e| {
        Error::config(format!(
            "cannot resolve project root {}: {e}",
            candidate.display()
        ))
    })
}
