//! Keyword search through an external `rg` (ripgrep) process.
//!
//! Exit status contract: 0 = matches found, 1 = ran fine with no matches,
//! anything else (or death by signal) = failure.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use taskweaver_core::error::IndexError;
use tokio::process::Command;
use tracing::{debug, warn};

/// Ripgrep-backed keyword search.
#[derive(Debug, Clone, Default)]
pub struct RipgrepSearch {
    /// Configured binary (path or name). `None` = `rg` on PATH.
    binary: Option<PathBuf>,
    /// Pass `--fixed-strings` so keywords match literally.
    fixed_strings: bool,
}

impl RipgrepSearch {
    pub fn new(binary: Option<PathBuf>, fixed_strings: bool) -> Self {
        Self {
            binary,
            fixed_strings,
        }
    }

    /// Find the ripgrep executable.
    pub fn locate(&self) -> Result<PathBuf, IndexError> {
        match &self.binary {
            Some(path) if path.is_file() => Ok(path.clone()),
            Some(path) => which::which(path).map_err(|e| {
                IndexError::SearchUnavailable(format!("{}: {e}", path.display()))
            }),
            None => which::which("rg")
                .map_err(|e| IndexError::SearchUnavailable(format!("rg not found on PATH: {e}"))),
        }
    }

    /// Command-line arguments for one keyword.
    fn args(&self, keyword: &str, exclude_dirs: &[String]) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "--files-with-matches".into(),
            "--no-heading".into(),
            "--no-messages".into(),
            "--color".into(),
            "never".into(),
        ];
        if self.fixed_strings {
            args.push("--fixed-strings".into());
        }
        // Unanchored: nested copies are excluded too
        for dir in exclude_dirs {
            args.push("--glob".into());
            args.push(format!("!**/{dir}/**"));
        }
        // `-e` keeps keywords like `-foo` from being read as flags
        args.push("-e".into());
        args.push(keyword.to_string());
        args
    }

    /// Search `root` for files containing `keyword`. Returns absolute paths.
    pub async fn search(
        &self,
        root: &Path,
        keyword: &str,
        exclude_dirs: &[String],
    ) -> Result<Vec<PathBuf>, IndexError> {
        if keyword.trim().is_empty() {
            return Ok(Vec::new());
        }
        if !root.is_dir() {
            return Err(IndexError::Search {
                keyword: keyword.to_string(),
                reason: format!("{} is not a directory", root.display()),
            });
        }

        let binary = self.locate()?;
        debug!(keyword = %keyword, binary = %binary.display(), "Running keyword search");

        let output = Command::new(&binary)
            .args(self.args(keyword, exclude_dirs))
            .current_dir(root)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    IndexError::SearchUnavailable(format!("{}: {e}", binary.display()))
                }
                _ => IndexError::Search {
                    keyword: keyword.to_string(),
                    reason: e.to_string(),
                },
            })?;

        interpret_output(
            root,
            keyword,
            output.status.code(),
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        )
    }
}

/// Map a finished ripgrep run onto the search contract.
fn interpret_output(
    root: &Path,
    keyword: &str,
    code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> Result<Vec<PathBuf>, IndexError> {
    match code {
        Some(0) => Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| root.join(line))
            .collect()),
        Some(1) => Ok(Vec::new()),
        other => {
            let reason = match other {
                Some(code) => format!("exit code {code}: {}", stderr.trim()),
                None => "terminated by signal".to_string(),
            };
            warn!(keyword = %keyword, reason = %reason, "Keyword search failed");
            Err(IndexError::Search {
                keyword: keyword.to_string(),
                reason,
            })
        }
    }
}
