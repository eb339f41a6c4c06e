//! FileIndex trait: the abstraction over project traversal, reads, and search.
//!
//! The project root is passed into every call rather than cached, so a
//! caller that switches workspaces between runs never sees a stale root.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::IndexError;
use crate::file::WorkspaceFile;

#[async_trait]
pub trait FileIndex: Send + Sync {
    /// Every file under `root`, relative to it, minus excluded directories.
    /// An unusable root yields an empty list.
    async fn list_all_files(&self, root: &Path) -> Vec<String>;

    /// Full text of one file.
    async fn read_content(&self, path: &Path) -> Result<String, IndexError>;

    /// Files under `root` containing `keyword`, skipping `exclude_dirs`.
    /// Returned paths are absolute. No matches is `Ok(vec![])`.
    async fn search_keyword(
        &self,
        root: &Path,
        keyword: &str,
        exclude_dirs: &[String],
    ) -> Result<Vec<PathBuf>, IndexError>;

    /// Files offered to the user for selection. Defaults to the full listing.
    async fn workspace_files(&self, root: &Path) -> Vec<WorkspaceFile> {
        self.list_all_files(root)
            .await
            .into_iter()
            .map(|relative| WorkspaceFile {
                absolute_path: root.join(&relative).to_string_lossy().into_owned(),
                relative_path: relative,
            })
            .collect()
    }
}
