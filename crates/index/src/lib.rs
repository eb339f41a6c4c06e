//! Project file index for TaskWeaver.
//!
//! Gives the planner a view of the project: the full file listing, file
//! contents, and keyword search over contents via ripgrep. The project root
//! is always an argument, never cached.

pub mod root;
pub mod search;
pub mod walk;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use taskweaver_config::AppConfig;
use taskweaver_core::error::IndexError;
use taskweaver_core::file::WorkspaceFile;
use taskweaver_core::index::FileIndex;
use tracing::{debug, info, warn};

pub use root::resolve_project_root;
pub use search::RipgrepSearch;

/// Filesystem-backed [`FileIndex`].
#[derive(Debug, Clone)]
pub struct ProjectFileIndex {
    /// Directory names pruned from the listing.
    excluded_segments: Vec<String>,
    /// Extensions offered in the host file picker.
    source_extensions: Vec<String>,
    search: RipgrepSearch,
}

impl ProjectFileIndex {
    pub fn new(
        excluded_segments: Vec<String>,
        source_extensions: Vec<String>,
        search: RipgrepSearch,
    ) -> Self {
        Self {
            excluded_segments,
            source_extensions,
            search,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.index.excluded_segments.clone(),
            config.index.source_extensions.clone(),
            RipgrepSearch::new(
                config.search.ripgrep_path.as_ref().map(PathBuf::from),
                config.search.fixed_strings,
            ),
        )
    }

    /// The ripgrep binary this index would use, if one can be found.
    pub fn search_backend(&self) -> Result<PathBuf, IndexError> {
        self.search.locate()
    }
}

impl Default for ProjectFileIndex {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[async_trait]
impl FileIndex for ProjectFileIndex {
    async fn list_all_files(&self, root: &Path) -> Vec<String> {
        let root_buf = root.to_path_buf();
        let excluded = self.excluded_segments.clone();
        match tokio::task::spawn_blocking(move || walk::list_relative(&root_buf, &excluded)).await
        {
            Ok(files) => {
                info!(root = %root.display(), count = files.len(), "Indexed project files");
                files
            }
            Err(e) => {
                warn!(root = %root.display(), error = %e, "Project traversal aborted");
                Vec::new()
            }
        }
    }

    async fn read_content(&self, path: &Path) -> Result<String, IndexError> {
        tokio::fs::read_to_string(path).await.map_err(|e| {
            debug!(path = %path.display(), error = %e, "Read failed");
            IndexError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })
    }

    async fn search_keyword(
        &self,
        root: &Path,
        keyword: &str,
        exclude_dirs: &[String],
    ) -> Result<Vec<PathBuf>, IndexError> {
        self.search.search(root, keyword, exclude_dirs).await
    }

    async fn workspace_files(&self, root: &Path) -> Vec<WorkspaceFile> {
        self.list_all_files(root)
            .await
            .into_iter()
            .filter(|relative| walk::has_extension(relative, &self.source_extensions))
            .map(|relative| WorkspaceFile {
                absolute_path: root.join(&relative).to_string_lossy().into_owned(),
                relative_path: relative,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for rel in [
            "src/extension.ts",
            "src/FileHelper.ts",
            "media/reset.css",
            "node_modules/openai/index.js",
        ] {
            let path = dir.path().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, "// content").unwrap();
        }
        dir
    }

    #[tokio::test]
    async fn list_all_files_is_relative() {
        let dir = fixture();
        let index = ProjectFileIndex::default();
        let files = index.list_all_files(dir.path()).await;
        assert_eq!(
            files,
            vec!["media/reset.css", "src/FileHelper.ts", "src/extension.ts"]
        );
    }

    #[tokio::test]
    async fn list_all_files_unusable_root() {
        let index = ProjectFileIndex::default();
        assert!(index.list_all_files(Path::new("/nonexistent/tw")).await.is_empty());
    }

    #[tokio::test]
    async fn workspace_files_filter_to_sources() {
        let dir = fixture();
        let index = ProjectFileIndex::default();
        let files = index.workspace_files(dir.path()).await;
        let rel: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(rel, vec!["src/FileHelper.ts", "src/extension.ts"]);
        assert!(files[0].absolute_path.ends_with("src/FileHelper.ts"));
        assert!(Path::new(&files[0].absolute_path).is_absolute());
    }

    #[tokio::test]
    async fn read_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("test.txt");
        let mut f = std::fs::File::create(&file_path).unwrap();
        writeln!(f, "Hello, world!").unwrap();

        let index = ProjectFileIndex::default();
        let content = index.read_content(&file_path).await.unwrap();
        assert!(content.contains("Hello, world!"));
    }

    #[tokio::test]
    async fn read_nonexistent_file() {
        let index = ProjectFileIndex::default();
        let err = index
            .read_content(Path::new("/tmp/taskweaver_test_nonexistent_file_12345.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, IndexError::Read { .. }));
    }

    #[tokio::test]
    async fn read_non_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("blob.bin");
        std::fs::write(&file_path, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        let index = ProjectFileIndex::default();
        assert!(index.read_content(&file_path).await.is_err());
    }

    #[test]
    fn from_config_uses_configured_ripgrep() {
        let mut config = AppConfig::default();
        config.search.ripgrep_path = Some("/nonexistent/bin/rg-taskweaver".into());
        let index = ProjectFileIndex::from_config(&config);
        assert!(matches!(
            index.search_backend(),
            Err(IndexError::SearchUnavailable(_))
        ));
    }
}
