//! `taskweaver files`: List project files.

use std::path::PathBuf;
use taskweaver_core::index::FileIndex;
use taskweaver_index::ProjectFileIndex;

use super::CliResult;

pub async fn run(root: Option<PathBuf>, all: bool) -> CliResult<()> {
    let config = super::load_config()?;
    let root = super::project_root(&config, root.as_deref())?;
    let index = ProjectFileIndex::from_config(&config);

    if all {
        for file in index.list_all_files(&root).await {
            println!("{file}");
        }
    } else {
        for file in index.workspace_files(&root).await {
            println!("{}", file.relative_path);
        }
    }

    Ok(())
}
