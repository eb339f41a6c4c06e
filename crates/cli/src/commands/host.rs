//! `taskweaver host`: Serve an editor host over stdin/stdout.

use std::path::PathBuf;
use std::sync::Arc;

use super::CliResult;

pub async fn run(root: Option<PathBuf>) -> CliResult<()> {
    let config = super::load_config()?;
    let root = super::project_root(&config, root.as_deref())?;
    let session = Arc::new(super::build_session(&config, root)?);

    taskweaver_planner::bridge::serve(session, tokio::io::stdin(), tokio::io::stdout()).await?;
    tracing::info!("Host closed input; exiting");
    Ok(())
}
