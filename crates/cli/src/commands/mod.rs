//! Subcommand implementations and the wiring they share.

pub mod doctor;
pub mod files;
pub mod host;
pub mod onboard;
pub mod plan;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use taskweaver_config::AppConfig;
use taskweaver_index::{ProjectFileIndex, resolve_project_root};
use taskweaver_planner::{PlanClient, PlanSession, PlannerOptions, TaskPlanner};
use taskweaver_providers::{build_from_config, default_model};

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

pub fn load_config() -> CliResult<AppConfig> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

/// `--root`, then `project.root`, then the current directory.
pub fn project_root(config: &AppConfig, explicit: Option<&Path>) -> CliResult<PathBuf> {
    let cwd = std::env::current_dir().ok();
    Ok(resolve_project_root(
        explicit,
        config.project.root.as_deref(),
        cwd.as_deref(),
    )?)
}

/// Build a session for `root` from configuration.
pub fn build_session(config: &AppConfig, root: PathBuf) -> CliResult<PlanSession> {
    if !config.has_api_key() && config.default_provider != "ollama" {
        eprintln!();
        eprintln!("  WARNING: No API key configured!");
        eprintln!("  Set TASKWEAVER_API_KEY or OPENAI_API_KEY, or add api_key to");
        eprintln!("    {}", AppConfig::config_path().display());
        eprintln!();
    }

    let router = build_from_config(config)?;
    let provider = router
        .default()
        .ok_or("No default provider configured")?;
    let client = PlanClient::new(provider, default_model(config))
        .with_temperature(config.default_temperature)
        .with_max_tokens(config.default_max_tokens);

    let index = Arc::new(ProjectFileIndex::from_config(config));
    let planner = TaskPlanner::new(client, index, PlannerOptions::from_config(config));
    Ok(PlanSession::new(planner, root))
}
