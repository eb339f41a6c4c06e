//! TaskWeaver CLI: the main entry point.
//!
//! Commands:
//! - `plan`: Generate an implementation plan for a task
//! - `files`: List the project files offered for selection
//! - `host`: Serve an editor host over stdin/stdout
//! - `doctor`: Diagnose configuration and search backend
//! - `onboard`: Write a default config file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "taskweaver",
    about = "TaskWeaver — context-aware implementation plans for your project",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a plan for a task
    Plan {
        /// What you want to build or change
        #[arg(short, long)]
        task: String,

        /// Project-relative file to include (repeatable)
        #[arg(short, long = "select", value_name = "FILE")]
        select: Vec<String>,

        /// Project root (defaults to project.root, then the current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// List project files
    Files {
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Every indexed file, not just source files
        #[arg(long)]
        all: bool,
    },

    /// Serve an editor host: JSON lines on stdin/stdout
    Host {
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// Diagnose configuration and search backend
    Doctor,

    /// Initialize configuration
    Onboard,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing. stdout belongs to command output (and to the host
    // protocol), so logs always go to stderr.
    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }

    match cli.command {
        Commands::Plan {
            task,
            select,
            root,
            json,
        } => commands::plan::run(task, select, root, json).await?,
        Commands::Files { root, all } => commands::files::run(root, all).await?,
        Commands::Host { root } => commands::host::run(root).await?,
        Commands::Doctor => commands::doctor::run().await?,
        Commands::Onboard => commands::onboard::run().await?,
    }

    Ok(())
}
