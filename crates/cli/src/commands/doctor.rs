//! `taskweaver doctor`: Diagnose configuration and search backend.

use taskweaver_config::AppConfig;
use taskweaver_index::ProjectFileIndex;
use taskweaver_providers::{build_from_config, default_model};

use super::CliResult;

pub async fn run() -> CliResult<()> {
    println!("🩺 TaskWeaver Doctor — System Diagnostics");
    println!("=========================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_path();
    println!("  Config path: {}", config_path.display());
    if !config_path.exists() {
        println!("  ⚠️  No config file — defaults in use (run `taskweaver onboard`)");
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  1 issue(s) found. See above for details.");
            return Ok(());
        }
    };

    println!("  Provider:    {}", config.default_provider);
    println!("  Model:       {}", default_model(&config));
    if let Err(e) = build_from_config(&config) {
        println!("  ❌ {e}");
        issues += 1;
    }

    if config.has_api_key() {
        println!("  ✅ API key configured");
    } else if config.default_provider == "ollama" {
        println!("  ✅ Local provider, no API key needed");
    } else {
        println!("  ⚠️  No API key — set TASKWEAVER_API_KEY or add api_key to config.toml");
        issues += 1;
    }

    match ProjectFileIndex::from_config(&config).search_backend() {
        Ok(path) => println!("  ✅ ripgrep found: {}", path.display()),
        Err(e) => {
            println!("  ❌ {e}");
            println!("     Keyword search will be skipped until ripgrep is installed.");
            issues += 1;
        }
    }

    match std::env::current_dir() {
        Ok(cwd) => println!("  Working dir: {}", cwd.display()),
        Err(e) => println!("  ⚠️  Cannot read working directory: {e}"),
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
