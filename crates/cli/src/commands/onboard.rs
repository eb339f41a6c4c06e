//! `taskweaver onboard`: First-time setup.

use taskweaver_config::AppConfig;

use super::CliResult;

pub async fn run() -> CliResult<()> {
    let config_dir = AppConfig::config_dir();
    let config_path = AppConfig::config_path();

    println!("🧵 TaskWeaver — First-Time Setup");
    println!("================================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
        return Ok(());
    }

    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("✅ Created config.toml at: {}", config_path.display());
    println!("\n📝 Next steps:");
    println!("   1. Edit {} and add your API key", config_path.display());
    println!("      (or export TASKWEAVER_API_KEY)");
    println!("   2. Install ripgrep (`rg`) for keyword search");
    println!("   3. Run: taskweaver plan --task \"...\" --select src/main.ts\n");

    Ok(())
}
