//! Configuration loading, validation, and management for TaskWeaver.
//!
//! Loads configuration from `~/.taskweaver/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.taskweaver/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key (can be overridden per-provider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default LLM provider
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Default model
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Default temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Max tokens per model response (unset = backend default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_max_tokens: Option<u32>,

    /// Project root settings
    #[serde(default)]
    pub project: ProjectConfig,

    /// File listing settings
    #[serde(default)]
    pub index: IndexConfig,

    /// Keyword search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Context assembly settings
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_provider() -> String {
    "openai".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f32 {
    0.2
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("default_provider", &self.default_provider)
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("project", &self.project)
            .field("index", &self.index)
            .field("search", &self.search)
            .field("planner", &self.planner)
            .field("providers", &self.providers)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("default_model", &self.default_model)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Fixed project root. Unset = the directory TaskWeaver is started in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Directory names whose contents never appear in the project listing.
    #[serde(default = "default_excluded_segments")]
    pub excluded_segments: Vec<String>,

    /// Extensions offered in the host file picker. Empty = every file.
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
}

fn default_excluded_segments() -> Vec<String> {
    vec!["node_modules".into(), ".git".into()]
}
fn default_source_extensions() -> Vec<String> {
    ["js", "ts", "tsx", "jsx", "py", "java", "c", "cpp", "go"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            excluded_segments: default_excluded_segments(),
            source_extensions: default_source_extensions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Explicit ripgrep binary. Unset = look up `rg` on PATH.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ripgrep_path: Option<String>,

    /// Directories excluded from keyword search.
    #[serde(default = "default_search_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Treat keywords as literals instead of regular expressions.
    #[serde(default)]
    pub fixed_strings: bool,

    /// Keyword searches allowed in flight at once.
    #[serde(default = "default_max_concurrent_searches")]
    pub max_concurrent: usize,
}

fn default_search_exclude_dirs() -> Vec<String> {
    vec!["node_modules".into(), ".git".into(), "dist".into()]
}
fn default_max_concurrent_searches() -> usize {
    8
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ripgrep_path: None,
            exclude_dirs: default_search_exclude_dirs(),
            fixed_strings: false,
            max_concurrent: default_max_concurrent_searches(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Search each distinct keyword once.
    #[serde(default = "default_true")]
    pub dedupe_keywords: bool,

    /// Drop suggested files that are not in the project listing.
    #[serde(default = "default_true")]
    pub validate_missing_files: bool,

    /// File reads allowed in flight at once.
    #[serde(default = "default_max_concurrent_reads")]
    pub max_concurrent_reads: usize,
}

fn default_true() -> bool {
    true
}
fn default_max_concurrent_reads() -> usize {
    16
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            dedupe_keywords: true,
            validate_missing_files: true,
            max_concurrent_reads: default_max_concurrent_reads(),
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.taskweaver/config.toml),
    /// then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Environment overrides. These win over anything in the file.
    ///
    /// - `TASKWEAVER_API_KEY`, `OPENAI_API_KEY`, `OPEN_AI_API_KEY`: fill a missing key
    /// - `TASKWEAVER_PROVIDER`: the default provider
    /// - `TASKWEAVER_MODEL`: the model, including over a per-provider `default_model`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if self.api_key.is_none() {
            self.api_key = var("TASKWEAVER_API_KEY")
                .or_else(|| var("OPENAI_API_KEY"))
                .or_else(|| var("OPEN_AI_API_KEY"));
        }

        if let Some(provider) = var("TASKWEAVER_PROVIDER") {
            self.default_provider = provider;
        }

        if let Some(model) = var("TASKWEAVER_MODEL") {
            if let Some(provider) = self.providers.get_mut(&self.default_provider) {
                provider.default_model = Some(model.clone());
            }
            self.default_model = model;
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".taskweaver")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_temperature < 0.0 || self.default_temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.search.max_concurrent == 0 {
            return Err(ConfigError::ValidationError(
                "search.max_concurrent must be > 0".into(),
            ));
        }

        if self.planner.max_concurrent_reads == 0 {
            return Err(ConfigError::ValidationError(
                "planner.max_concurrent_reads must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
            || self
                .providers
                .get(&self.default_provider)
                .is_some_and(|p| p.api_key.is_some())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            default_max_tokens: None,
            project: ProjectConfig::default(),
            index: IndexConfig::default(),
            search: SearchConfig::default(),
            planner: PlannerConfig::default(),
            providers: HashMap::new(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
