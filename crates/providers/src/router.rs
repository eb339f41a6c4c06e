//! Provider router: selects the correct LLM provider based on config.
//!
//! Handles provider creation, caching, and routing requests to the right backend.

use crate::openai_compat::OpenAiCompatProvider;
use std::collections::HashMap;
use std::sync::Arc;
use taskweaver_core::error::ProviderError;
use taskweaver_core::provider::Provider;

/// Routes LLM requests to the correct provider.
pub struct ProviderRouter {
    providers: HashMap<String, Arc<dyn Provider>>,
    default_provider: String,
}

impl ProviderRouter {
    /// Create a new router with a default provider.
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider.into(),
        }
    }

    /// Register a provider.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Get the default provider.
    pub fn default(&self) -> Option<Arc<dyn Provider>> {
        self.providers.get(&self.default_provider).cloned()
    }

    /// Get a specific provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }

    /// List all registered provider names.
    pub fn list(&self) -> Vec<&str> {
        self.providers.keys().map(|s| s.as_str()).collect()
    }
}

/// Build providers from configuration.
///
/// Providers outside the built-in list need an explicit `api_url`.
pub fn build_from_config(
    config: &taskweaver_config::AppConfig,
) -> Result<ProviderRouter, ProviderError> {
    let mut router = ProviderRouter::new(&config.default_provider);

    for (name, provider_config) in &config.providers {
        let api_key = provider_config
            .api_key
            .clone()
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();

        let base_url = match &provider_config.api_url {
            Some(url) => url.clone(),
            None => base_url_for(name)?,
        };

        router.register(
            name.clone(),
            Arc::new(OpenAiCompatProvider::new(name, &base_url, &api_key)),
        );
    }

    // Ensure the default provider exists (even if not explicitly configured)
    if router.get(&config.default_provider).is_none() {
        let api_key = config.api_key.clone().unwrap_or_default();
        let base_url = base_url_for(&config.default_provider)?;
        router.register(
            config.default_provider.clone(),
            Arc::new(OpenAiCompatProvider::new(
                &config.default_provider,
                &base_url,
                &api_key,
            )),
        );
    }

    Ok(router)
}

/// Resolve the model for the default provider: a per-provider override wins
/// over the global default.
pub fn default_model(config: &taskweaver_config::AppConfig) -> String {
    config
        .providers
        .get(&config.default_provider)
        .and_then(|p| p.default_model.clone())
        .unwrap_or_else(|| config.default_model.clone())
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> Option<&'static str> {
    match provider_name {
        "openrouter" => Some("https://openrouter.ai/api/v1"),
        "openai" => Some("https://api.openai.com/v1"),
        "ollama" => Some("http://localhost:11434/v1"),
        "deepseek" => Some("https://api.deepseek.com/v1"),
        "groq" => Some("https://api.groq.com/openai/v1"),
        "together" => Some("https://api.together.xyz/v1"),
        "fireworks" => Some("https://api.fireworks.ai/inference/v1"),
        "vllm" => Some("http://localhost:8000/v1"),
        "llamacpp" | "llama.cpp" => Some("http://localhost:8080/v1"),
        _ => None,
    }
}

fn base_url_for(provider_name: &str) -> Result<String, ProviderError> {
    default_base_url(provider_name)
        .map(String::from)
        .ok_or_else(|| {
            ProviderError::NotConfigured(format!(
                "unknown provider '{provider_name}': set providers.{provider_name}.api_url"
            ))
        })
}
