//! Error types for the TaskWeaver domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all TaskWeaver operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Model backend errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Project index errors ---
    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    // --- Plan request errors ---
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Error)]
pub enum IndexError {
    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Search backend unavailable: {0}")]
    SearchUnavailable(String),

    #[error("Search for '{keyword}' failed: {reason}")]
    Search { keyword: String, reason: String },
}

#[derive(Debug, Clone, Error)]
pub enum PlanError {
    #[error("Malformed {stage} response: {reason}")]
    MalformedResponse { stage: String, reason: String },
}

impl PlanError {
    pub fn malformed(stage: &str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            stage: stage.to_string(),
            reason: reason.into(),
        }
    }
}
