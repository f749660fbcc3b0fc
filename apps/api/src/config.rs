use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::ANTHROPIC_API_URL;

/// Application configuration loaded from environment variables.
/// Fails at startup if the API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Messages endpoint. Overridable so tests and proxies can stand in for Anthropic.
    pub llm_api_url: String,
    pub llm_timeout_secs: u64,
    pub profile_store_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            llm_api_url: std::env::var("LLM_API_URL")
                .unwrap_or_else(|_| ANTHROPIC_API_URL.to_string()),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            profile_store_path: std::env::var("PROFILE_STORE_PATH")
                .unwrap_or_else(|_| "data/profiles.json".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
