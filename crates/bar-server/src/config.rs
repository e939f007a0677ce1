//! Server configuration loaded from environment variables.

use bar_query::LlmConfig;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8001;

/// Startup configuration errors. Fatal: the process exits before any
/// listener binds.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value '{0}': expected an integer")]
    InvalidPort(String),
}

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address. All interfaces.
    pub host: String,
    /// Listen port (PORT env var, default 8001).
    pub port: u16,
    /// Enable the LLM fallback constructor (LLM_FALLBACK_ENABLED env var).
    pub llm_fallback_enabled: bool,
    /// LLM endpoint settings (LLM_API_URL / LLM_MODEL / LLM_API_KEY /
    /// LLM_TIMEOUT_SECS env vars). Only consulted when the fallback is on.
    pub llm: LlmConfig,
}

impl ServerConfig {
    /// Load config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_port(std::env::var("PORT").ok())?;

        let llm_fallback_enabled = flag_enabled(std::env::var("LLM_FALLBACK_ENABLED").ok());

        let defaults = LlmConfig::default();
        let llm = LlmConfig {
            api_url: std::env::var("LLM_API_URL").unwrap_or(defaults.api_url),
            model: std::env::var("LLM_MODEL").unwrap_or(defaults.model),
            api_key: std::env::var("LLM_API_KEY").ok(),
            timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        };

        Ok(Self {
            host: default_host(),
            port,
            llm_fallback_enabled,
            llm,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
            llm_fallback_enabled: false,
            llm: LlmConfig::default(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Resolve the listen port: absent → 8001, present → must parse as u16.
fn parse_port(value: Option<String>) -> Result<u16, ConfigError> {
    match value {
        None => Ok(DEFAULT_PORT),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort(raw)),
    }
}

fn flag_enabled(value: Option<String>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true") || v == "1")
}
