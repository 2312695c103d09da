use super::error::ConfigError;
use crate::constants::{
    BYTES_PER_MB, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MAX_UPLOAD_MB, DEFAULT_TYPING_DELAY_MS,
};
use crate::domain::ModelTier;
use std::env;
use std::path::Path;
use std::time::Duration;
use tracing::warn;


/// Application configuration loaded from policychat.toml
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub request_timeout: Option<Duration>,
    pub typing_delay: Duration,
    pub max_upload_mb: u64,
    pub default_tier: Option<ModelTier>,
    pub api_key_env: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            typing_delay: Duration::from_millis(DEFAULT_TYPING_DELAY_MS),
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            default_tier: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Replace the backend address, validating it the same way the file is.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = validate_base_url(base_url)?;
        Ok(self)
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb.saturating_mul(BYTES_PER_MB)
    }

    /// Read the closed-tier key from the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        let name = self.api_key_env.trim();
        if name.is_empty() {
            return None;
        }
        match env::var(name) {
            Ok(value) if !value.trim().is_empty() => Some(value),
            Ok(_) => None,
            Err(env::VarError::NotPresent) => None,
            Err(err) => {
                warn!(env_var = name, %err, "API key environment variable is unreadable");
                None
            }
        }
    }
}

pub(super) fn validate_base_url(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    let url = reqwest::Url::parse(trimmed).map_err(|err| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.trim_end_matches('/').to_string()),
        other => Err(ConfigError::InvalidBaseUrl {
            value: value.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
