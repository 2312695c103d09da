use super::app::validate_base_url;
use super::error::ConfigError;
use crate::constants::{BASE_URL_ENV, BYTES_PER_MB, CONFIG_PATH, ENV_PATH};
use crate::domain::ModelTier;
use dotenvy::from_filename;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct RawConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub typing_delay_ms: Option<u64>,
    pub max_upload_mb: Option<u64>,
    pub default_tier: Option<String>,
    pub api_key_env: Option<String>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Load and validate configuration.
///
/// An explicit path must exist. When no path is given the default location is
/// tried and a missing file falls back to built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<super::AppConfig, ConfigError> {
    ensure_env_loaded();
    let raw = match path {
        Some(path) => read_config(&expand_path(path))?,
        None => match read_config(Path::new(CONFIG_PATH)) {
            Err(ConfigError::NotFound { .. }) => {
                debug!(path = CONFIG_PATH, "No configuration file, using defaults");
                RawConfig::default()
            }
            other => other?,
        },
    };
    let env_base_url = env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty());
    validate_and_build(raw, env_base_url)
}

fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}

fn read_config(path: &Path) -> Result<RawConfig, ConfigError> {
    debug!(path = %path.display(), "Reading client configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn validate_and_build(
    parsed: RawConfig,
    env_base_url: Option<String>,
) -> Result<super::AppConfig, ConfigError> {
    let defaults = super::AppConfig::default();

    let base_url = match env_base_url.or(parsed.base_url) {
        Some(value) => validate_base_url(&value)?,
        None => defaults.base_url,
    };

    let request_timeout = match parsed.request_timeout_secs {
        Some(0) => return Err(ConfigError::InvalidTimeout),
        Some(secs) => Some(Duration::from_secs(secs)),
        None => None,
    };

    let max_upload_mb = match parsed.max_upload_mb {
        Some(0) => return Err(ConfigError::InvalidUploadLimit),
        Some(mb) if mb > u64::MAX / BYTES_PER_MB => return Err(ConfigError::InvalidUploadLimit),
        Some(mb) => mb,
        None => defaults.max_upload_mb,
    };

    let default_tier = parsed
        .default_tier
        .map(|value| ModelTier::parse(&value).ok_or(ConfigError::UnknownTier { value }))
        .transpose()?;

    Ok(super::AppConfig {
        base_url,
        request_timeout,
        typing_delay: parsed
            .typing_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.typing_delay),
        max_upload_mb,
        default_tier,
        api_key_env: parsed.api_key_env.unwrap_or(defaults.api_key_env),
    })
}
