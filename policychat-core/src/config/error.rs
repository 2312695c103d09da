use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid base_url '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("max_upload_mb must be greater than zero and fit in a byte count")]
    InvalidUploadLimit,

    #[error("request_timeout_secs must be greater than zero")]
    InvalidTimeout,

    #[error("unknown default_tier '{value}' - expected 'open' or 'closed'")]
    UnknownTier { value: String },
}
