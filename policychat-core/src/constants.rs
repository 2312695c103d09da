//! Application constants
//!
//! Single source of truth for paths, endpoints and user-facing fixed text.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/policychat.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Backend address used when neither config nor environment provide one
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the configured backend address
pub const BASE_URL_ENV: &str = "POLICYCHAT_BASE_URL";

/// Environment variable consulted for the closed-tier API key
pub const DEFAULT_API_KEY_ENV: &str = "POLICYCHAT_API_KEY";

pub const ANSWER_PATH: &str = "/rag/";
pub const UPLOAD_PATH: &str = "/upload/";
pub const INDEXED_FILES_PATH: &str = "/database/files/";

/// Multipart field the ingestion endpoint reads the document from
pub const UPLOAD_FIELD: &str = "file";

pub const DEFAULT_TYPING_DELAY_MS: u64 = 1000;
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 10;
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Shown in the history and the banner whenever a question fails
pub const QUERY_FAILURE_TEXT: &str = "Sorry, there was an error processing your request.";
