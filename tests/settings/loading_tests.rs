// Config loading tests - AppConfig::load parsing, defaults and validation
//
// Tests touching process environment variables are serialized.

use policychat_core::domain::ModelTier;
use policychat_core::{AppConfig, ConfigError};
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

const BASE_URL_ENV: &str = "POLICYCHAT_BASE_URL";

fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("policychat.toml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

fn load(content: &str) -> Result<AppConfig, ConfigError> {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), content);
    AppConfig::load(Some(&path))
}

#[test]
fn returns_error_when_file_not_found() {
    let result = AppConfig::load(Some(Path::new("/nonexistent/path/policychat.toml")));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
#[serial]
fn empty_file_yields_defaults() {
    unsafe { std::env::remove_var(BASE_URL_ENV) };
    let config = load("").expect("valid config");

    assert_eq!(config.base_url, "http://127.0.0.1:8000");
    assert_eq!(config.typing_delay, Duration::from_millis(1000));
    assert_eq!(config.max_upload_mb, 10);
    assert_eq!(config.max_upload_bytes(), 10 * 1024 * 1024);
    assert_eq!(config.request_timeout, None);
    assert_eq!(config.default_tier, None);
    assert_eq!(config.api_key_env, "POLICYCHAT_API_KEY");
}

#[test]
#[serial]
fn full_file_is_parsed() {
    unsafe { std::env::remove_var(BASE_URL_ENV) };
    let config = load(
        r#"
base_url = "https://policies.example.com/"
request_timeout_secs = 30
typing_delay_ms = 250
max_upload_mb = 25
default_tier = "Closed"
api_key_env = "ACME_RAG_KEY"
"#,
    )
    .expect("valid config");

    assert_eq!(config.base_url, "https://policies.example.com");
    assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    assert_eq!(config.typing_delay, Duration::from_millis(250));
    assert_eq!(config.max_upload_mb, 25);
    assert_eq!(config.default_tier, Some(ModelTier::Closed));
    assert_eq!(config.api_key_env, "ACME_RAG_KEY");
}

#[test]
fn zero_typing_delay_is_allowed() {
    let config = load("typing_delay_ms = 0").expect("valid config");
    assert!(config.typing_delay.is_zero());
}

#[test]
#[serial]
fn rejects_unsupported_scheme() {
    unsafe { std::env::remove_var(BASE_URL_ENV) };
    let result = load(r#"base_url = "ftp://files.example.com""#);
    assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
}

#[test]
#[serial]
fn rejects_unparseable_url() {
    unsafe { std::env::remove_var(BASE_URL_ENV) };
    let result = load(r#"base_url = "not a url""#);
    assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
}

#[test]
fn rejects_zero_upload_limit() {
    let result = load("max_upload_mb = 0");
    assert!(matches!(result, Err(ConfigError::InvalidUploadLimit)));
}

#[test]
fn rejects_upload_limit_too_large_for_bytes() {
    let result = load("max_upload_mb = 9223372036854775807");
    assert!(matches!(result, Err(ConfigError::InvalidUploadLimit)));
}

#[test]
fn rejects_zero_timeout() {
    let result = load("request_timeout_secs = 0");
    assert!(matches!(result, Err(ConfigError::InvalidTimeout)));
}

#[test]
fn rejects_unknown_tier() {
    let result = load(r#"default_tier = "premium""#);
    match result {
        Err(ConfigError::UnknownTier { value }) => assert_eq!(value, "premium"),
        other => panic!("expected unknown tier error, got {other:?}"),
    }
}

#[test]
fn rejects_unknown_keys() {
    let result = load(r#"model = "gpt""#);
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn rejects_malformed_toml() {
    let result = load("base_url = ");
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
#[serial]
fn environment_overrides_file_base_url() {
    unsafe { std::env::set_var(BASE_URL_ENV, "http://10.0.0.5:9000") };
    let result = load(r#"base_url = "http://127.0.0.1:8000""#);
    unsafe { std::env::remove_var(BASE_URL_ENV) };

    assert_eq!(result.expect("valid config").base_url, "http://10.0.0.5:9000");
}

#[test]
fn with_base_url_validates_override() {
    let config = AppConfig::default()
        .with_base_url("http://localhost:8080/")
        .expect("valid url");
    assert_eq!(config.base_url, "http://localhost:8080");

    assert!(matches!(
        AppConfig::default().with_base_url("localhost"),
        Err(ConfigError::InvalidBaseUrl { .. })
    ));
}

#[test]
#[serial]
fn api_key_is_read_from_named_variable() {
    let config = AppConfig {
        api_key_env: "POLICYCHAT_TEST_KEY".to_string(),
        ..AppConfig::default()
    };

    unsafe { std::env::set_var("POLICYCHAT_TEST_KEY", "sk-from-env") };
    assert_eq!(config.resolve_api_key().as_deref(), Some("sk-from-env"));

    unsafe { std::env::set_var("POLICYCHAT_TEST_KEY", "   ") };
    assert_eq!(config.resolve_api_key(), None);

    unsafe { std::env::remove_var("POLICYCHAT_TEST_KEY") };
    assert_eq!(config.resolve_api_key(), None);
}

#[test]
fn empty_key_variable_name_disables_lookup() {
    let config = AppConfig {
        api_key_env: String::new(),
        ..AppConfig::default()
    };
    assert_eq!(config.resolve_api_key(), None);
}
