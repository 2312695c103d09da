//! PolicyChat core
//!
//! The chat-and-upload interaction state machine behind the PolicyChat front
//! ends, and the HTTP client for the answer and ingestion endpoints it drives.
//!
//! - `application` - session store and the query/upload dispatchers
//! - `infrastructure` - `PolicyBackend` and its reqwest implementation
//! - `config` - TOML configuration with environment overrides
//! - `domain` - messages, tiers, upload records

pub mod application;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{
    DispatchOptions, PolicyChat, SessionState, SharedSession, UploadFailure, UploadResult,
    validate_batch,
};
pub use config::{AppConfig, ConfigError};
pub use domain::types;
pub use infrastructure::{DispatchError, HttpBackend, PolicyBackend};
