//! PolicyChat controller: the session store wired to a backend

use super::session::{SessionState, SharedSession};
use crate::config::AppConfig;
use crate::constants::{BYTES_PER_MB, DEFAULT_MAX_UPLOAD_MB, DEFAULT_TYPING_DELAY_MS};
use crate::infrastructure::PolicyBackend;
use std::sync::Arc;
use std::time::Duration;

/// Tunables the dispatchers read on every attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Pause between a successful answer arriving and it being revealed
    pub typing_delay: Duration,
    pub max_upload_mb: u64,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            typing_delay: Duration::from_millis(DEFAULT_TYPING_DELAY_MS),
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
        }
    }
}

impl DispatchOptions {
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }

    pub fn with_max_upload_mb(mut self, mb: u64) -> Self {
        self.max_upload_mb = mb;
        self
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb.saturating_mul(BYTES_PER_MB)
    }
}

impl From<&AppConfig> for DispatchOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            typing_delay: config.typing_delay,
            max_upload_mb: config.max_upload_mb,
        }
    }
}

/// Owns the shared session and dispatches network-bound actions against `B`.
///
/// Cloning is cheap; clones share the same session and backend, which is how
/// front ends hand a dispatch to a spawned task.
pub struct PolicyChat<B> {
    pub(crate) session: SharedSession,
    pub(crate) backend: Arc<B>,
    pub(crate) options: DispatchOptions,
}

impl<B> Clone for PolicyChat<B> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            backend: self.backend.clone(),
            options: self.options.clone(),
        }
    }
}

impl<B> PolicyChat<B>
where
    B: PolicyBackend + 'static,
{
    pub fn new(backend: B, options: DispatchOptions) -> Self {
        Self::with_session(Arc::new(backend), SessionState::new().shared(), options)
    }

    pub fn with_session(backend: Arc<B>, session: SharedSession, options: DispatchOptions) -> Self {
        Self {
            session,
            backend,
            options,
        }
    }

    pub fn session(&self) -> SharedSession {
        self.session.clone()
    }

    pub fn options(&self) -> &DispatchOptions {
        &self.options
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
