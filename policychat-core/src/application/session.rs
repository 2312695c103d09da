//! Session state store
//!
//! All interaction state of one chat session lives in [`SessionState`]. It is
//! only changed through the named actions below (and the dispatch transitions
//! in `query` and `upload`), each of which completes synchronously, so a
//! renderer holding the lock never observes a half-applied action.

use crate::domain::{ChatMessage, IndexedFile, ModelTier, UploadedFileRecord};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Store handle shared between the renderer and in-flight dispatches
pub type SharedSession = Arc<Mutex<SessionState>>;

#[derive(Debug, Default)]
pub struct SessionState {
    model_tier: Option<ModelTier>,
    api_key: Option<String>,
    api_key_prompt_visible: bool,
    input: String,
    messages: Vec<ChatMessage>,
    uploaded_files: Vec<UploadedFileRecord>,
    indexed_files: Vec<IndexedFile>,
    pub(crate) is_submitting: bool,
    pub(crate) is_typing: bool,
    pub(crate) is_uploading: bool,
    is_drag_active: bool,
    pub(crate) is_upload_modal_open: bool,
    pub(crate) last_error: Option<String>,
    pub(crate) pending_query: Option<u64>,
    pub(crate) pending_upload: Option<u64>,
    next_ticket: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    // ---- actions ----

    /// Choose the answer model. Only the closed tier asks for a key.
    pub fn select_model(&mut self, tier: ModelTier) {
        debug!(tier = tier.as_str(), "Model tier selected");
        self.model_tier = Some(tier);
        self.api_key_prompt_visible = tier.requires_api_key();
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.api_key = if key.trim().is_empty() {
            None
        } else {
            Some(key)
        };
    }

    /// Hide the key prompt, keeping whatever was entered.
    pub fn confirm_api_key(&mut self) {
        self.api_key_prompt_visible = false;
    }

    /// Reopen the key prompt. Returns false when the tier has no key.
    pub fn request_api_key(&mut self) -> bool {
        if self.model_tier.is_some_and(ModelTier::requires_api_key) {
            self.api_key_prompt_visible = true;
        }
        self.api_key_prompt_visible
    }

    pub fn append_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Remove the record at `index`. Out-of-range indices are ignored.
    pub fn remove_uploaded_file(&mut self, index: usize) -> Option<UploadedFileRecord> {
        if index < self.uploaded_files.len() {
            Some(self.uploaded_files.remove(index))
        } else {
            None
        }
    }

    pub fn open_upload_modal(&mut self) {
        self.is_upload_modal_open = true;
    }

    /// Close the modal unless a batch is still uploading.
    pub fn close_upload_modal(&mut self) -> bool {
        if self.is_uploading {
            return false;
        }
        self.is_upload_modal_open = false;
        true
    }

    pub fn set_drag_active(&mut self, active: bool) {
        self.is_drag_active = active;
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    pub(crate) fn set_indexed_files(&mut self, files: Vec<IndexedFile>) {
        self.indexed_files = files;
    }

    pub(crate) fn extend_uploaded_files(&mut self, records: Vec<UploadedFileRecord>) {
        self.uploaded_files.extend(records);
    }

    pub(crate) fn clear_input(&mut self) {
        self.input.clear();
    }

    pub(crate) fn issue_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }

    // ---- read access ----

    pub fn model_tier(&self) -> Option<ModelTier> {
        self.model_tier
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// The key to attach to outgoing questions: only for the closed tier.
    pub fn effective_api_key(&self) -> Option<&str> {
        match self.model_tier {
            Some(ModelTier::Closed) => self.api_key(),
            _ => None,
        }
    }

    pub fn is_api_key_prompt_visible(&self) -> bool {
        self.api_key_prompt_visible
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn uploaded_files(&self) -> &[UploadedFileRecord] {
        &self.uploaded_files
    }

    pub fn indexed_files(&self) -> &[IndexedFile] {
        &self.indexed_files
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    pub fn is_drag_active(&self) -> bool {
        self.is_drag_active
    }

    pub fn is_upload_modal_open(&self) -> bool {
        self.is_upload_modal_open
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True from submission until the reply has been revealed.
    pub fn is_query_pending(&self) -> bool {
        self.pending_query.is_some()
    }
}
