//! View-local chat state
//!
//! Everything here is presentation only: cursor positions, scroll, spinner
//! frames. Conversation and upload state lives in the session store.

use policychat_core::SessionState;
use policychat_core::domain::ModelTier;

/// Which surface currently owns the keyboard, derived from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    ModelSelect,
    ApiKey,
    Upload,
    Chat,
}

impl Screen {
    pub fn of(session: &SessionState) -> Self {
        if session.model_tier().is_none() {
            Screen::ModelSelect
        } else if session.is_api_key_prompt_visible() {
            Screen::ApiKey
        } else if session.is_upload_modal_open() {
            Screen::Upload
        } else {
            Screen::Chat
        }
    }
}

/// Single-line text field with a cursor counted in characters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    text: String,
    cursor: usize,
}

impl LineEditor {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the contents, moving the cursor to the end.
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
        }
    }

    /// Delete character before cursor (backspace)
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.text.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete character at cursor (delete key)
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// Chat screen view state
pub struct ChatView {
    pub draft: LineEditor,
    pub key_field: LineEditor,
    pub path_field: LineEditor,
    /// Highlighted entry on the model selector
    pub tier_choice: ModelTier,
    /// Scroll offset for messages; `u16::MAX` pins the view to the bottom
    pub scroll_offset: u16,
    /// Largest useful offset, recorded by the last render
    pub max_scroll: u16,
    pub loading_frame: usize,
    /// Transient status line (command feedback, local file errors)
    pub status_message: Option<String>,
    /// Multi-line panel shown above the input (help, file listings)
    pub notice: Option<String>,
}

impl Default for ChatView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatView {
    pub fn new() -> Self {
        Self {
            draft: LineEditor::default(),
            key_field: LineEditor::default(),
            path_field: LineEditor::default(),
            tier_choice: ModelTier::Open,
            scroll_offset: u16::MAX,
            max_scroll: 0,
            loading_frame: 0,
            status_message: None,
            notice: None,
        }
    }

    pub fn toggle_tier_choice(&mut self) {
        self.tier_choice = match self.tier_choice {
            ModelTier::Open => ModelTier::Closed,
            ModelTier::Closed => ModelTier::Open,
        };
    }

    pub fn scroll_up(&mut self) {
        if self.scroll_offset == u16::MAX {
            self.scroll_offset = self.max_scroll;
        }
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset >= self.max_scroll {
            self.scroll_offset = u16::MAX;
        } else {
            self.scroll_offset += 1;
        }
    }

    pub fn scroll_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = u16::MAX;
    }

    pub fn tick_loading(&mut self) {
        self.loading_frame = (self.loading_frame + 1) % 4;
    }

    /// Pull the session's draft into the editor after the store changed it
    /// (a settled query clears the draft).
    pub fn sync_draft(&mut self, session: &SessionState) {
        if self.draft.text() != session.input() {
            self.draft.set(session.input());
        }
    }
}
