//! Chat input handling

use super::state::{ChatView, LineEditor, Screen};
use crate::commands::is_command;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use policychat_core::domain::ModelTier;

/// Input action result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// No action needed
    None,
    /// Exit the chat
    Exit,
    /// Pick a model tier on the selector
    SelectModel(ModelTier),
    /// The API key field changed
    KeyEdited,
    /// Close the API key prompt
    ConfirmKey,
    /// The question draft changed
    DraftEdited,
    /// Submit the current draft as a question
    Submit,
    /// Execute a command
    Command(String),
    OpenUpload,
    CloseUpload,
    /// Upload the paths typed into the upload dialog
    SubmitPaths(String),
    /// Paths dropped (pasted) onto the upload dialog
    Dropped(String),
    DismissNotice,
    ScrollUp,
    ScrollDown,
    ScrollTop,
    ScrollBottom,
}

/// Handle a terminal event for the given screen and update view state
pub fn handle_input(view: &mut ChatView, screen: Screen, query_pending: bool, event: Event) -> InputAction {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
                return InputAction::Exit;
            }
            match screen {
                Screen::ModelSelect => handle_model_select(view, key),
                Screen::ApiKey => handle_api_key(view, key),
                Screen::Upload => handle_upload(view, key),
                Screen::Chat => handle_chat(view, key, query_pending),
            }
        }
        Event::Paste(text) => match screen {
            Screen::Upload => InputAction::Dropped(text),
            Screen::ApiKey => {
                view.key_field.insert_str(text.trim());
                InputAction::KeyEdited
            }
            Screen::Chat if !query_pending => {
                view.draft.insert_str(&text);
                InputAction::DraftEdited
            }
            _ => InputAction::None,
        },
        _ => InputAction::None,
    }
}

fn handle_model_select(view: &mut ChatView, key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
            view.toggle_tier_choice();
            InputAction::None
        }
        KeyCode::Char('o') => InputAction::SelectModel(ModelTier::Open),
        KeyCode::Char('c') => InputAction::SelectModel(ModelTier::Closed),
        KeyCode::Enter | KeyCode::Char(' ') => InputAction::SelectModel(view.tier_choice),
        KeyCode::Esc | KeyCode::Char('q') => InputAction::Exit,
        _ => InputAction::None,
    }
}

fn handle_api_key(view: &mut ChatView, key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => InputAction::ConfirmKey,
        _ if edit_field(&mut view.key_field, key) => InputAction::KeyEdited,
        _ => InputAction::None,
    }
}

fn handle_upload(view: &mut ChatView, key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Esc => InputAction::CloseUpload,
        KeyCode::Enter => {
            if view.path_field.text().trim().is_empty() {
                InputAction::None
            } else {
                InputAction::SubmitPaths(view.path_field.take())
            }
        }
        _ => {
            edit_field(&mut view.path_field, key);
            InputAction::None
        }
    }
}

fn handle_chat(view: &mut ChatView, key: KeyEvent, query_pending: bool) -> InputAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Up | KeyCode::PageUp => return InputAction::ScrollUp,
        KeyCode::Down | KeyCode::PageDown => return InputAction::ScrollDown,
        KeyCode::Char('u') if ctrl => return InputAction::ScrollTop,
        KeyCode::Char('d') if ctrl => return InputAction::ScrollBottom,
        KeyCode::Char('o') if ctrl => return InputAction::OpenUpload,
        _ => {}
    }

    // The draft is frozen until the pending question settles.
    if query_pending {
        return InputAction::None;
    }

    match key.code {
        KeyCode::Enter => {
            if view.draft.is_empty() {
                InputAction::None
            } else if is_command(view.draft.text()) {
                InputAction::Command(view.draft.take())
            } else {
                InputAction::Submit
            }
        }
        KeyCode::Esc => {
            if view.notice.is_some() {
                InputAction::DismissNotice
            } else if !view.draft.is_empty() {
                view.draft.clear();
                InputAction::DraftEdited
            } else {
                InputAction::None
            }
        }
        KeyCode::Char('c') if ctrl => {
            view.draft.clear();
            InputAction::DraftEdited
        }
        KeyCode::Tab => {
            view.draft.insert_str("  ");
            InputAction::DraftEdited
        }
        _ if edit_field(&mut view.draft, key) => InputAction::DraftEdited,
        _ => InputAction::None,
    }
}

/// Apply a plain editing key to a field. Returns whether the text changed.
fn edit_field(field: &mut LineEditor, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            field.insert_char(c);
            true
        }
        KeyCode::Backspace => {
            field.delete_char();
            true
        }
        KeyCode::Delete => {
            field.delete_char_forward();
            true
        }
        KeyCode::Left => {
            field.move_left();
            false
        }
        KeyCode::Right => {
            field.move_right();
            false
        }
        KeyCode::Home => {
            field.move_home();
            false
        }
        KeyCode::End => {
            field.move_end();
            false
        }
        _ => false,
    }
}
