//! Key and paste handling tests

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use policychat_cli::tui::screens::chat::{ChatView, InputAction, Screen, handle_input};
use policychat_core::domain::ModelTier;

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn type_text(view: &mut ChatView, screen: Screen, text: &str) {
    for c in text.chars() {
        handle_input(view, screen, false, key(KeyCode::Char(c)));
    }
}

#[test]
fn test_ctrl_q_exits_from_every_screen() {
    for screen in [Screen::ModelSelect, Screen::ApiKey, Screen::Upload, Screen::Chat] {
        let mut view = ChatView::new();
        assert_eq!(handle_input(&mut view, screen, false, ctrl('q')), InputAction::Exit);
    }
}

#[test]
fn test_model_select_keys() {
    let mut view = ChatView::new();
    assert_eq!(view.tier_choice, ModelTier::Open);

    assert_eq!(
        handle_input(&mut view, Screen::ModelSelect, false, key(KeyCode::Down)),
        InputAction::None
    );
    assert_eq!(view.tier_choice, ModelTier::Closed);
    assert_eq!(
        handle_input(&mut view, Screen::ModelSelect, false, key(KeyCode::Enter)),
        InputAction::SelectModel(ModelTier::Closed)
    );
    assert_eq!(
        handle_input(&mut view, Screen::ModelSelect, false, key(KeyCode::Char('o'))),
        InputAction::SelectModel(ModelTier::Open)
    );
}

#[test]
fn test_api_key_editing_and_confirm() {
    let mut view = ChatView::new();
    type_text(&mut view, Screen::ApiKey, "sk-1");

    assert_eq!(view.key_field.text(), "sk-1");
    assert_eq!(
        handle_input(&mut view, Screen::ApiKey, false, key(KeyCode::Backspace)),
        InputAction::KeyEdited
    );
    assert_eq!(view.key_field.text(), "sk-");
    assert_eq!(
        handle_input(&mut view, Screen::ApiKey, false, key(KeyCode::Enter)),
        InputAction::ConfirmKey
    );
}

#[test]
fn test_typing_edits_draft() {
    let mut view = ChatView::new();

    assert_eq!(
        handle_input(&mut view, Screen::Chat, false, key(KeyCode::Char('H'))),
        InputAction::DraftEdited
    );
    type_text(&mut view, Screen::Chat, "i");
    assert_eq!(view.draft.text(), "Hi");
}

#[test]
fn test_enter_submits_question() {
    let mut view = ChatView::new();
    type_text(&mut view, Screen::Chat, "What is the leave policy?");

    assert_eq!(
        handle_input(&mut view, Screen::Chat, false, key(KeyCode::Enter)),
        InputAction::Submit
    );
    // The draft stays until the query settles.
    assert_eq!(view.draft.text(), "What is the leave policy?");
}

#[test]
fn test_enter_on_empty_draft_does_nothing() {
    let mut view = ChatView::new();
    assert_eq!(
        handle_input(&mut view, Screen::Chat, false, key(KeyCode::Enter)),
        InputAction::None
    );
}

#[test]
fn test_enter_runs_command() {
    let mut view = ChatView::new();
    type_text(&mut view, Screen::Chat, "/files");

    assert_eq!(
        handle_input(&mut view, Screen::Chat, false, key(KeyCode::Enter)),
        InputAction::Command("/files".into())
    );
    assert!(view.draft.is_empty());
}

#[test]
fn test_draft_frozen_while_query_pending() {
    let mut view = ChatView::new();
    view.draft.set("pending question");

    assert_eq!(
        handle_input(&mut view, Screen::Chat, true, key(KeyCode::Char('x'))),
        InputAction::None
    );
    assert_eq!(
        handle_input(&mut view, Screen::Chat, true, key(KeyCode::Enter)),
        InputAction::None
    );
    assert_eq!(
        handle_input(&mut view, Screen::Chat, true, Event::Paste("more".into())),
        InputAction::None
    );
    assert_eq!(view.draft.text(), "pending question");
}

#[test]
fn test_scrolling_allowed_while_pending() {
    let mut view = ChatView::new();
    assert_eq!(
        handle_input(&mut view, Screen::Chat, true, key(KeyCode::PageUp)),
        InputAction::ScrollUp
    );
    assert_eq!(
        handle_input(&mut view, Screen::Chat, true, ctrl('d')),
        InputAction::ScrollBottom
    );
}

#[test]
fn test_ctrl_o_opens_upload() {
    let mut view = ChatView::new();
    assert_eq!(
        handle_input(&mut view, Screen::Chat, false, ctrl('o')),
        InputAction::OpenUpload
    );
}

#[test]
fn test_escape_dismisses_notice_before_clearing_draft() {
    let mut view = ChatView::new();
    view.notice = Some("help".into());
    view.draft.set("draft");

    assert_eq!(
        handle_input(&mut view, Screen::Chat, false, key(KeyCode::Esc)),
        InputAction::DismissNotice
    );
    view.notice = None;
    assert_eq!(
        handle_input(&mut view, Screen::Chat, false, key(KeyCode::Esc)),
        InputAction::DraftEdited
    );
    assert!(view.draft.is_empty());
}

#[test]
fn test_upload_dialog_submits_paths() {
    let mut view = ChatView::new();
    type_text(&mut view, Screen::Upload, "a.pdf b.pdf");

    assert_eq!(
        handle_input(&mut view, Screen::Upload, false, key(KeyCode::Enter)),
        InputAction::SubmitPaths("a.pdf b.pdf".into())
    );
    assert!(view.path_field.is_empty());
}

#[test]
fn test_upload_dialog_ignores_blank_paths() {
    let mut view = ChatView::new();
    type_text(&mut view, Screen::Upload, "   ");

    assert_eq!(
        handle_input(&mut view, Screen::Upload, false, key(KeyCode::Enter)),
        InputAction::None
    );
}

#[test]
fn test_upload_dialog_escape_closes() {
    let mut view = ChatView::new();
    assert_eq!(
        handle_input(&mut view, Screen::Upload, false, key(KeyCode::Esc)),
        InputAction::CloseUpload
    );
}

#[test]
fn test_paste_on_upload_dialog_is_a_drop() {
    let mut view = ChatView::new();
    let dropped = "'/home/me/My Policies/handbook.pdf'".to_string();

    assert_eq!(
        handle_input(&mut view, Screen::Upload, false, Event::Paste(dropped.clone())),
        InputAction::Dropped(dropped)
    );
}

#[test]
fn test_paste_into_chat_inserts_text() {
    let mut view = ChatView::new();
    assert_eq!(
        handle_input(&mut view, Screen::Chat, false, Event::Paste("pasted".into())),
        InputAction::DraftEdited
    );
    assert_eq!(view.draft.text(), "pasted");
}
