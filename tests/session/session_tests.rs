// Session store tests - the synchronous actions on SessionState
//
// Dispatch transitions are covered by the dispatcher tests; these exercise
// the actions a front end calls directly.

use policychat_core::SessionState;
use policychat_core::domain::{ChatMessage, MessageRole, ModelTier};

#[test]
fn new_session_starts_idle() {
    let state = SessionState::new();

    assert_eq!(state.model_tier(), None);
    assert!(state.messages().is_empty());
    assert!(state.uploaded_files().is_empty());
    assert!(state.indexed_files().is_empty());
    assert_eq!(state.input(), "");
    assert!(!state.is_submitting());
    assert!(!state.is_typing());
    assert!(!state.is_uploading());
    assert!(!state.is_drag_active());
    assert!(!state.is_upload_modal_open());
    assert!(!state.is_api_key_prompt_visible());
    assert!(!state.is_query_pending());
    assert_eq!(state.last_error(), None);
}

#[test]
fn open_tier_does_not_ask_for_key() {
    let mut state = SessionState::new();
    state.select_model(ModelTier::Open);

    assert_eq!(state.model_tier(), Some(ModelTier::Open));
    assert!(!state.is_api_key_prompt_visible());
}

#[test]
fn closed_tier_opens_key_prompt_until_confirmed() {
    let mut state = SessionState::new();
    state.select_model(ModelTier::Closed);
    assert!(state.is_api_key_prompt_visible());

    state.set_api_key("sk-test");
    state.confirm_api_key();

    assert!(!state.is_api_key_prompt_visible());
    assert_eq!(state.api_key(), Some("sk-test"));
}

#[test]
fn switching_back_to_open_hides_prompt_and_keeps_key() {
    let mut state = SessionState::new();
    state.select_model(ModelTier::Closed);
    state.set_api_key("sk-test");
    state.select_model(ModelTier::Open);

    assert!(!state.is_api_key_prompt_visible());
    assert_eq!(state.api_key(), Some("sk-test"));
    assert_eq!(state.effective_api_key(), None);
}

#[test]
fn blank_key_clears_the_key() {
    let mut state = SessionState::new();
    state.set_api_key("sk-test");
    state.set_api_key("   ");
    assert_eq!(state.api_key(), None);
}

#[test]
fn effective_key_only_for_closed_tier() {
    let mut state = SessionState::new();
    state.set_api_key("sk-test");
    assert_eq!(state.effective_api_key(), None);

    state.select_model(ModelTier::Closed);
    assert_eq!(state.effective_api_key(), Some("sk-test"));
}

#[test]
fn request_api_key_depends_on_tier() {
    let mut state = SessionState::new();
    assert!(!state.request_api_key());

    state.select_model(ModelTier::Open);
    assert!(!state.request_api_key());
    assert!(!state.is_api_key_prompt_visible());

    state.select_model(ModelTier::Closed);
    state.confirm_api_key();
    assert!(state.request_api_key());
    assert!(state.is_api_key_prompt_visible());
}

#[test]
fn messages_keep_append_order() {
    let mut state = SessionState::new();
    state.append_message(ChatMessage::user("first"));
    state.append_message(ChatMessage::assistant("second"));
    state.append_message(ChatMessage::system("third"));

    let roles: Vec<MessageRole> = state.messages().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![MessageRole::User, MessageRole::Assistant, MessageRole::System]
    );
    assert_eq!(state.messages()[1].content, "second");
}

#[test]
fn removing_from_empty_list_is_ignored() {
    let mut state = SessionState::new();
    assert!(state.remove_uploaded_file(0).is_none());
    assert!(state.uploaded_files().is_empty());
}

#[test]
fn upload_modal_opens_and_closes_when_idle() {
    let mut state = SessionState::new();
    state.open_upload_modal();
    assert!(state.is_upload_modal_open());

    assert!(state.close_upload_modal());
    assert!(!state.is_upload_modal_open());
}

#[test]
fn closing_a_closed_modal_is_harmless() {
    let mut state = SessionState::new();
    assert!(state.close_upload_modal());
    assert!(state.close_upload_modal());
    assert!(!state.is_upload_modal_open());

    state.open_upload_modal();
    assert!(state.close_upload_modal());
    assert!(state.close_upload_modal());
    assert!(!state.is_upload_modal_open());
}

#[test]
fn drag_flag_follows_setter() {
    let mut state = SessionState::new();
    state.set_drag_active(true);
    assert!(state.is_drag_active());
    state.set_drag_active(false);
    assert!(!state.is_drag_active());
}

#[test]
fn input_draft_is_replaced() {
    let mut state = SessionState::new();
    state.set_input("What is the");
    state.set_input("What is the leave policy?");
    assert_eq!(state.input(), "What is the leave policy?");
}

#[test]
fn dismissing_without_error_is_harmless() {
    let mut state = SessionState::new();
    state.dismiss_error();
    assert_eq!(state.last_error(), None);
}
