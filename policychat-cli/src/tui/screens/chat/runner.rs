//! Chat runner - main event loop coordinator

use super::input::{InputAction, handle_input};
use super::state::{ChatView, Screen};
use super::ui::ChatUI;
use crate::commands::{CommandResult, HELP_TEXT, load_files, parse_command, split_paths};
use crate::tui::terminal::{Tui, init_terminal, restore_terminal};
use crossterm::event;
use policychat_core::domain::ModelTier;
use policychat_core::{PolicyBackend, PolicyChat};
use std::error::Error;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Result of chat session
pub enum ChatResult {
    Exit,
    Error(String),
}

/// Feedback from spawned work that is not part of the session store
enum UiEvent {
    Status(String),
    Notice(String),
}

/// Run the TUI chat interface
pub async fn run_chat<B>(chat: PolicyChat<B>, base_url: String) -> Result<ChatResult, Box<dyn Error>>
where
    B: PolicyBackend + 'static,
{
    let mut terminal = init_terminal()?;
    let mut view = ChatView::new();

    let result = run_chat_loop(&mut terminal, &mut view, chat, &base_url).await;

    restore_terminal()?;
    result
}

/// Internal chat loop
async fn run_chat_loop<B>(
    terminal: &mut Tui,
    view: &mut ChatView,
    chat: PolicyChat<B>,
    base_url: &str,
) -> Result<ChatResult, Box<dyn Error>>
where
    B: PolicyBackend + 'static,
{
    let (ui_tx, mut ui_rx) = mpsc::channel::<UiEvent>(16);
    let session = chat.session();
    let mut seen_messages = 0;

    loop {
        let (screen, busy, query_pending) = {
            let state = session.lock().await;
            view.sync_draft(&state);
            if state.messages().len() != seen_messages || state.is_typing() {
                seen_messages = state.messages().len();
                view.scroll_to_bottom();
            }
            terminal.draw(|frame| {
                ChatUI::render(frame, &state, view, base_url);
            })?;
            (
                Screen::of(&state),
                state.is_query_pending() || state.is_uploading() || state.is_drag_active(),
                state.is_query_pending(),
            )
        };

        while let Ok(event) = ui_rx.try_recv() {
            match event {
                UiEvent::Status(text) => view.status_message = Some(text),
                UiEvent::Notice(text) => view.notice = Some(text),
            }
        }

        let timeout = if busy {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(50)
        };

        if !event::poll(timeout)? {
            if busy {
                view.tick_loading();
            }
            continue;
        }

        let action = handle_input(view, screen, query_pending, event::read()?);
        match action {
            InputAction::None => {}

            InputAction::Exit => return Ok(ChatResult::Exit),

            InputAction::SelectModel(tier) => {
                let mut state = session.lock().await;
                state.select_model(tier);
                view.key_field.set(state.api_key().unwrap_or(""));
                view.status_message = Some(format!("Model: {tier}"));
            }

            InputAction::KeyEdited => {
                session.lock().await.set_api_key(view.key_field.text());
            }

            InputAction::ConfirmKey => {
                let mut state = session.lock().await;
                state.set_api_key(view.key_field.text());
                state.confirm_api_key();
                if state.api_key().is_none() {
                    view.status_message = Some("No API key set; requests go out unauthenticated".into());
                }
            }

            InputAction::DraftEdited => {
                session.lock().await.set_input(view.draft.text());
            }

            InputAction::Submit => {
                view.notice = None;
                let chat = chat.clone();
                tokio::spawn(async move {
                    chat.submit_input().await;
                });
            }

            InputAction::Command(cmd) => {
                session.lock().await.set_input("");
                if handle_command(&chat, view, &ui_tx, &cmd).await {
                    return Ok(ChatResult::Exit);
                }
            }

            InputAction::OpenUpload => {
                view.path_field.clear();
                session.lock().await.open_upload_modal();
            }

            InputAction::CloseUpload => {
                if !session.lock().await.close_upload_modal() {
                    view.status_message = Some("Upload in progress".into());
                }
            }

            InputAction::SubmitPaths(raw) => {
                spawn_upload(&chat, &ui_tx, split_paths(&raw), false);
            }

            InputAction::Dropped(raw) => {
                let paths = split_paths(&raw);
                if !paths.is_empty() {
                    session.lock().await.set_drag_active(true);
                    spawn_upload(&chat, &ui_tx, paths, true);
                }
            }

            InputAction::DismissNotice => view.notice = None,
            InputAction::ScrollUp => view.scroll_up(),
            InputAction::ScrollDown => view.scroll_down(),
            InputAction::ScrollTop => view.scroll_top(),
            InputAction::ScrollBottom => view.scroll_to_bottom(),
        }
    }
}

/// Read `paths` and upload them as one batch in the background.
fn spawn_upload<B>(chat: &PolicyChat<B>, tx: &mpsc::Sender<UiEvent>, paths: Vec<String>, dropped: bool)
where
    B: PolicyBackend + 'static,
{
    let chat = chat.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let files = match load_files(&paths).await {
            Ok(files) => files,
            Err(message) => {
                if dropped {
                    chat.session().lock().await.set_drag_active(false);
                }
                let _ = tx.send(UiEvent::Status(message)).await;
                return;
            }
        };

        let outcome = if dropped {
            chat.drop_files(files).await
        } else {
            chat.submit_upload(files).await
        };

        match outcome {
            Some(Ok(records)) => {
                let _ = tx
                    .send(UiEvent::Status(format!("Uploaded {} file(s)", records.len())))
                    .await;
            }
            // The failure is on the error banner already.
            Some(Err(_)) => {}
            None => {
                let _ = tx
                    .send(UiEvent::Status("Another upload is still running".into()))
                    .await;
            }
        }
    });
}

/// Handle command execution. Returns true when the chat should exit.
async fn handle_command<B>(
    chat: &PolicyChat<B>,
    view: &mut ChatView,
    tx: &mpsc::Sender<UiEvent>,
    input: &str,
) -> bool
where
    B: PolicyBackend + 'static,
{
    let result = parse_command(input);
    debug!(?result, "Chat command");
    let session = chat.session();

    match result {
        CommandResult::None => {}

        CommandResult::ShowHelp => view.notice = Some(HELP_TEXT.to_string()),

        CommandResult::Upload(paths) => {
            if paths.is_empty() {
                view.path_field.clear();
                session.lock().await.open_upload_modal();
            } else {
                spawn_upload(chat, tx, paths, false);
            }
        }

        CommandResult::ListFiles => {
            let state = session.lock().await;
            view.notice = Some(if state.uploaded_files().is_empty() {
                "No documents uploaded in this session.".to_string()
            } else {
                let lines: Vec<String> = state
                    .uploaded_files()
                    .iter()
                    .enumerate()
                    .map(|(i, f)| format!("{}. {} - {}", i + 1, f.name, f.message))
                    .collect();
                format!("Uploaded documents:\n{}", lines.join("\n"))
            });
        }

        CommandResult::Remove(index) => {
            view.status_message = Some(match session.lock().await.remove_uploaded_file(index) {
                Some(record) => format!("Removed {}", record.name),
                None => format!("No uploaded document number {}", index + 1),
            });
        }

        CommandResult::InvalidRemove(arg) => {
            view.status_message = Some(format!("Usage: /remove N (got '{arg}')"));
        }

        CommandResult::Library => {
            view.status_message = Some("Loading indexed documents...".into());
            let chat = chat.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                if chat.refresh_indexed_files().await.is_err() {
                    return;
                }
                let listing = library_listing(&chat).await;
                let _ = tx.send(UiEvent::Notice(listing)).await;
            });
        }

        CommandResult::Model(tier) => {
            let mut state = session.lock().await;
            state.select_model(tier);
            if tier == ModelTier::Closed {
                view.key_field.set(state.api_key().unwrap_or(""));
            }
            view.status_message = Some(format!("Model: {tier}"));
        }

        CommandResult::InvalidModel(arg) => {
            view.status_message = Some(format!("Unknown model '{arg}'. Use /model open or /model closed"));
        }

        CommandResult::ApiKey => {
            let mut state = session.lock().await;
            if state.request_api_key() {
                view.key_field.set(state.api_key().unwrap_or(""));
            } else {
                view.status_message = Some("The open model does not use an API key".into());
            }
        }

        CommandResult::ClearError => session.lock().await.dismiss_error(),

        CommandResult::Exit => return true,

        CommandResult::Unknown(cmd) => {
            view.status_message = Some(format!("Unknown command: {cmd}. Type /help for available commands."));
        }
    }

    false
}

async fn library_listing<B>(chat: &PolicyChat<B>) -> String
where
    B: PolicyBackend + 'static,
{
    let session = chat.session();
    let state = session.lock().await;
    if state.indexed_files().is_empty() {
        return "The service has no indexed documents.".to_string();
    }
    let lines: Vec<String> = state
        .indexed_files()
        .iter()
        .map(|f| match &f.upload_timestamp {
            Some(ts) => format!("• {} ({} chunks, {ts})", f.filename, f.chunk_count),
            None => format!("• {} ({} chunks)", f.filename, f.chunk_count),
        })
        .collect();
    format!("Indexed documents:\n{}", lines.join("\n"))
}
