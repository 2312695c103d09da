//! TUI chat screen
//!
//! - state.rs: view-local state (editors, scroll, spinner)
//! - ui.rs: rendering of the selector, chat, key prompt and upload dialog
//! - input.rs: key and paste handling
//! - runner.rs: event loop wiring the view to the session store

mod input;
mod runner;
mod state;
mod ui;

pub use input::{InputAction, handle_input};
pub use runner::{ChatResult, run_chat};
pub use state::{ChatView, LineEditor, Screen};
pub use ui::ChatUI;
