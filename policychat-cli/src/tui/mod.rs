//! TUI module for terminal user interface using Ratatui

pub mod screens;
mod terminal;
pub mod theme;

pub use terminal::{Tui, init_terminal, restore_terminal};
