//! TUI Theme
//!
//! Soft cyan for primary actions, amber for pending work, muted grays for
//! chrome.

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(100, 180, 220);
pub const HIGHLIGHT: Color = Color::Rgb(255, 200, 100);
pub const SUCCESS: Color = Color::Rgb(130, 200, 130);
pub const ERROR: Color = Color::Rgb(220, 100, 100);
pub const MUTED: Color = Color::Rgb(100, 100, 110);
pub const BORDER: Color = Color::Rgb(70, 75, 85);
pub const SELECTED_BG: Color = Color::Rgb(50, 60, 80);

pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn subtitle() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(Color::White)
}

pub fn selected() -> Style {
    Style::default()
        .bg(SELECTED_BG)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

pub fn border_active() -> Style {
    Style::default().fg(ACCENT)
}

/// Drop zone border while files are being dragged in
pub fn border_drag() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

pub fn footer() -> Style {
    Style::default().fg(MUTED)
}

pub fn loading() -> Style {
    Style::default().fg(HIGHLIGHT)
}

pub fn error_banner() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(ERROR)
        .add_modifier(Modifier::BOLD)
}

pub fn user_prefix() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn ai_prefix() -> Style {
    Style::default().fg(SUCCESS)
}

pub fn system_prefix() -> Style {
    Style::default()
        .fg(HIGHLIGHT)
        .add_modifier(Modifier::ITALIC)
}

/// Tier badge - open model
pub fn tier_open() -> Style {
    Style::default().fg(Color::Black).bg(ACCENT)
}

/// Tier badge - closed model
pub fn tier_closed() -> Style {
    Style::default().fg(Color::Black).bg(SUCCESS)
}

pub fn key_hint() -> Style {
    Style::default().fg(SUCCESS)
}

pub fn key_destructive() -> Style {
    Style::default().fg(ERROR)
}
