//! Chat UI rendering components

use super::state::{ChatView, LineEditor, Screen};
use crate::tui::theme;
use policychat_core::SessionState;
use policychat_core::domain::{MessageRole, ModelTier};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];
const SIDE_PANEL_WIDTH: u16 = 34;
/// Largest scroll offset; `u16::MAX` itself means pinned to the bottom.
const MAX_SCROLL: u16 = u16::MAX - 1;

/// Main chat UI renderer
pub struct ChatUI;

impl ChatUI {
    /// Render whichever screen the session is on
    pub fn render(frame: &mut Frame, session: &SessionState, view: &mut ChatView, base_url: &str) {
        let screen = Screen::of(session);
        if screen == Screen::ModelSelect {
            let area = frame.area();
            Self::render_model_select(frame, area, view);
            return;
        }

        Self::render_chat(frame, session, view, base_url);

        match screen {
            Screen::ApiKey => Self::render_api_key_prompt(frame, view),
            Screen::Upload => Self::render_upload_modal(frame, session, view),
            _ => {}
        }
    }

    fn render_model_select(frame: &mut Frame, area: Rect, view: &ChatView) {
        let popup = centered_rect(56, 11, area);
        let option = |tier: ModelTier, label: &str, detail: &str| {
            let style = if view.tier_choice == tier {
                theme::selected()
            } else {
                theme::text()
            };
            vec![
                Line::from(Span::styled(format!("  {label}  "), style)),
                Line::from(Span::styled(format!("    {detail}"), theme::subtitle())),
            ]
        };

        let mut lines = vec![
            Line::from(Span::styled("Choose a model", theme::title())),
            Line::from(""),
        ];
        lines.extend(option(
            ModelTier::Open,
            "Open model",
            "Hosted default model, no key needed",
        ));
        lines.push(Line::from(""));
        lines.extend(option(
            ModelTier::Closed,
            "Closed model",
            "Uses your own API key",
        ));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("↑/↓", theme::key_hint()),
            Span::styled(": Move │ ", theme::footer()),
            Span::styled("Enter", theme::key_hint()),
            Span::styled(": Select │ ", theme::footer()),
            Span::styled("q", theme::key_destructive()),
            Span::styled(": Exit", theme::footer()),
        ]));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_active())
            .title(" PolicyChat ");
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Left),
            popup,
        );
    }

    fn render_chat(frame: &mut Frame, session: &SessionState, view: &mut ChatView, base_url: &str) {
        let area = frame.area();
        let banner_height = if session.last_error().is_some() { 1 } else { 0 };
        let notice_height = view
            .notice
            .as_ref()
            .map(|n| u16::try_from(n.lines().count()).unwrap_or(u16::MAX).saturating_add(2).min(14))
            .unwrap_or(0);

        // Layout: Status bar, Error banner, Body, Notice, Input, Help bar
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(banner_height),
                Constraint::Min(5),
                Constraint::Length(notice_height),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        Self::render_status_bar(frame, chunks[0], session, view, base_url);
        if let Some(error) = session.last_error() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(format!(" ⚠ {error} "), theme::error_banner()))),
                chunks[1],
            );
        }

        let body = chunks[2];
        if session.uploaded_files().is_empty() {
            Self::render_messages(frame, body, session, view);
        } else {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(20), Constraint::Length(SIDE_PANEL_WIDTH)])
                .split(body);
            Self::render_messages(frame, columns[0], session, view);
            Self::render_uploaded_files(frame, columns[1], session);
        }

        if let Some(notice) = &view.notice {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border())
                .title(" Info (Esc to close) ");
            frame.render_widget(
                Paragraph::new(notice.as_str())
                    .block(block)
                    .wrap(Wrap { trim: false }),
                chunks[3],
            );
        }

        Self::render_input(frame, chunks[4], session, view);
        Self::render_help_bar(frame, chunks[5], session);
    }

    /// Render status bar with tier, backend and activity
    fn render_status_bar(frame: &mut Frame, area: Rect, session: &SessionState, view: &ChatView, base_url: &str) {
        let tier_badge = match session.model_tier() {
            Some(ModelTier::Closed) => Span::styled(" Closed ", theme::tier_closed()),
            _ => Span::styled(" Open ", theme::tier_open()),
        };

        let activity = if session.is_submitting() || session.is_uploading() {
            let label = if session.is_uploading() { "uploading" } else { "asking" };
            Span::styled(
                format!(" {} {label} ", SPINNER[view.loading_frame]),
                theme::loading(),
            )
        } else {
            Span::raw("")
        };

        let key_state = match (session.model_tier(), session.api_key()) {
            (Some(ModelTier::Closed), Some(_)) => Span::styled(" │ key set", theme::footer()),
            (Some(ModelTier::Closed), None) => Span::styled(" │ no key", theme::key_destructive()),
            _ => Span::raw(""),
        };

        let status_msg = view
            .status_message
            .as_ref()
            .map(|s| Span::styled(format!(" │ {s} "), theme::footer()))
            .unwrap_or_else(|| Span::raw(""));

        let status_line = Line::from(vec![
            Span::styled(" 💬 PolicyChat ", theme::title()),
            tier_badge,
            key_state,
            Span::styled(format!(" │ {base_url} "), theme::footer()),
            Span::styled(
                format!("│ {} docs ", session.uploaded_files().len()),
                theme::footer(),
            ),
            activity,
            status_msg,
        ]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme::border());
        frame.render_widget(Paragraph::new(status_line).block(block), area);
    }

    /// Render messages area
    fn render_messages(frame: &mut Frame, area: Rect, session: &SessionState, view: &mut ChatView) {
        let inner_height = area.height as usize;
        let mut lines: Vec<Line> = Vec::new();

        if session.messages().is_empty() {
            lines.push(Line::from(Span::styled(
                "Ask about your organization's policies, or press Ctrl+O to upload PDFs.",
                theme::subtitle(),
            )));
        }

        for msg in session.messages() {
            let (prefix, style) = match msg.role {
                MessageRole::User => ("You: ", theme::user_prefix()),
                MessageRole::Assistant => ("AI: ", theme::ai_prefix()),
                MessageRole::System => ("System: ", theme::system_prefix()),
            };
            let time = msg.sent_at.format("%H:%M").to_string();

            let mut content_lines = msg.content.lines();
            let first = content_lines.next().unwrap_or("");
            lines.push(Line::from(vec![
                Span::styled(format!("{time} "), theme::footer()),
                Span::styled(prefix, style),
                Span::raw(first.to_string()),
            ]));
            let indent = " ".repeat(prefix.len() + time.len() + 1);
            for line in content_lines {
                lines.push(Line::from(format!("{indent}{line}")));
            }
            lines.push(Line::from(""));
        }

        if session.is_typing() {
            lines.push(Line::from(Span::styled(
                format!("AI: {} Thinking...", SPINNER[view.loading_frame]),
                theme::loading(),
            )));
        }

        // Wrapped lines can exceed this count; scrolling is approximate.
        let max_scroll = u16::try_from(lines.len().saturating_sub(inner_height))
            .map_or(MAX_SCROLL, |rows| rows.min(MAX_SCROLL));
        view.max_scroll = max_scroll;
        let scroll = if view.scroll_offset == u16::MAX {
            max_scroll
        } else {
            view.scroll_offset.min(max_scroll)
        };

        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(theme::border());
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0)),
            area,
        );
    }

    fn render_uploaded_files(frame: &mut Frame, area: Rect, session: &SessionState) {
        let mut lines = Vec::new();
        for (i, record) in session.uploaded_files().iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("{}. ", i + 1), theme::footer()),
                Span::styled("✓ ", theme::ai_prefix()),
                Span::styled(record.name.clone(), theme::text()),
            ]));
            lines.push(Line::from(Span::styled(
                format!("   {}", record.message),
                theme::subtitle(),
            )));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border())
            .title(" Uploaded ");
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    /// Render input area
    fn render_input(frame: &mut Frame, area: Rect, session: &SessionState, view: &ChatView) {
        let pending = session.is_query_pending();
        let (display, style) = if pending {
            ("Waiting for response...".to_string(), theme::footer())
        } else if view.draft.is_empty() {
            (
                "Ask about your organization's policies...".to_string(),
                theme::footer(),
            )
        } else {
            (with_cursor(&view.draft, false), theme::text())
        };

        let input_line = Line::from(vec![Span::styled("> ", theme::user_prefix()), Span::styled(display, style)]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if pending { theme::border() } else { theme::border_active() })
            .title(if crate::commands::is_command(view.draft.text()) {
                " Command "
            } else {
                " Message "
            });
        frame.render_widget(Paragraph::new(input_line).block(block), area);
    }

    /// Render help bar
    fn render_help_bar(frame: &mut Frame, area: Rect, session: &SessionState) {
        let help_text = if session.is_query_pending() {
            Line::from(Span::styled(" Processing... Please wait ", theme::loading()))
        } else {
            Line::from(vec![
                Span::styled(" Enter", theme::key_hint()),
                Span::raw(": Send │ "),
                Span::styled("Ctrl+O", theme::key_hint()),
                Span::raw(": Upload │ "),
                Span::styled("/help", theme::key_hint()),
                Span::raw(": Commands │ "),
                Span::styled("PageUp/Down", theme::key_hint()),
                Span::raw(": Scroll │ "),
                Span::styled("Ctrl+Q", theme::key_destructive()),
                Span::raw(": Exit "),
            ])
        };
        frame.render_widget(Paragraph::new(help_text), area);
    }

    fn render_api_key_prompt(frame: &mut Frame, view: &ChatView) {
        let popup = centered_rect(60, 7, frame.area());
        frame.render_widget(Clear, popup);

        let lines = vec![
            Line::from(Span::styled(
                "The closed model needs your API key.",
                theme::subtitle(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Key: ", theme::user_prefix()),
                Span::styled(with_cursor(&view.key_field, true), theme::text()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", theme::key_hint()),
                Span::styled(": Save", theme::footer()),
            ]),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_active())
            .title(" API key ");
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }

    fn render_upload_modal(frame: &mut Frame, session: &SessionState, view: &ChatView) {
        let popup = centered_rect(70, 12, frame.area());
        frame.render_widget(Clear, popup);

        let zone_style = if session.is_drag_active() {
            theme::border_drag()
        } else {
            theme::border()
        };
        let zone_text = if session.is_uploading() {
            Line::from(Span::styled("Uploading documents...", theme::loading()))
        } else if session.is_drag_active() {
            Line::from(Span::styled("Reading dropped files...", theme::loading()))
        } else {
            Line::from(Span::styled(
                "Drop PDF files onto the terminal, or type paths below",
                theme::subtitle(),
            ))
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_active())
            .title(" Upload documents ");
        frame.render_widget(block, popup);

        frame.render_widget(
            Paragraph::new(zone_text).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(zone_style),
            ),
            rows[0],
        );

        let path_display = if view.path_field.is_empty() {
            Span::styled("~/policies/handbook.pdf ...", theme::footer())
        } else {
            Span::styled(with_cursor(&view.path_field, false), theme::text())
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::styled("Paths: ", theme::user_prefix()), path_display]))
                .block(Block::default().borders(Borders::ALL).border_style(theme::border())),
            rows[1],
        );

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Only PDF files are supported • Maximum file size: 10MB",
                theme::subtitle(),
            )),
            rows[2],
        );

        let hint: Vec<Span> = if session.is_uploading() {
            vec![Span::styled("Please wait until the upload finishes", theme::loading())]
        } else {
            vec![
                Span::styled("Enter", theme::key_hint()),
                Span::styled(": Upload │ ", theme::footer()),
                Span::styled("Esc", theme::key_destructive()),
                Span::styled(": Close", theme::footer()),
            ]
        };
        frame.render_widget(Paragraph::new(Line::from(hint)), rows[3]);
    }
}

/// Field contents with a cursor marker; `masked` hides the characters.
fn with_cursor(field: &LineEditor, masked: bool) -> String {
    let mut chars: Vec<char> = if masked {
        field.text().chars().map(|_| '•').collect()
    } else {
        field.text().chars().collect()
    };
    if field.cursor() >= chars.len() {
        chars.push('_');
    } else {
        chars.insert(field.cursor(), '|');
    }
    chars.into_iter().collect()
}

/// Rect of `percent_x` width and fixed `height`, centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
