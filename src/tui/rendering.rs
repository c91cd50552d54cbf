use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;
use crate::config::Settings;
use crate::models::SessionInfo;
use crate::utils::{format_timestamp, shorten};

/// State shared with the renderer each frame.
pub struct RenderState<'a> {
    pub search_query: &'a str,
    pub total_count: usize,
    pub settings: &'a Settings,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(
    frame: &mut Frame,
    sessions: &[&SessionInfo],
    selected_idx: usize,
    state: &RenderState,
) {
    let layout = AppLayout::new(frame.area());

    render_session_list(frame, layout.results_area, sessions, selected_idx);
    render_preview(frame, layout.preview_area, sessions.get(selected_idx).copied());
    render_status_bar(frame, layout.status_area, sessions.len(), selected_idx, state);
}

fn session_date(info: &SessionInfo) -> String {
    match &info.started_at {
        Some(ts) => format_timestamp(ts),
        None => "unknown date".to_string(),
    }
}

fn render_session_list(
    frame: &mut Frame,
    area: Rect,
    sessions: &[&SessionInfo],
    selected_idx: usize,
) {
    let items: Vec<ListItem> = sessions
        .iter()
        .enumerate()
        .map(|(idx, info)| {
            let preview = shorten(info.preview.as_deref().unwrap_or("(no preview)"), 50);
            let content = format!("{} | {} | {}", session_date(info), info.label(), preview);

            let style = if idx == selected_idx {
                Style::default()
                    .fg(Color::Rgb(250, 250, 250))
                    .bg(Color::Rgb(16, 185, 129))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(113, 113, 122))
            };

            ListItem::new(content).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(113, 113, 122)))
            .title(" Sessions "),
    );

    frame.render_widget(list, area);
}

fn meta_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Rgb(113, 113, 122))),
        Span::raw(value),
    ])
}

fn render_preview(frame: &mut Frame, area: Rect, session: Option<&SessionInfo>) {
    let content = if let Some(info) = session {
        let mut lines = vec![
            meta_line("Session: ", info.label()),
            meta_line("Started: ", session_date(info)),
        ];
        if let Some(cwd) = &info.cwd {
            lines.push(meta_line("CWD: ", cwd.clone()));
        }
        if let Some(repo) = &info.repo_url {
            let repo = match &info.branch {
                Some(branch) => format!("{} ({})", repo, branch),
                None => repo.clone(),
            };
            lines.push(meta_line("Repo: ", repo));
        }
        if info.skip_count > 0 {
            lines.push(meta_line("Warnings: ", info.skip_count.to_string()));
        }
        lines.push(Line::from(""));
        if let Some(preview) = &info.preview {
            for line in preview.lines() {
                lines.push(Line::from(line.to_string()));
            }
        }

        Text::from(lines)
    } else {
        Text::from("No session selected")
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(113, 113, 122)))
                .title(" Preview "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn toggle_label(name: &str, on: bool) -> String {
    format!("{}:{}", name, if on { "on" } else { "off" })
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    matched_count: usize,
    selected_idx: usize,
    state: &RenderState,
) {
    let (status_text, style) = if let Some(msg) = state.status_message {
        let fg = match msg.message_type {
            MessageType::Success => Color::Rgb(16, 185, 129),
            MessageType::Error => Color::Rgb(239, 68, 68),
        };
        (format!(" {} ", msg.text), Style::default().fg(fg).bg(Color::Rgb(24, 24, 27)))
    } else {
        let mut parts = vec![];

        if matched_count < state.total_count {
            parts.push(format!("{}/{} sessions", matched_count, state.total_count));
        } else {
            parts.push(format!("{} sessions", state.total_count));
        }
        if matched_count > 0 {
            parts.push(format!("session {}/{}", selected_idx + 1, matched_count));
        }

        parts.push(toggle_label("tools", state.settings.include_tools));
        parts.push(toggle_label("reasoning", state.settings.include_reasoning));
        parts.push(toggle_label("redact", state.settings.redact_paths));

        if !state.search_query.is_empty() {
            parts.push("Esc: clear".to_string());
        }
        parts.push("Enter: export".to_string());
        parts.push("Ctrl+Y: copy".to_string());
        parts.push("Ctrl+C: quit".to_string());

        (
            format!(" {} ", parts.join(" | ")),
            Style::default().fg(Color::Rgb(250, 250, 250)).bg(Color::Rgb(24, 24, 27)),
        )
    };

    let paragraph = Paragraph::new(status_text).style(style);

    frame.render_widget(paragraph, area);
}
