//! TUI application state and event loop.
//!
//! The `App` owns the discovered sessions, a `nucleo` matcher for fuzzy
//! search, and the export settings toggled from the keyboard. Enter exports
//! the selected session to disk with the current settings; Ctrl+Y copies the
//! rendered Markdown to the clipboard instead.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use nucleo::{Config, Nucleo};
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::copy_to_clipboard;
use crate::config::Settings;
use crate::export::export_session;
use crate::models::SessionInfo;
use crate::parsers::parse_session_file;
use crate::render::render;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Text the fuzzy matcher sees for one session.
fn search_haystack(info: &SessionInfo) -> String {
    let mut parts = Vec::new();
    if let Some(cwd) = &info.cwd {
        parts.push(cwd.clone());
    }
    if let Some(preview) = &info.preview {
        parts.push(preview.clone());
    }
    parts.push(info.label());
    parts.join(" ")
}

pub struct App {
    nucleo: Nucleo<SessionInfo>,
    selected_idx: usize,
    search_query: String,
    should_quit: bool,
    total_count: usize,
    settings: Settings,
    last_export_time: Option<Instant>,
    status_message: Option<StatusMessage>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(sessions: Vec<SessionInfo>, settings: Settings) -> Self {
        let nucleo = Nucleo::new(Config::DEFAULT, Arc::new(|| {}), None, 1);

        let injector = nucleo.injector();
        let total_count = sessions.len();
        for info in sessions {
            let haystack = search_haystack(&info);
            injector.push(info, move |_info, cols| {
                cols[0] = haystack.clone().into();
            });
        }

        Self {
            nucleo,
            selected_idx: 0,
            search_query: String::new(),
            should_quit: false,
            total_count,
            settings,
            last_export_time: None,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();

            self.nucleo.tick(10);
            let matched = self.collect_matched_items();
            let matched_count = matched.len();

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                terminal.draw(|f| {
                    let state = RenderState {
                        search_query: &self.search_query,
                        total_count: self.total_count,
                        settings: &self.settings,
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &matched, self.selected_idx, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action, matched_count);
        }

        Ok(())
    }

    fn collect_matched_items(&self) -> Vec<&SessionInfo> {
        let snapshot = self.nucleo.snapshot();
        snapshot.matched_items(..snapshot.matched_item_count()).map(|item| item.data).collect()
    }

    fn selected_session(&self) -> Option<SessionInfo> {
        let matched = self.collect_matched_items();
        matched.get(self.selected_idx).map(|info| (*info).clone())
    }

    fn handle_action(&mut self, action: Action, total_items: usize) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearSearch => {
                if self.search_query.is_empty() {
                    self.should_quit = true;
                } else {
                    self.search_query.clear();
                    self.update_nucleo_pattern();
                    self.selected_idx = 0;
                    self.needs_redraw = true;
                }
            }
            Action::MoveUp => self.move_selection(-1, total_items),
            Action::MoveDown => self.move_selection(1, total_items),
            Action::PageUp => self.move_selection(-10, total_items),
            Action::PageDown => self.move_selection(10, total_items),
            Action::UpdateSearch(c) => self.update_search(c),
            Action::DeleteChar => self.delete_char(),
            Action::ExportSelected => {
                // Debounce: terminals can deliver a held Enter as a burst
                let should_export = self
                    .last_export_time
                    .map(|t| t.elapsed() >= Duration::from_millis(150))
                    .unwrap_or(true);
                if should_export {
                    self.export_selected();
                    self.last_export_time = Some(Instant::now());
                }
            }
            Action::CopyToClipboard => self.copy_selected(),
            Action::ToggleTools => {
                self.settings.include_tools = !self.settings.include_tools;
                self.needs_redraw = true;
            }
            Action::ToggleReasoning => {
                self.settings.include_reasoning = !self.settings.include_reasoning;
                self.needs_redraw = true;
            }
            Action::ToggleRedact => {
                self.settings.redact_paths = !self.settings.redact_paths;
                self.needs_redraw = true;
            }
            Action::None => {}
        }
    }

    fn export_selected(&mut self) {
        let Some(info) = self.selected_session() else {
            self.set_status("✗ No session selected", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };

        let options = self.settings.render_options();
        let out_dir = self.settings.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        match export_session(&info.path, &options, None, &out_dir) {
            Ok(written) => {
                self.set_status(
                    format!("✓ Exported to {}", written.display()),
                    MessageType::Success,
                    STATUS_SUCCESS_DURATION_MS,
                );
            }
            Err(e) => {
                self.set_status(
                    format!("✗ Export failed: {}", e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
        }
    }

    fn copy_selected(&mut self) {
        let Some(info) = self.selected_session() else {
            self.set_status("✗ No session selected", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };

        let options = self.settings.render_options();
        let markdown = match parse_session_file(&info.path) {
            Ok(outcome) => render(&outcome, &options),
            Err(e) => {
                self.set_status(
                    format!("✗ Parse failed: {}", e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
                return;
            }
        };

        match copy_to_clipboard(&markdown) {
            Ok(()) => {
                self.set_status(
                    "✓ Copied to clipboard",
                    MessageType::Success,
                    STATUS_SUCCESS_DURATION_MS,
                );
            }
            Err(e) => {
                self.set_status(
                    format!("✗ Clipboard error: {}", e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
        }
    }

    fn move_selection(&mut self, delta: isize, total: usize) {
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = (self.selected_idx as isize + delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }
    }

    fn update_search(&mut self, c: char) {
        // Cap the query length; fuzzy scoring cost grows with pattern size
        if self.search_query.len() < 256 {
            self.search_query.push(c);
            self.update_nucleo_pattern();
            self.selected_idx = 0;
            self.needs_redraw = true;
        }
    }

    fn delete_char(&mut self) {
        if self.search_query.pop().is_some() {
            self.update_nucleo_pattern();
            self.selected_idx = 0;
            self.needs_redraw = true;
        }
    }

    fn update_nucleo_pattern(&mut self) {
        self.nucleo.pattern.reparse(
            0,
            &self.search_query,
            nucleo::pattern::CaseMatching::Smart,
            nucleo::pattern::Normalization::Smart,
            false,
        );
        self.nucleo.tick(10);
    }
}
