//! Deterministic Markdown rendering of a parsed session.
//!
//! The renderer walks events in sequence-index order, applies the inclusion
//! toggles, and emits one headed block per retained event. It is a total
//! function: no input combination of outcome and options can fail, and the
//! same inputs always produce byte-identical output.

use std::path::PathBuf;

use crate::models::{Actor, EventBody, ParseOutcome, RecordKind};
use crate::utils::format_timestamp;

use super::redact::redact;

/// Fixed body for content that exists but cannot be displayed.
const OPAQUE_PLACEHOLDER: &str = "[content unavailable]";
/// Fixed body for tool calls recorded without arguments.
const NO_ARGUMENTS: &str = "[no arguments]";

/// Rendering configuration. Tool events are excluded by default; reasoning
/// is included by default.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub include_tools: bool,
    pub include_reasoning: bool,
    pub redact_home: bool,
    pub home_path: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { include_tools: false, include_reasoning: true, redact_home: false, home_path: None }
    }
}

/// Render a parsed session to Markdown. Takes read-only views and returns a
/// new owned string; never fails.
pub fn render(outcome: &ParseOutcome, options: &RenderOptions) -> String {
    let home = if options.redact_home {
        options.home_path.as_ref().map(|p| p.to_string_lossy().into_owned())
    } else {
        None
    };
    let clean = |text: &str| -> String {
        match &home {
            Some(h) => redact(text, h),
            None => text.to_string(),
        }
    };

    let mut lines: Vec<String> = Vec::new();
    push_header(&mut lines, outcome, &clean);

    for event in &outcome.events {
        match event.kind {
            RecordKind::ToolCall | RecordKind::ToolOutput if !options.include_tools => continue,
            RecordKind::Reasoning if !options.include_reasoning => continue,
            _ => {}
        }

        match &event.body {
            EventBody::Text(text) => {
                lines.push(format!("### {}", event.actor.label()));
                push_text_block(&mut lines, &clean(text));
            }
            EventBody::Reasoning(parts) => {
                lines.push(format!("### {} reasoning", event.actor.label()));
                push_text_block(&mut lines, &clean(&parts.join("\n\n")));
            }
            EventBody::Tool { name, payload } => {
                lines.push(tool_heading(event.kind, name.as_deref()));
                let body = match payload {
                    Some(payload) => clean(payload),
                    None => NO_ARGUMENTS.to_string(),
                };
                push_fenced(&mut lines, &body);
                lines.push(String::new());
            }
            EventBody::Opaque => {
                lines.push(heading_for_opaque(event.kind, event.actor));
                lines.push(OPAQUE_PLACEHOLDER.to_string());
                lines.push(String::new());
            }
        }
    }

    let mut text = lines.join("\n");
    while text.ends_with('\n') {
        text.pop();
    }
    text.push('\n');
    text
}

fn push_header(lines: &mut Vec<String>, outcome: &ParseOutcome, clean: &dyn Fn(&str) -> String) {
    let meta = &outcome.meta;
    match &meta.session_id {
        Some(id) => lines.push(format!("# Codex session {}", clean(id))),
        None => lines.push("# Codex session".to_string()),
    }
    lines.push(String::new());

    if let Some(started) = &meta.started_at {
        lines.push(format!("- Started: {}", format_timestamp(started)));
    }
    if let Some(cwd) = &meta.cwd {
        lines.push(format!("- CWD: {}", clean(cwd)));
    }
    if let Some(repo) = &meta.repo_url {
        match &meta.branch {
            Some(branch) => lines.push(format!("- Repo: {} (branch: {})", clean(repo), branch)),
            None => lines.push(format!("- Repo: {}", clean(repo))),
        }
    }
    if let Some(commit) = &meta.commit_hash {
        lines.push(format!("- Commit: {}", commit));
    }
    if let Some(originator) = &meta.originator {
        lines.push(format!("- Originator: {}", originator));
    }
    if let Some(version) = &meta.cli_version {
        lines.push(format!("- CLI version: {}", version));
    }
    if let Some(ghost) = &meta.ghost_commit {
        lines.push(format!("- Ghost commit: {}", ghost));
    }
    if !outcome.skips.is_empty() {
        lines.push(format!("- Warnings: {}", outcome.skips.len()));
    }
    lines.push(String::new());
}

fn tool_heading(kind: RecordKind, name: Option<&str>) -> String {
    match (kind, name) {
        (RecordKind::ToolOutput, Some(name)) => format!("### Tool output: {}", name),
        (RecordKind::ToolOutput, None) => "### Tool output".to_string(),
        (_, Some(name)) => format!("### Tool call: {}", name),
        (_, None) => "### Tool call: unknown".to_string(),
    }
}

fn heading_for_opaque(kind: RecordKind, actor: Actor) -> String {
    match kind {
        RecordKind::Reasoning => format!("### {} reasoning", actor.label()),
        RecordKind::ToolCall => "### Tool call: unknown".to_string(),
        RecordKind::ToolOutput => "### Tool output".to_string(),
        _ => format!("### {}", actor.label()),
    }
}

/// Emit content verbatim inside a fence when any of its lines would be read
/// as Markdown structure; as plain prose otherwise.
fn push_text_block(lines: &mut Vec<String>, text: &str) {
    if needs_fence(text) {
        push_fenced(lines, text);
    } else {
        lines.push(text.to_string());
    }
    lines.push(String::new());
}

fn needs_fence(text: &str) -> bool {
    text.lines().any(|line| matches!(line.as_bytes().first(), Some(b'#' | b'-' | b'`' | b'>')))
}

fn push_fenced(lines: &mut Vec<String>, body: &str) {
    // Widen the fence when the body itself contains backtick fences.
    let fence = if body.contains("```") { "````" } else { "```" };
    let lang = if body.trim_start().starts_with(['{', '[']) { "json" } else { "text" };
    lines.push(format!("{}{}", fence, lang));
    lines.push(body.to_string());
    lines.push(fence.to_string());
}
