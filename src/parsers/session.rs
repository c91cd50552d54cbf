//! Fault-tolerant session parsing.
//!
//! Parsing is an explicit fold over a sequence of lines that accumulates two
//! lists: conversation events and skip records. A malformed line can never
//! prevent any other line from being processed; the only fatal condition is
//! being unable to read the source file at all. Unknown record shapes
//! contribute to neither list.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use super::classifier::{classify, effective_body};
use super::content::{
    coerce_text, extract_event_user_message, extract_message_text, extract_reasoning_summary,
    format_jsonish,
};
use crate::models::{
    Actor, ConversationEvent, EventBody, ParseOutcome, RecordKind, SessionInfo, SessionMeta,
    SkipReason, SkipRecord,
};
use crate::utils::{make_preview, parse_date_from_path, parse_timestamp, read_to_string_lossy};

/// Upper bound on lines examined by the fast metadata scan.
const MAX_SCAN_LINES: usize = 500;
/// Preview length for session listings.
const PREVIEW_LIMIT: usize = 120;

/// Parse a whole session file. Opening or reading the file is the only
/// error path; everything line-level degrades into skip records.
pub fn parse_session_file(path: &Path) -> Result<ParseOutcome> {
    let text = read_to_string_lossy(path)?;
    Ok(parse_lines(text.lines()))
}

/// Parse an ordered sequence of raw lines into a [`ParseOutcome`].
///
/// Pure fold: feed it lines from any source, lazily or not. Empty lines are
/// ignored; undecodable lines become skip records; recognized records become
/// events with strictly increasing sequence indices; unrecognized records
/// are silently dropped.
pub fn parse_lines<I>(lines: I) -> ParseOutcome
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut state = ParserState::default();
    for (idx, line) in lines.into_iter().enumerate() {
        state.push_line(idx + 1, line.as_ref());
    }
    state.outcome
}

#[derive(Default)]
struct ParserState {
    outcome: ParseOutcome,
    next_index: usize,
    // User texts already emitted; event_msg duplicates of response_item
    // messages are dropped.
    seen_user_texts: HashSet<String>,
    // call_id -> tool name, so outputs can carry the originating tool's name.
    tool_names: HashMap<String, String>,
}

impl ParserState {
    fn push_line(&mut self, line_num: usize, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        let record: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(_) => {
                self.skip(line_num, line, SkipReason::DecodeError);
                return;
            }
        };
        match classify(&record) {
            RecordKind::Unknown => {}
            RecordKind::Meta => absorb_meta(&mut self.outcome.meta, &record),
            kind => match self.extract(kind, &record, line_num) {
                Ok(Some(event)) => self.outcome.events.push(event),
                Ok(None) => {}
                Err(field) => self.skip(line_num, line, SkipReason::MissingField(field)),
            },
        }
    }

    fn skip(&mut self, line_num: usize, line: &str, reason: SkipReason) {
        self.outcome.skips.push(SkipRecord::new(line_num, line, reason));
    }

    /// Build an event from a classified record. `Ok(None)` means the record
    /// is consumed without producing an event (duplicates, empty reasoning).
    fn extract(
        &mut self,
        kind: RecordKind,
        record: &Value,
        line_num: usize,
    ) -> std::result::Result<Option<ConversationEvent>, &'static str> {
        let timestamp = record.get("timestamp").and_then(|v| parse_timestamp(v));
        let body = effective_body(record);

        let (actor, event_body) = match kind {
            RecordKind::Message => {
                if body.get("type").and_then(Value::as_str) == Some("user_message") {
                    let text = extract_event_user_message(body).ok_or("message")?;
                    if self.seen_user_texts.contains(&text) {
                        return Ok(None);
                    }
                    (Actor::User, EventBody::Text(text))
                } else {
                    let role = body.get("role").and_then(Value::as_str).unwrap_or_default();
                    let actor = Actor::from_role(role);
                    let text = extract_message_text(body).ok_or("text")?;
                    if actor == Actor::User {
                        self.seen_user_texts.insert(text.clone());
                    }
                    (actor, EventBody::Text(text))
                }
            }
            RecordKind::Reasoning => {
                let summary = extract_reasoning_summary(body);
                if !summary.is_empty() {
                    (Actor::Assistant, EventBody::Reasoning(summary))
                } else if body.get("encrypted_content").is_some() {
                    // Content exists but cannot be displayed.
                    (Actor::Assistant, EventBody::Opaque)
                } else {
                    return Ok(None);
                }
            }
            RecordKind::ToolCall => {
                let name = body.get("name").and_then(|v| coerce_text(v)).ok_or("name")?;
                let payload = body.get("arguments").and_then(format_jsonish);
                if let Some(call_id) = body.get("call_id").and_then(|v| coerce_text(v)) {
                    self.tool_names.insert(call_id, name.clone());
                }
                (Actor::Assistant, EventBody::Tool { name: Some(name), payload })
            }
            RecordKind::ToolOutput => {
                let payload =
                    body.get("output").and_then(format_jsonish).ok_or("output")?;
                let name = body
                    .get("call_id")
                    .and_then(|v| coerce_text(v))
                    .and_then(|id| self.tool_names.get(&id).cloned());
                (Actor::Tool, EventBody::Tool { name, payload: Some(payload) })
            }
            RecordKind::Meta | RecordKind::Unknown => unreachable!("handled by caller"),
        };

        let index = self.next_index;
        self.next_index += 1;
        Ok(Some(ConversationEvent { kind, index, actor, timestamp, line_num, body: event_body }))
    }
}

/// Fold a Meta record into the session metadata. First `session_meta` wins
/// for identity fields; `turn_context` only backfills a missing cwd.
fn absorb_meta(meta: &mut SessionMeta, record: &Value) {
    let body = effective_body(record);
    let top_type = record.get("type").and_then(Value::as_str);
    let inner_type = body.get("type").and_then(Value::as_str);

    if inner_type == Some("ghost_snapshot") {
        if meta.ghost_commit.is_none() {
            meta.ghost_commit = body.get("ghost_commit").and_then(|v| coerce_text(v));
        }
        return;
    }
    if top_type == Some("turn_context") || inner_type == Some("turn_context") {
        if meta.cwd.is_none() {
            meta.cwd = body.get("cwd").and_then(|v| coerce_text(v));
        }
        return;
    }

    // session_meta
    if meta.session_id.is_none() {
        meta.session_id = body.get("id").and_then(|v| coerce_text(v));
    }
    if meta.started_at.is_none() {
        meta.started_at = body.get("timestamp").and_then(|v| parse_timestamp(v));
    }
    if meta.cwd.is_none() {
        meta.cwd = body.get("cwd").and_then(|v| coerce_text(v));
    }
    if meta.originator.is_none() {
        meta.originator = body.get("originator").and_then(|v| coerce_text(v));
    }
    if meta.cli_version.is_none() {
        meta.cli_version = body.get("cli_version").and_then(|v| coerce_text(v));
    }
    if let Some(git) = body.get("git").filter(|g| g.is_object()) {
        if meta.repo_url.is_none() {
            meta.repo_url = git.get("repository_url").and_then(|v| coerce_text(v));
        }
        if meta.branch.is_none() {
            meta.branch = git.get("branch").and_then(|v| coerce_text(v));
        }
        if meta.commit_hash.is_none() {
            meta.commit_hash = git
                .get("commit_hash")
                .or_else(|| git.get("commit"))
                .and_then(|v| coerce_text(v));
        }
    }
}

/// Bounded scan of a session file for listing purposes: metadata, a preview
/// of the first user message, and a decode-failure count. Reads at most
/// [`MAX_SCAN_LINES`] lines and never renders.
pub fn build_session_info(path: &Path) -> Result<SessionInfo> {
    let text = read_to_string_lossy(path)?;

    let mut meta = SessionMeta::default();
    let mut preview: Option<String> = None;
    let mut skip_count = 0;

    for line in text.lines().take(MAX_SCAN_LINES) {
        if line.trim().is_empty() {
            continue;
        }
        let record: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(_) => {
                skip_count += 1;
                continue;
            }
        };
        match classify(&record) {
            RecordKind::Meta => absorb_meta(&mut meta, &record),
            RecordKind::Message if preview.is_none() => {
                let body = effective_body(&record);
                let text = if body.get("type").and_then(Value::as_str) == Some("user_message") {
                    extract_event_user_message(body)
                } else if body.get("role").and_then(Value::as_str) == Some("user") {
                    extract_message_text(body)
                } else {
                    None
                };
                if let Some(text) = text {
                    preview = Some(make_preview(&text, PREVIEW_LIMIT));
                }
            }
            _ => {}
        }
    }

    let date = parse_date_from_path(path);
    let started_at = meta.started_at.or_else(|| {
        date.and_then(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single())
    });

    Ok(SessionInfo {
        path: path.to_path_buf(),
        year: date.map(|(y, _, _)| y),
        month: date.map(|(_, m, _)| m),
        day: date.map(|(_, _, d)| d),
        session_id: meta.session_id,
        started_at,
        cwd: meta.cwd,
        repo_url: meta.repo_url,
        branch: meta.branch,
        originator: meta.originator,
        preview,
        skip_count,
    })
}
