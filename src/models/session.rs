use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::event::ConversationEvent;

/// Maximum length of the raw-line snippet kept on a skip record.
const SNIPPET_LIMIT: usize = 80;

/// Why a line could not be turned into an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    DecodeError,
    MissingField(&'static str),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::DecodeError => write!(f, "decode error"),
            SkipReason::MissingField(name) => write!(f, "missing field: {}", name),
        }
    }
}

/// Diagnostic record for a line that was skipped instead of parsed.
///
/// Kept as structured data so callers (logging, listing) can format or count
/// them; the parser itself never prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRecord {
    pub line_num: usize,
    pub snippet: String,
    pub reason: SkipReason,
}

impl SkipRecord {
    pub fn new(line_num: usize, raw: &str, reason: SkipReason) -> Self {
        Self { line_num, snippet: truncate_snippet(raw), reason }
    }
}

fn truncate_snippet(raw: &str) -> String {
    let trimmed = raw.trim_end();
    if trimmed.chars().count() <= SNIPPET_LIMIT {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(SNIPPET_LIMIT - 3).collect();
    format!("{}...", cut)
}

/// Session-level metadata absorbed from `session_meta`, `turn_context` and
/// `ghost_snapshot` records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMeta {
    pub session_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub cwd: Option<String>,
    pub repo_url: Option<String>,
    pub branch: Option<String>,
    pub commit_hash: Option<String>,
    pub cli_version: Option<String>,
    pub originator: Option<String>,
    pub ghost_commit: Option<String>,
}

/// Result of parsing one session file: the ordered conversation model plus
/// skip diagnostics. Owns its data and holds no reference to the source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub meta: SessionMeta,
    pub events: Vec<ConversationEvent>,
    pub skips: Vec<SkipRecord>,
}

impl ParseOutcome {
    /// Timestamp of the earliest event carrying one, for listing/browse use.
    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.events.iter().find_map(|e| e.timestamp)
    }

    /// Timestamp of the latest event carrying one.
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.events.iter().rev().find_map(|e| e.timestamp)
    }
}

/// Lightweight per-session summary built by the discovery scan, used for
/// listing, filtering and the TUI without rendering the full transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInfo {
    pub path: PathBuf,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub session_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub cwd: Option<String>,
    pub repo_url: Option<String>,
    pub branch: Option<String>,
    pub originator: Option<String>,
    pub preview: Option<String>,
    pub skip_count: usize,
}

impl SessionInfo {
    /// Label shown in listings and used for export filenames: the session id
    /// when present, otherwise the file name.
    pub fn label(&self) -> String {
        if let Some(id) = &self.session_id {
            return id.clone();
        }
        self.path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
    }
}
