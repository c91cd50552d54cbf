//! Data models for session transcripts.
//!
//! This module defines the data structures flowing through the pipeline:
//!
//! - [`RecordKind`] - classification of one decoded JSON record
//! - [`ConversationEvent`] - a normalized, ordered unit of the conversation
//! - [`ParseOutcome`] - events plus skip diagnostics for one session file
//! - [`SessionInfo`] - lightweight summary used for listing and browsing
//!
//! The parser produces these; the Markdown renderer and the listing/TUI
//! collaborators consume them read-only.

pub mod event;
pub mod session;

pub use event::{Actor, ConversationEvent, EventBody, RecordKind};
pub use session::{ParseOutcome, SessionInfo, SessionMeta, SkipReason, SkipRecord};
