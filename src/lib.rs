//! Codex Session Export - Convert Codex session logs to Markdown
//!
//! This library parses the JSONL rollout files Codex writes under
//! `~/.codex/sessions/` and renders them as readable Markdown transcripts.
//! It supports:
//!
//! - Classifying raw records into messages, reasoning, tool activity and metadata
//! - Fault-tolerant line-by-line parsing with per-record skip reporting
//! - Deterministic Markdown rendering with tool/reasoning toggles
//! - Home-directory redaction for shareable transcripts
//! - Discovering and fuzzy-searching sessions in an interactive browser
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use codex_session_export::parsers::parse_session_file;
//! use codex_session_export::render::{RenderOptions, render};
//!
//! let outcome = parse_session_file(Path::new("rollout-2025.jsonl"))?;
//! let markdown = render(&outcome, &RenderOptions::default());
//! println!("{}", markdown);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod discover;
pub mod export;
pub mod filters;
pub mod models;
pub mod parsers;
pub mod render;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use models::{ConversationEvent, ParseOutcome, SessionInfo, SessionMeta, SkipRecord};
pub use parsers::{classify, parse_session_file};
pub use render::{RenderOptions, redact, render};
