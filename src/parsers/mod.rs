//! Fault-tolerant parsing of session transcript files.
//!
//! # Error Handling Strategy
//!
//! This module follows a **skip-and-continue** approach:
//!
//! - **Individual line failures**: Lines that fail to decode or lack a
//!   required field become [`SkipRecord`](crate::models::SkipRecord)s on the
//!   outcome and parsing continues. One bad line can never break a session.
//!
//! - **Unknown record shapes**: Not errors. They are classified `Unknown`
//!   and silently dropped, which keeps the parser tolerant of the source
//!   format evolving.
//!
//! - **Fatal errors**: Only the inability to obtain the line sequence itself
//!   (missing or unreadable file) fails a parse call, via `anyhow::Result`.
//!
//! Skips are exposed as structured data rather than printed, so listing and
//! logging collaborators decide how to surface them.

pub mod classifier;
pub mod content;
pub mod session;

pub use classifier::classify;
pub use session::{build_session_info, parse_lines, parse_session_file};
