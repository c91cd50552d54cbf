//! Markdown rendering and text redaction.
//!
//! Both halves are pure: [`render`] maps a parse outcome and options to an
//! owned Markdown string, and [`redact`] is an idempotent text transform.
//! Neither has an error path; callers own all file output.

pub mod markdown;
pub mod redact;

pub use markdown::{RenderOptions, render};
pub use redact::redact;
