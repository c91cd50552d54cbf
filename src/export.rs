//! Export plumbing: filenames and file output for rendered Markdown.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::parsers::parse_session_file;
use crate::render::{RenderOptions, render};

/// Derive a safe `<label>.md` filename from a session label (session id or
/// source file stem). Falls back to `session.md` when nothing survives.
pub fn export_filename(label: &str) -> String {
    let safe: String =
        label.chars().filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_')).collect();
    if safe.is_empty() {
        return "session.md".to_string();
    }
    format!("{}.md", safe)
}

/// Write rendered Markdown, creating parent directories as needed.
pub fn write_markdown(markdown: &str, out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(out_path, markdown)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    Ok(())
}

/// Parse one session file, render it and write the result. Returns the path
/// written to (the explicit `out_path`, or a derived name under `out_dir`).
pub fn export_session(
    path: &Path,
    options: &RenderOptions,
    out_path: Option<&Path>,
    out_dir: &Path,
) -> Result<PathBuf> {
    let outcome = parse_session_file(path)?;
    let markdown = render(&outcome, options);

    let target = match out_path {
        Some(explicit) => explicit.to_path_buf(),
        None => {
            let label = outcome
                .meta
                .session_id
                .clone()
                .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
                .unwrap_or_default();
            out_dir.join(export_filename(&label))
        }
    };
    write_markdown(&markdown, &target)?;
    Ok(target)
}
