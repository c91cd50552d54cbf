//! Session discovery: walk the sessions root for `rollout-*.jsonl` files and
//! summarize each one.
//!
//! Scanning is embarrassingly parallel: each file's summary is built
//! independently, so the scan fans out across rayon workers with each worker
//! owning its file's data exclusively. A file that fails to scan is reported
//! to stderr and dropped, never failing the whole scan.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::models::SessionInfo;
use crate::parsers::build_session_info;

/// Collect all session files under `root`, sorted by path. A missing root is
/// an empty result, not an error.
pub fn find_rollout_files(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        eprintln!("Warning: sessions root not found: {}", root.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                eprintln!("Warning: failed to read directory entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy();
            name.starts_with("rollout-") && name.ends_with(".jsonl")
        })
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

/// Build a [`SessionInfo`] for every discovered session file, in parallel.
/// Results keep the sorted file order.
pub fn scan_sessions(root: &Path) -> Vec<SessionInfo> {
    let files = find_rollout_files(root);
    files
        .par_iter()
        .filter_map(|path| match build_session_info(path) {
            Ok(info) => Some(info),
            Err(e) => {
                eprintln!("Warning: failed to scan {}: {}", path.display(), e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_session(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_find_rollout_files_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        write_session(dir.path(), "2025/03/07/rollout-b.jsonl", "");
        write_session(dir.path(), "2025/03/01/rollout-a.jsonl", "");
        write_session(dir.path(), "2025/03/07/notes.txt", "");
        write_session(dir.path(), "2025/03/07/other.jsonl", "");

        let files = find_rollout_files(dir.path());
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("2025/03/01/rollout-a.jsonl"));
        assert!(files[1].ends_with("2025/03/07/rollout-b.jsonl"));
    }

    #[test]
    fn test_find_rollout_files_missing_root() {
        assert!(find_rollout_files(Path::new("/nonexistent/sessions")).is_empty());
    }

    #[test]
    fn test_scan_sessions_builds_summaries() {
        let dir = TempDir::new().unwrap();
        write_session(
            dir.path(),
            "2025/03/07/rollout-a.jsonl",
            r#"{"type":"session_meta","payload":{"id":"s-1","cwd":"/work"}}"#,
        );
        write_session(
            dir.path(),
            "2025/04/01/rollout-b.jsonl",
            r#"{"type":"message","role":"user","text":"hello there"}"#,
        );

        let sessions = scan_sessions(dir.path());
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].session_id.as_deref(), Some("s-1"));
        assert_eq!(sessions[0].year, Some(2025));
        assert_eq!(sessions[0].month, Some(3));
        assert_eq!(sessions[1].preview.as_deref(), Some("hello there"));
    }
}
