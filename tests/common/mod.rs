//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use tempfile::TempDir;

/// Builder for a Codex home directory holding dated session files.
pub struct CodexHomeBuilder {
    temp_dir: TempDir,
}

impl CodexHomeBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join("sessions"))
            .expect("Failed to create sessions dir");
        Self { temp_dir }
    }

    /// Path to the Codex home (set this as `CODEX_HOME`).
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn sessions_root(&self) -> PathBuf {
        self.temp_dir.path().join("sessions")
    }

    /// Add a session file under `sessions/YYYY/MM/DD/` with the given lines.
    pub fn with_session(
        self,
        (year, month, day): (i32, u32, u32),
        file_name: &str,
        lines: &[String],
    ) -> Self {
        let dir = self
            .sessions_root()
            .join(format!("{:04}", year))
            .join(format!("{:02}", month))
            .join(format!("{:02}", day));
        fs::create_dir_all(&dir).expect("Failed to create session dir");
        fs::write(dir.join(file_name), lines.join("\n") + "\n")
            .expect("Failed to write session file");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for CodexHomeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A `session_meta` record with the given id and working directory. Carries
/// no start timestamp, so listings fall back to the path date.
pub fn meta_record(id: &str, cwd: &str) -> String {
    json!({
        "type": "session_meta",
        "payload": {
            "id": id,
            "cwd": cwd,
            "originator": "codex_cli_rs",
            "cli_version": "0.42.0",
        }
    })
    .to_string()
}

/// A `session_meta` record carrying git metadata.
pub fn meta_record_with_git(id: &str, cwd: &str, repo: &str, branch: &str) -> String {
    json!({
        "type": "session_meta",
        "payload": {
            "id": id,
            "cwd": cwd,
            "git": {
                "repository_url": repo,
                "branch": branch,
                "commit_hash": "deadbeef",
            }
        }
    })
    .to_string()
}

pub fn user_message(text: &str) -> String {
    json!({
        "timestamp": "2025-03-07T10:01:00Z",
        "type": "response_item",
        "payload": {
            "type": "message",
            "role": "user",
            "content": [{"type": "input_text", "text": text}],
        }
    })
    .to_string()
}

pub fn assistant_message(text: &str) -> String {
    json!({
        "timestamp": "2025-03-07T10:02:00Z",
        "type": "response_item",
        "payload": {
            "type": "message",
            "role": "assistant",
            "content": [{"type": "output_text", "text": text}],
        }
    })
    .to_string()
}

pub fn reasoning_record(parts: &[&str]) -> String {
    let summary: Vec<_> = parts.iter().map(|p| json!({"summary_text": p})).collect();
    json!({
        "timestamp": "2025-03-07T10:02:00Z",
        "type": "response_item",
        "payload": {"type": "reasoning", "summary": summary},
    })
    .to_string()
}

pub fn function_call(name: &str, arguments: &str, call_id: &str) -> String {
    json!({
        "timestamp": "2025-03-07T10:03:00Z",
        "type": "response_item",
        "payload": {
            "type": "function_call",
            "name": name,
            "arguments": arguments,
            "call_id": call_id,
        }
    })
    .to_string()
}

pub fn function_call_output(call_id: &str, output: &str) -> String {
    json!({
        "timestamp": "2025-03-07T10:04:00Z",
        "type": "response_item",
        "payload": {
            "type": "function_call_output",
            "call_id": call_id,
            "output": output,
        }
    })
    .to_string()
}

/// A record shape the parser does not recognize.
pub fn unknown_record() -> String {
    json!({"type": "compacted", "payload": {"reason": "context window"}}).to_string()
}

/// Lines for a small but representative session.
pub fn standard_session(id: &str, cwd: &str) -> Vec<String> {
    vec![
        meta_record(id, cwd),
        user_message("fix the flaky test in ci"),
        reasoning_record(&["Look at the retry logic first"]),
        function_call("shell", r#"{"command":["cargo","test"]}"#, "call-1"),
        function_call_output("call-1", "test result: ok"),
        assistant_message("The retry loop swallowed the error; fixed."),
    ]
}
