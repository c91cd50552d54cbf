//! Edge case tests: damaged files, size limits, odd encodings.
mod common;

use std::fs;
use std::io::Write;

use codex_session_export::discover::scan_sessions;
use codex_session_export::models::SkipReason;
use codex_session_export::parsers::{parse_lines, parse_session_file};
use codex_session_export::render::{RenderOptions, render};

use common::*;

#[test]
fn test_empty_session_file() {
    let home = CodexHomeBuilder::new().with_session((2025, 1, 1), "rollout-empty.jsonl", &[]);
    let path = home.sessions_root().join("2025/01/01/rollout-empty.jsonl");

    let outcome = parse_session_file(&path).unwrap();
    assert!(outcome.events.is_empty());
    assert!(outcome.skips.is_empty());

    let text = render(&outcome, &RenderOptions::default());
    assert_eq!(text, "# Codex session\n");
}

#[test]
fn test_all_garbage_file_parses_to_skips() {
    let lines: Vec<String> = (0..5).map(|i| format!("garbage line {}", i)).collect();
    let home = CodexHomeBuilder::new().with_session((2025, 1, 2), "rollout-g.jsonl", &lines);
    let path = home.sessions_root().join("2025/01/02/rollout-g.jsonl");

    let outcome = parse_session_file(&path).unwrap();
    assert!(outcome.events.is_empty());
    assert_eq!(outcome.skips.len(), 5);
    assert!(outcome.skips.iter().all(|s| s.reason == SkipReason::DecodeError));
}

#[test]
fn test_oversized_file_is_fatal() {
    let home = CodexHomeBuilder::new();
    let dir = home.sessions_root().join("2025/01/03");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("rollout-big.jsonl");

    let mut file = fs::File::create(&path).unwrap();
    let chunk = vec![b'a'; 1024 * 1024];
    for _ in 0..11 {
        file.write_all(&chunk).unwrap();
    }
    drop(file);

    let result = parse_session_file(&path);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("too large"));
}

#[test]
fn test_invalid_utf8_degrades_to_line_skips() {
    let home = CodexHomeBuilder::new();
    let dir = home.sessions_root().join("2025/01/04");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("rollout-enc.jsonl");

    let mut content: Vec<u8> = Vec::new();
    content.extend_from_slice(&[0xff, 0xfe, 0x80]);
    content.push(b'\n');
    content.extend_from_slice(user_message("still readable").as_bytes());
    content.push(b'\n');
    fs::write(&path, content).unwrap();

    // Encoding damage is confined to the lines it touches.
    let outcome = parse_session_file(&path).unwrap();
    assert_eq!(outcome.events.len(), 1);
    assert_eq!(outcome.skips.len(), 1);
    assert_eq!(outcome.skips[0].reason, SkipReason::DecodeError);
}

#[test]
fn test_skip_snippet_is_bounded_for_unicode() {
    let long = "héllo wörld 🚀 ".repeat(30);
    let outcome = parse_lines([long.as_str()]);

    assert_eq!(outcome.skips.len(), 1);
    assert!(outcome.skips[0].snippet.chars().count() <= 80);
    assert!(outcome.skips[0].snippet.ends_with("..."));
}

#[test]
fn test_crlf_line_endings_tolerated() {
    let content = format!("{}\r\n{}\r\n", user_message("one"), assistant_message("two"));
    let outcome = parse_lines(content.lines());

    assert_eq!(outcome.events.len(), 2);
    assert!(outcome.skips.is_empty());
}

#[test]
fn test_double_nested_payload_classified() {
    let line = r#"{"type":"event_msg","payload":{"type":"response_item","payload":{"type":"message","role":"assistant","content":[{"text":"nested"}]}}}"#;
    let outcome = parse_lines([line]);

    assert_eq!(outcome.events.len(), 1);
}

#[test]
fn test_session_without_meta_uses_file_name_label() {
    let lines = vec![user_message("no meta here")];
    let home = CodexHomeBuilder::new().with_session((2025, 1, 5), "rollout-anon.jsonl", &lines);

    let sessions = scan_sessions(&home.sessions_root());
    assert_eq!(sessions.len(), 1);
    assert!(sessions[0].session_id.is_none());
    assert_eq!(sessions[0].label(), "rollout-anon.jsonl");
    // Path date stands in for the missing start timestamp.
    assert!(sessions[0].started_at.is_some());
}

#[test]
fn test_unknown_records_do_not_affect_scan() {
    let lines = vec![unknown_record(), unknown_record(), user_message("real work")];
    let home = CodexHomeBuilder::new().with_session((2025, 1, 6), "rollout-u.jsonl", &lines);

    let sessions = scan_sessions(&home.sessions_root());
    assert_eq!(sessions[0].skip_count, 0);
    assert_eq!(sessions[0].preview.as_deref(), Some("real work"));
}

#[test]
fn test_preview_whitespace_normalized_and_bounded() {
    let noisy = format!("  spaced   out\n\n{}  ", "words ".repeat(60));
    let lines = vec![user_message(&noisy)];
    let home = CodexHomeBuilder::new().with_session((2025, 1, 7), "rollout-p.jsonl", &lines);

    let sessions = scan_sessions(&home.sessions_root());
    let preview = sessions[0].preview.as_deref().unwrap();
    assert!(preview.starts_with("spaced out"));
    assert!(!preview.contains('\n'));
    assert!(preview.chars().count() <= 120);
}

#[test]
fn test_redaction_is_idempotent_through_render() {
    let lines = vec![user_message("see /home/dev/notes and /home/dev/notes again")];
    let home = CodexHomeBuilder::new().with_session((2025, 1, 8), "rollout-i.jsonl", &lines);
    let path = home.sessions_root().join("2025/01/08/rollout-i.jsonl");

    let options = RenderOptions {
        redact_home: true,
        home_path: Some("/home/dev".into()),
        ..Default::default()
    };
    let outcome = parse_session_file(&path).unwrap();
    let once = render(&outcome, &options);
    assert!(once.contains("~/notes"));

    use codex_session_export::render::redact;
    assert_eq!(redact(&once, "/home/dev"), once);
}
