//! Extraction helpers for the loosely-shaped content fields of session
//! records. The source format stores text as a bare string, a single block
//! object, or a list of blocks with `text` or nested `content` fields; these
//! helpers flatten all of those into plain strings.

use serde_json::Value;

/// Flatten a `content`-shaped value (string, block object, or block list)
/// into one string. Returns `None` when no text can be recovered.
pub fn normalize_content_blocks(content: &Value) -> Option<String> {
    match content {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => {
            if let Some(text) = map.get("text") {
                return coerce_text(text);
            }
            map.get("content").and_then(normalize_content_blocks)
        }
        Value::Array(blocks) => {
            let mut parts: Vec<String> = Vec::new();
            for block in blocks {
                match block {
                    Value::String(s) => parts.push(s.clone()),
                    Value::Object(map) => {
                        let text = match map.get("text") {
                            Some(t) => coerce_text(t),
                            None => map.get("content").and_then(normalize_content_blocks),
                        };
                        if let Some(text) = text {
                            parts.push(text);
                        }
                    }
                    _ => {}
                }
            }
            if parts.is_empty() { None } else { Some(parts.concat()) }
        }
        _ => None,
    }
}

/// Text of a `message` payload: `content` first, then `text`.
pub fn extract_message_text(payload: &Value) -> Option<String> {
    let content = payload.get("content").or_else(|| payload.get("text"))?;
    normalize_content_blocks(content)
}

/// Text of an `event_msg` user message: the `message` field may be a string,
/// a block list, or an object wrapping `content`.
pub fn extract_event_user_message(payload: &Value) -> Option<String> {
    let message = payload.get("message").or_else(|| payload.get("text"))?;
    match message {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("content").and_then(normalize_content_blocks),
        Value::Array(_) => normalize_content_blocks(message),
        _ => None,
    }
}

/// Multi-part reasoning summary: a list of blocks with `text` or
/// `summary_text`, or a plain `text` string.
pub fn extract_reasoning_summary(payload: &Value) -> Vec<String> {
    if let Some(Value::Array(blocks)) = payload.get("summary") {
        let mut summaries = Vec::new();
        for block in blocks {
            match block {
                Value::String(s) => summaries.push(s.clone()),
                Value::Object(map) => {
                    let text = map.get("text").or_else(|| map.get("summary_text"));
                    if let Some(text) = text.and_then(coerce_text) {
                        summaries.push(text);
                    }
                }
                _ => {}
            }
        }
        return summaries;
    }
    match payload.get("text") {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => {
            items.iter().filter_map(coerce_text).filter(|s| !s.is_empty()).collect()
        }
        _ => Vec::new(),
    }
}

/// Pretty-print a tool argument/output value. String values that hold JSON
/// are re-indented; everything else passes through.
pub fn format_jsonish(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Some(s.clone());
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(parsed) => Some(pretty(&parsed)),
                Err(_) => Some(s.clone()),
            }
        }
        Value::Object(_) | Value::Array(_) => Some(pretty(value)),
        other => Some(other.to_string()),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// String coercion for scalar-ish values; mirrors how the source format
/// occasionally stores numbers where strings are expected.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
