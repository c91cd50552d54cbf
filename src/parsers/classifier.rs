//! Structural classification of decoded session records.
//!
//! Session files mix several record envelopes: most lines wrap their content
//! in a `payload` object (sometimes nested one level deeper), while older
//! files carry the discriminating fields at the top level. [`classify`]
//! inspects the structure and maps each record to a [`RecordKind`].
//!
//! Precedence is fixed and documented so that malformed records which happen
//! to share a field with two kinds resolve deterministically:
//! Message, then ToolCall, then ToolOutput, then Reasoning, then Meta; the
//! first structural match wins and anything else is `Unknown`.

use serde_json::Value;

use crate::models::RecordKind;

/// Classify one decoded record. Total: never fails, unrecognized shapes are
/// [`RecordKind::Unknown`].
pub fn classify(record: &Value) -> RecordKind {
    if !record.is_object() {
        return RecordKind::Unknown;
    }
    let body = effective_body(record);
    let inner_type = body.get("type").and_then(Value::as_str);
    let top_type = record.get("type").and_then(Value::as_str);

    // Message before ToolCall before ToolOutput before Reasoning before Meta.
    if inner_type == Some("message") && body.get("role").is_some_and(Value::is_string) {
        return RecordKind::Message;
    }
    if inner_type == Some("user_message") {
        return RecordKind::Message;
    }
    if inner_type == Some("function_call") {
        return RecordKind::ToolCall;
    }
    if inner_type == Some("function_call_output") {
        return RecordKind::ToolOutput;
    }
    if matches!(inner_type, Some("reasoning") | Some("agent_reasoning")) {
        return RecordKind::Reasoning;
    }
    if matches!(top_type, Some("session_meta") | Some("turn_context"))
        || matches!(inner_type, Some("session_meta") | Some("turn_context") | Some("ghost_snapshot"))
    {
        return RecordKind::Meta;
    }
    RecordKind::Unknown
}

/// Descend through `payload` envelopes to the object carrying the
/// discriminating fields. Records without an envelope are their own body.
pub fn effective_body(record: &Value) -> &Value {
    let mut current = record;
    while let Some(inner) = current.get("payload") {
        if !inner.is_object() {
            break;
        }
        current = inner;
    }
    current
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_classify_flat_message() {
        let record = json!({"type": "message", "role": "user", "text": "hi"});
        assert_eq!(classify(&record), RecordKind::Message);
    }

    #[test]
    fn test_classify_enveloped_message() {
        let record = json!({
            "timestamp": "2025-01-01T00:00:00Z",
            "type": "response_item",
            "payload": {"type": "message", "role": "assistant", "content": [{"type": "output_text", "text": "hello"}]}
        });
        assert_eq!(classify(&record), RecordKind::Message);
    }

    #[test]
    fn test_classify_double_nested_payload() {
        let record = json!({
            "type": "response_item",
            "payload": {"payload": {"type": "message", "role": "user", "text": "hi"}}
        });
        assert_eq!(classify(&record), RecordKind::Message);
    }

    #[test]
    fn test_classify_message_requires_role() {
        // "message" without a role is not a Message; nothing else matches.
        let record = json!({"type": "message", "text": "hi"});
        assert_eq!(classify(&record), RecordKind::Unknown);
    }

    #[test]
    fn test_classify_event_user_message() {
        let record = json!({
            "type": "event_msg",
            "payload": {"type": "user_message", "message": "do the thing"}
        });
        assert_eq!(classify(&record), RecordKind::Message);
    }

    #[test]
    fn test_classify_tool_call_and_output() {
        let call = json!({
            "type": "response_item",
            "payload": {"type": "function_call", "name": "shell", "arguments": "{}", "call_id": "c1"}
        });
        assert_eq!(classify(&call), RecordKind::ToolCall);

        let output = json!({
            "type": "response_item",
            "payload": {"type": "function_call_output", "call_id": "c1", "output": "ok"}
        });
        assert_eq!(classify(&output), RecordKind::ToolOutput);
    }

    #[test]
    fn test_classify_reasoning_variants() {
        let summary = json!({
            "type": "response_item",
            "payload": {"type": "reasoning", "summary": [{"text": "thinking"}]}
        });
        assert_eq!(classify(&summary), RecordKind::Reasoning);

        let event = json!({
            "type": "event_msg",
            "payload": {"type": "agent_reasoning", "text": "thinking"}
        });
        assert_eq!(classify(&event), RecordKind::Reasoning);
    }

    #[test]
    fn test_classify_meta_records() {
        let meta = json!({"type": "session_meta", "payload": {"id": "s1", "cwd": "/tmp"}});
        assert_eq!(classify(&meta), RecordKind::Meta);

        let turn = json!({"type": "turn_context", "payload": {"cwd": "/tmp"}});
        assert_eq!(classify(&turn), RecordKind::Meta);

        let ghost = json!({
            "type": "response_item",
            "payload": {"type": "ghost_snapshot", "ghost_commit": "deadbeef"}
        });
        assert_eq!(classify(&ghost), RecordKind::Meta);
    }

    #[test]
    fn test_classify_precedence_message_over_meta() {
        // A record that structurally matches both Message and Meta resolves
        // to Message: earlier rules win.
        let record = json!({
            "type": "session_meta",
            "payload": {"type": "message", "role": "user", "text": "hi"}
        });
        assert_eq!(classify(&record), RecordKind::Message);
    }

    #[test]
    fn test_classify_unknown_shapes() {
        assert_eq!(classify(&json!(null)), RecordKind::Unknown);
        assert_eq!(classify(&json!([1, 2, 3])), RecordKind::Unknown);
        assert_eq!(classify(&json!("just a string")), RecordKind::Unknown);
        assert_eq!(classify(&json!({})), RecordKind::Unknown);
        assert_eq!(classify(&json!({"type": "compacted"})), RecordKind::Unknown);
        assert_eq!(
            classify(&json!({"type": "response_item", "payload": {"type": "web_search_call"}})),
            RecordKind::Unknown
        );
    }

    #[test]
    fn test_classify_is_deterministic() {
        let record = json!({"type": "message", "role": "user", "text": "hi"});
        assert_eq!(classify(&record), classify(&record));
    }
}
