use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Parse a record timestamp. Accepts RFC3339 strings (with `Z` or offsets)
/// and integer Unix milliseconds; anything else is `None`.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let text = s.trim();
            if text.is_empty() {
                return None;
            }
            text.parse::<DateTime<Utc>>().ok()
        }
        Value::Number(n) => {
            let ms = n.as_i64()?;
            DateTime::from_timestamp_millis(ms)
        }
        _ => None,
    }
}

/// Stable UTC display form used in listings and Markdown headers.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%SZ").to_string()
}

/// Extract (year, month, day) from a session path laid out as
/// `.../sessions/YYYY/MM/DD/rollout-*.jsonl`.
pub fn parse_date_from_path(path: &Path) -> Option<(i32, u32, u32)> {
    let parts: Vec<&str> =
        path.iter().map(|c| c.to_str().unwrap_or_default()).collect();
    if parts.len() < 4 {
        return None;
    }
    let year: i32 = parts[parts.len() - 4].parse().ok()?;
    let month: u32 = parts[parts.len() - 3].parse().ok()?;
    let day: u32 = parts[parts.len() - 2].parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some((year, month, day))
}
