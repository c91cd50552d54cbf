/// Collapse whitespace and truncate to a one-line preview.
pub fn make_preview(text: &str, limit: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    shorten(&collapsed, limit)
}

/// Truncate with a trailing ellipsis, counting characters rather than bytes.
pub fn shorten(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", cut)
}
