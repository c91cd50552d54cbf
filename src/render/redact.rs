//! Home-directory redaction for shareable exports.

/// Replace occurrences of `home` with `~` when they stand alone or prefix a
/// longer path. Boundary checks keep unrelated substrings intact:
/// `/Users/matt` never rewrites `/Users/matthew` or `/x/Users/matt`.
///
/// Pure and idempotent: once replaced, the placeholder contains no further
/// occurrence of `home`, so a second pass is a no-op.
pub fn redact(text: &str, home: &str) -> String {
    if home.is_empty() || home == "~" || !text.contains(home) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (pos, _) in text.match_indices(home) {
        if pos < last {
            continue;
        }
        let before_ok =
            text[..pos].chars().next_back().is_none_or(|c| !is_path_char(c));
        let after_ok = text[pos + home.len()..]
            .chars()
            .next()
            .is_none_or(|c| c == '/' || c == '\\' || !is_component_char(c));
        if before_ok && after_ok {
            out.push_str(&text[last..pos]);
            out.push('~');
            last = pos + home.len();
        }
    }
    out.push_str(&text[last..]);
    out
}

// Characters that can appear mid-path; a match preceded by one of these is
// inside a longer path.
fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '/' | '\\' | '_' | '-' | '.' | '~')
}

// Characters that continue a path component; a match followed by one of
// these merely shares a prefix with a longer name.
fn is_component_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}
