/// Cuts `s` to at most `max_bytes` on a char boundary and appends `...` when cut.
pub fn truncate_utf8_with_ellipsis(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }

    let end = s
        .char_indices()
        .map(|(i, ch)| i + ch.len_utf8())
        .take_while(|next| *next <= max_bytes)
        .last()
        .unwrap_or(0);

    format!("{}...", &s[..end])
}

/// Strips every literal markdown fence marker ("```json" first, then "```").
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "")
}
