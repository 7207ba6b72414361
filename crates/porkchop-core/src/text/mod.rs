//! Text normalization and segmentation.

mod chunker;
mod cleaner;

pub use chunker::{chunk_by_size, chunk_by_structure, chunk_text, Chunker, DEFAULT_MAX_CHARS};
pub use cleaner::{clean_text, Cleaner};

/// Longest prefix of `s` with at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate to at most `max` characters, backing up to the last word boundary.
pub fn truncate_at_word(s: &str, max: usize) -> String {
    let cut = truncate_chars(s, max);
    if cut.len() == s.len() {
        return s.to_string();
    }
    // Cut landed mid-word unless the next char is whitespace.
    let next_is_space = s[cut.len()..].starts_with(char::is_whitespace);
    let trimmed = if next_is_space {
        cut
    } else {
        match cut.rfind(char::is_whitespace) {
            Some(idx) if idx > 0 => &cut[..idx],
            _ => cut,
        }
    };
    trimmed.trim_end_matches([',', ';', ':', ' ']).to_string()
}

/// Collapse every whitespace run (including newlines) to a single space.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte offset at most `max_chars` characters before `end`.
pub(crate) fn chars_before(s: &str, end: usize, max_chars: usize) -> usize {
    s[..end]
        .char_indices()
        .rev()
        .take(max_chars)
        .last()
        .map(|(idx, _)| idx)
        .unwrap_or(end)
}

/// Byte offset at most `max_chars` characters after `start`.
pub(crate) fn chars_after(s: &str, start: usize, max_chars: usize) -> usize {
    start + truncate_chars(&s[start..], max_chars).len()
}
