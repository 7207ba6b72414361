//! Rule-based fact extractors for bill text.

pub mod amounts;
pub mod deadlines;
pub mod duties;
pub mod entities;
pub mod funding;
pub mod patterns;
pub mod references;

pub use amounts::{parse_amount, AmountExtractor, DollarMatch};
pub use deadlines::{extract_dates, extract_fiscal_years, DeadlineExtractor};
pub use duties::DutyExtractor;
pub use entities::EntityExtractor;
pub use funding::FundingExtractor;
pub use patterns::*;
pub use references::ReferenceExtractor;

use crate::text::{chars_after, chars_before};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Whether the char at byte `idx` ends a sentence.
///
/// `;` always does. `.` does when followed by whitespace or end of text,
/// unless it closes a single-capital abbreviation (`U.S.`, `H.R.`).
fn is_terminator(text: &str, idx: usize) -> bool {
    let rest = &text[idx..];
    if rest.starts_with(';') {
        return true;
    }
    if !rest.starts_with('.') {
        return false;
    }

    let followed_by_break = rest[1..]
        .chars()
        .next()
        .is_none_or(char::is_whitespace);
    if !followed_by_break {
        return false;
    }

    let mut before = text[..idx].chars().rev();
    match (before.next(), before.next()) {
        (Some(c), prev) if c.is_ascii_uppercase() => prev.is_some_and(char::is_alphanumeric),
        _ => true,
    }
}

/// Text from `start` up to the next sentence terminator, at most `max_chars` long.
pub(crate) fn sentence_after(text: &str, start: usize, max_chars: usize) -> &str {
    let end = chars_after(text, start, max_chars);
    let window = &text[start..end];
    for (i, _) in window.char_indices() {
        if is_terminator(text, start + i) {
            return &window[..i];
        }
    }
    window
}

/// Text from the previous sentence terminator up to `end`, at most `max_chars` long.
pub(crate) fn sentence_before(text: &str, end: usize, max_chars: usize) -> &str {
    let start = chars_before(text, end, max_chars);
    let window = &text[start..end];
    for (i, c) in window.char_indices().rev() {
        if is_terminator(text, start + i) {
            return &window[i + c.len_utf8()..];
        }
    }
    window
}

/// Up to `max_chars` of text before `end`, starting at a line boundary.
pub(crate) fn lines_before(text: &str, end: usize, max_chars: usize) -> &str {
    let start = chars_before(text, end, max_chars);
    let window = &text[start..end];
    if start == 0 || text[..start].ends_with('\n') {
        return window;
    }
    match window.find('\n') {
        Some(nl) => &window[nl + 1..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_after_stops_at_terminators() {
        let text = "$5 for roads; and bridges";
        assert_eq!(sentence_after(text, 2, 100), " for roads");

        let text = "$5 for roads. Next sentence";
        assert_eq!(sentence_after(text, 2, 100), " for roads");
    }

    #[test]
    fn test_abbreviations_do_not_end_sentences() {
        let text = "$5 under 42 U.S.C. 1395 for U.S. ports. Next";
        assert_eq!(sentence_after(text, 2, 100), " under 42 U.S.C. 1395 for U.S. ports");
    }

    #[test]
    fn test_decimal_points_do_not_end_sentences() {
        let text = "$5 of which 1.5 percent is reserved. Next";
        assert_eq!(sentence_after(text, 2, 100), " of which 1.5 percent is reserved");
    }

    #[test]
    fn test_sentence_after_is_bounded() {
        let text = "$5 abcdefghij";
        assert_eq!(sentence_after(text, 2, 4), " abc");
    }

    #[test]
    fn test_sentence_before() {
        let text = "First part. For necessary expenses of the Office, $5";
        let end = text.find('$').unwrap();
        assert_eq!(sentence_before(text, end, 300), " For necessary expenses of the Office, ");
        assert_eq!(sentence_before(text, end, 8), "Office, ");
    }

    #[test]
    fn test_lines_before_skips_partial_line() {
        let text = "HEADING ONE\nbody text $5";
        let end = text.find('$').unwrap();
        assert_eq!(lines_before(text, end, 100), "HEADING ONE\nbody text ");
        assert_eq!(lines_before(text, end, 15), "body text ");
    }
}
