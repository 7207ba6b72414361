//! Dates, fiscal years and "not later than" deadlines.

use crate::models::bill::{DeadlineFact, UNSPECIFIED};
use crate::models::config::ExtractionConfig;
use crate::text::{collapse_whitespace, truncate_at_word};

use super::patterns::{ACTION_SUBJECT, FISCAL_YEAR, LONG_DATE, NOT_LATER_THAN};
use super::{sentence_after, sentence_before, FieldExtractor};

/// Phrases that mean the capture is a clause fragment, not an action.
const ACTION_MARKERS: &[&str] = &[
    "and ",
    "or ",
    "whichever",
    "except",
    "unless",
    "after ",
    "the date of",
    "of this",
];

/// Every `Month D, YYYY` date, deduplicated in order.
pub fn extract_dates(text: &str) -> Vec<String> {
    let mut dates: Vec<String> = Vec::new();
    for m in LONG_DATE.find_iter(text) {
        let date = collapse_whitespace(m.as_str());
        if !dates.contains(&date) {
            dates.push(date);
        }
    }
    dates
}

/// Every `fiscal year NNNN`, deduplicated in order.
pub fn extract_fiscal_years(text: &str) -> Vec<String> {
    let mut years: Vec<String> = Vec::new();
    for caps in FISCAL_YEAR.captures_iter(text) {
        let year = caps[1].to_string();
        if !years.contains(&year) {
            years.push(year);
        }
    }
    years
}

/// Deadline extractor.
pub struct DeadlineExtractor {
    config: ExtractionConfig,
}

impl DeadlineExtractor {
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// The obligated action: what follows the deadline clause, else what
    /// precedes it within the same sentence.
    fn action(&self, text: &str, start: usize, end: usize) -> String {
        let after = sentence_after(text, end, self.config.forward_window_chars);
        if let Some(action) = self.clean_action(after) {
            return action;
        }

        let before = sentence_before(text, start, self.config.backward_window_chars);
        self.clean_action(before)
            .unwrap_or_else(|| UNSPECIFIED.to_string())
    }

    fn clean_action(&self, raw: &str) -> Option<String> {
        let collapsed = collapse_whitespace(raw);
        let trimmed = collapsed.trim_start_matches([',', ' ']);
        let stripped = ACTION_SUBJECT.replace(trimmed, "");
        let action = stripped.trim().trim_end_matches([',', ';', ':', ' ']);

        if action.chars().count() < 10 {
            return None;
        }
        if action.chars().next().is_some_and(|c| !c.is_alphanumeric()) {
            return None;
        }
        let lower = action.to_lowercase();
        if ACTION_MARKERS.iter().any(|m| lower.starts_with(m)) {
            return None;
        }

        Some(truncate_at_word(action, self.config.max_action_chars))
    }
}

impl Default for DeadlineExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DeadlineExtractor {
    type Output = DeadlineFact;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        NOT_LATER_THAN
            .captures_iter(text)
            .filter_map(|caps| {
                let clause = caps.get(0)?;
                let date = match (caps.get(2), caps.get(1)) {
                    (Some(date), _) => collapse_whitespace(date.as_str()),
                    (None, Some(days)) => format!("{} days", days.as_str()),
                    (None, None) => return None,
                };
                Some(DeadlineFact {
                    date,
                    action: self.action(text, clause.start(), clause.end()),
                })
            })
            .collect()
    }
}
