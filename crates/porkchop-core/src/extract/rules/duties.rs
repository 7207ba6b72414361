//! Official duties ("The Secretary shall ...").

use crate::models::bill::{DutyFact, Modal};

use super::patterns::DUTY;
use super::FieldExtractor;

/// Duty extractor.
pub struct DutyExtractor;

impl DutyExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DutyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DutyExtractor {
    type Output = DutyFact;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DUTY.captures_iter(text)
            .filter_map(|caps| {
                Some(DutyFact {
                    entity: caps.get(1)?.as_str().trim().to_string(),
                    modal: Modal::from_str(caps.get(2)?.as_str())?,
                    action: caps.get(3)?.as_str().trim().to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extracts_duty() {
        let text = "SEC. 102. The Secretary of Defense shall submit a report to Congress not later than January 15, 2025.";
        let duties = DutyExtractor::new().extract_all(text);

        assert_eq!(duties.len(), 1);
        assert_eq!(duties[0].entity, "The Secretary of Defense");
        assert_eq!(duties[0].modal, Modal::Shall);
        assert_eq!(duties[0].action, "submit a report to Congress not later than January 15, 2025");
    }

    #[test]
    fn test_modal_is_normalized() {
        let duties = DutyExtractor::new().extract_all("THE ADMINISTRATOR MAY waive the requirement; and more");
        assert_eq!(duties.len(), 1);
        assert_eq!(duties[0].modal, Modal::May);
        assert_eq!(duties[0].action, "waive the requirement");
    }

    #[test]
    fn test_short_actions_are_skipped() {
        assert!(DutyExtractor::new().extract_all("The Director shall act.").is_empty());
    }

    #[test]
    fn test_one_duty_per_line() {
        let text = "The Comptroller General shall audit the program\nThe Inspector General must review each grant award";
        let duties = DutyExtractor::new().extract_all(text);

        assert_eq!(duties.len(), 2);
        assert_eq!(duties[0].action, "audit the program");
        assert_eq!(duties[1].entity, "The Inspector General");
        assert_eq!(duties[1].modal, Modal::Must);
    }
}
