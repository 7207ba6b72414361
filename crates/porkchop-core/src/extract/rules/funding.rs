//! Funding facts: dollar amounts with purpose, recipient and availability.
//!
//! Purpose and recipient are resolved by ordered rule chains. The first rule
//! producing a valid candidate wins, so rule order is significant.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::models::bill::{FundingFact, UNSPECIFIED};
use crate::models::config::ExtractionConfig;
use crate::text::{collapse_whitespace, truncate_at_word, truncate_chars};

use super::amounts::{AmountExtractor, DollarMatch};
use super::patterns::*;
use super::{lines_before, sentence_after, sentence_before, FieldExtractor};

/// One step of the purpose chain.
struct PurposeRule {
    name: &'static str,
    pattern: &'static Regex,
    /// Candidates starting with one of these are skipped, not accepted.
    skip_prefixes: &'static [&'static str],
}

lazy_static! {
    static ref PURPOSE_RULES: Vec<PurposeRule> = vec![
        PurposeRule {
            name: "necessary_expenses",
            pattern: &PURPOSE_NECESSARY_EXPENSES,
            skip_prefixes: &[],
        },
        PurposeRule {
            name: "additional_amount",
            pattern: &PURPOSE_ADDITIONAL_AMOUNT,
            skip_prefixes: &[],
        },
        PurposeRule {
            name: "made_available",
            pattern: &PURPOSE_MADE_AVAILABLE,
            skip_prefixes: &[],
        },
        PurposeRule {
            name: "to_verb",
            pattern: &PURPOSE_TO_VERB,
            skip_prefixes: &[],
        },
        PurposeRule {
            name: "generic_for",
            pattern: &PURPOSE_GENERIC_FOR,
            skip_prefixes: &[
                "fiscal year",
                "the fiscal year",
                "each fiscal year",
                "the period",
                "a period",
                "an additional amount",
                "additional amount",
                "the current fiscal year",
            ],
        },
    ];

    static ref RECIPIENT_RULES: Vec<(&'static str, &'static Regex)> = vec![
        ("transferred_to", &*RECIPIENT_TRANSFERRED),
        ("secretary", &*RECIPIENT_SECRETARY),
        ("department", &*RECIPIENT_DEPARTMENT),
        ("agency", &*RECIPIENT_AGENCY),
    ];
}

/// Phrases that look like purposes but carry no information.
const JUNK_PURPOSES: &[&str] = &[
    "such purpose",
    "such purposes",
    "this section",
    "the purposes of this section",
    "carrying out this section",
    "this act",
    "such amounts",
    "expenses",
    "such expenses",
    "other purposes",
];

/// Funding fact extractor.
pub struct FundingExtractor {
    config: ExtractionConfig,
}

impl FundingExtractor {
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    fn build_fact(&self, text: &str, amount: DollarMatch) -> FundingFact {
        let forward = sentence_after(text, amount.end, self.config.forward_window_chars);
        let context = collapse_whitespace(forward);

        let purpose = self
            .forward_purpose(&context)
            .or_else(|| self.backward_purpose(text, amount.start))
            .unwrap_or_else(|| UNSPECIFIED.to_string());

        let source = collapse_whitespace(&text[amount.start..amount.end + forward.len()]);

        FundingFact {
            display_amount: amount.display,
            amount_numeric: amount.value,
            purpose,
            recipient: find_recipient(&context),
            availability: find_availability(&context),
            fiscal_years: find_fiscal_years(&context),
            source_text: truncate_chars(&source, self.config.max_source_chars).to_string(),
        }
    }

    fn forward_purpose(&self, context: &str) -> Option<String> {
        PURPOSE_RULES.iter().find_map(|rule| {
            rule.pattern
                .captures_iter(context)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
                .find_map(|candidate| self.accept(rule, candidate))
        })
    }

    /// Fallbacks when the text after the amount names no purpose: the
    /// preceding sentence, then the nearest structural heading, then the
    /// nearest ALL-CAPS heading line.
    fn backward_purpose(&self, text: &str, start: usize) -> Option<String> {
        let before = collapse_whitespace(sentence_before(text, start, self.config.backward_window_chars));

        let from_sentence = PURPOSE_RULES.iter().find_map(|rule| {
            let candidates: Vec<&str> = rule
                .pattern
                .captures_iter(&before)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
                .collect();
            candidates
                .into_iter()
                .rev()
                .find_map(|candidate| self.accept(rule, candidate))
        });
        if from_sentence.is_some() {
            return from_sentence;
        }

        let lookback = lines_before(text, start, self.config.heading_lookback_chars);

        let from_heading = STRUCTURE_HEADING
            .captures_iter(lookback)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .find_map(|caps| self.validate(caps.get(1)?.as_str()));
        if from_heading.is_some() {
            return from_heading;
        }

        CAPS_HEADING
            .captures_iter(lookback)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .filter(|line| !is_structural(line))
            .find_map(|line| self.validate(line))
    }

    fn accept(&self, rule: &PurposeRule, candidate: &str) -> Option<String> {
        let lower = candidate.trim().to_lowercase();
        if rule.skip_prefixes.iter().any(|p| lower.starts_with(p)) {
            return None;
        }
        let accepted = self.validate(candidate)?;
        trace!("Purpose rule {} matched: {}", rule.name, accepted);
        Some(accepted)
    }

    /// Clean a purpose candidate, or reject it.
    fn validate(&self, candidate: &str) -> Option<String> {
        let cleaned = candidate
            .trim()
            .trim_matches(|c: char| c == '"' || c == '“' || c == '”' || c == '\'')
            .trim_end_matches(['.', ',', ';', ':'])
            .trim();

        if cleaned.chars().count() < self.config.min_purpose_chars {
            return None;
        }

        let lower = cleaned.to_lowercase();
        let junk = JUNK_PURPOSES
            .iter()
            .any(|j| lower == *j || lower.starts_with(&format!("{} ", j)));
        if junk || PURPOSE_TIME_SPAN.is_match(&lower) {
            return None;
        }

        Some(truncate_at_word(cleaned, self.config.max_purpose_chars))
    }
}

impl Default for FundingExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for FundingExtractor {
    type Output = FundingFact;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AmountExtractor::new()
            .extract_all(text)
            .into_iter()
            .map(|amount| self.build_fact(text, amount))
            .collect()
    }
}

fn is_structural(line: &str) -> bool {
    ["DIVISION", "TITLE", "SEC"].iter().any(|p| line.starts_with(p))
}

fn find_recipient(context: &str) -> Option<String> {
    RECIPIENT_RULES.iter().find_map(|(_, pattern)| {
        let raw = pattern.captures(context)?.get(1)?.as_str();
        let name = raw.split('—').next().unwrap_or(raw);
        let name = name
            .trim()
            .trim_matches(|c: char| c == '"' || c == '“' || c == '”')
            .trim();
        (!name.is_empty()).then(|| name.to_string())
    })
}

fn find_availability(context: &str) -> Option<String> {
    let until = AVAILABILITY.captures(context)?.get(1)?.as_str();
    if until.eq_ignore_ascii_case("expended") {
        Some("until expended".to_string())
    } else {
        Some(collapse_whitespace(until))
    }
}

fn find_fiscal_years(context: &str) -> Option<String> {
    let mut years: Vec<String> = Vec::new();
    for caps in FISCAL_YEAR_SPAN.captures_iter(context) {
        let span = match (caps.get(2), caps.get(3)) {
            (Some(conj), Some(end)) => {
                format!("{} {} {}", &caps[1], conj.as_str().to_lowercase(), end.as_str())
            }
            _ => caps[1].to_string(),
        };
        if !years.contains(&span) {
            years.push(span);
        }
    }
    (!years.is_empty()).then(|| years.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(text: &str) -> FundingFact {
        FundingExtractor::new().extract(text).unwrap()
    }

    #[test]
    fn test_additional_amount_purpose_and_availability() {
        let fact = first(
            "$5,691,000,000, for an additional amount for fiscal year 2025, to remain available \
             until September 30, 2029, for the Virginia Class Submarine program.",
        );

        assert_eq!(fact.amount_numeric, 5_691_000_000.0);
        assert_eq!(fact.display_amount, "$5,691,000,000");
        assert!(fact.purpose.to_lowercase().contains("virginia class submarine"));
        assert_eq!(fact.availability.as_deref(), Some("September 30, 2029"));
        assert_eq!(fact.fiscal_years.as_deref(), Some("2025"));
    }

    #[test]
    fn test_generic_for_purpose() {
        let fact = first("$100,000,000 for disaster relief operations.");
        assert_eq!(fact.purpose, "disaster relief operations");
        assert_eq!(fact.source_text, "$100,000,000 for disaster relief operations");
        assert_eq!(fact.recipient, None);
        assert_eq!(fact.availability, None);
    }

    #[test]
    fn test_generic_for_skips_fiscal_year_boilerplate() {
        let fact = first("$20,000,000 for fiscal year 2025, for wildfire suppression.");
        assert_eq!(fact.purpose, "wildfire suppression");
    }

    #[test]
    fn test_to_verb_purpose() {
        let fact = first("$3,000,000 to carry out the lead hazard reduction program.");
        assert_eq!(fact.purpose, "the lead hazard reduction program");
    }

    #[test]
    fn test_backward_necessary_expenses() {
        let fact = first("For necessary expenses of the Office of Inspector General, $5,000,000.");
        assert_eq!(fact.purpose, "the Office of Inspector General");
    }

    #[test]
    fn test_structure_heading_fallback() {
        let fact = first("TITLE II—OPERATION AND MAINTENANCE\nSEC. 201. $3,000,000.");
        assert_eq!(fact.purpose, "OPERATION AND MAINTENANCE");
    }

    #[test]
    fn test_caps_heading_fallback() {
        let fact = first("PROCUREMENT OF AMMUNITION\nIn total, $7,000,000.");
        assert_eq!(fact.purpose, "PROCUREMENT OF AMMUNITION");
    }

    #[test]
    fn test_unresolved_purpose_is_unspecified() {
        assert_eq!(first("$50.").purpose, UNSPECIFIED);
        assert_eq!(first("Pay $50 for such purposes.").purpose, UNSPECIFIED);
    }

    #[test]
    fn test_recipient_chain() {
        let fact = first("$10,000,000 shall be transferred to the \"Disaster Relief Fund\".");
        assert_eq!(fact.recipient.as_deref(), Some("Disaster Relief Fund"));

        let fact = first("$2,000,000 to the Secretary of Agriculture for grants.");
        assert_eq!(fact.recipient.as_deref(), Some("Secretary of Agriculture"));
        assert_eq!(fact.purpose, "grants");

        let fact = first("$9,000,000 to the Federal Aviation Administration for runway repairs.");
        assert_eq!(fact.recipient.as_deref(), Some("Federal Aviation Administration"));
    }

    #[test]
    fn test_until_expended_and_fiscal_year_spans() {
        let fact = first(
            "$1.5 billion for fiscal years 2025 through 2027 and fiscal year 2025, \
             for bridge repair, to remain available until expended.",
        );
        assert_eq!(fact.amount_numeric, 1_500_000_000.0);
        assert_eq!(fact.availability.as_deref(), Some("until expended"));
        assert_eq!(fact.fiscal_years.as_deref(), Some("2025 through 2027, 2025"));
        assert_eq!(fact.purpose, "bridge repair");
    }

    #[test]
    fn test_long_purpose_truncated_at_word() {
        let long = "the modernization of ".repeat(20);
        let fact = first(&format!("$1,000 for {}systems.", long));
        assert!(fact.purpose.chars().count() <= 150);
        assert!(fact.purpose.ends_with("of") || fact.purpose.ends_with("modernization") || fact.purpose.ends_with("the"));
    }

    #[test]
    fn test_every_amount_yields_a_fact() {
        let facts = FundingExtractor::new().extract_all("$1 for roads. $2 for rails; $3.");
        assert_eq!(facts.len(), 3);
        assert_eq!(facts[0].purpose, "roads");
        assert_eq!(facts[1].purpose, "rails");
        assert_eq!(facts[2].purpose, UNSPECIFIED);
    }
}
