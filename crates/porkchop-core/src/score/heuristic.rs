//! Additive heuristic pork rules.
//!
//! Each rule looks at the lowercased item text and contributes points plus a
//! flag. Rules run in the order of [`RULES`].

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::bill::{SpendingItem, UNSPECIFIED};
use crate::models::config::ScoringWeights;
use crate::models::score::PorkScoreResult;

pub const FLAG_EARMARK_SIGNALS: &str = "earmark_signals";
pub const FLAG_GEOGRAPHIC: &str = "geographic_specificity";
pub const FLAG_NAMED_ENTITY: &str = "named_entity";
pub const FLAG_SMALL_AMOUNT: &str = "small_specific_amount";
pub const FLAG_UNRELATED: &str = "potentially_unrelated";
pub const FLAG_OPEN_ENDED: &str = "open_ended_availability";

/// Phrases typical of narrowly targeted spending.
pub const EARMARK_SIGNALS: &[&str] = &[
    "located in",
    "city of",
    "county of",
    "state of",
    "the university of",
    "the college of",
    "named after",
    "in honor of",
    "for the benefit of",
    "specific to",
    "exclusively for",
    "memorial",
    "institute",
    "foundation",
    "museum",
    "center for",
    "bridge",
    "highway",
    "road",
    "airport",
    "port",
    "harbor",
];

const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "act", "as", "at", "by", "for", "from", "in", "into", "of", "on", "or",
    "other", "the", "to", "with",
];

lazy_static! {
    static ref SIGNAL_PATTERNS: Vec<Regex> = EARMARK_SIGNALS
        .iter()
        .map(|phrase| {
            let words: Vec<String> = phrase.split(' ').map(regex::escape).collect();
            Regex::new(&format!(r"\b{}\b", words.join(r"\s+"))).unwrap()
        })
        .collect();

    static ref GEOGRAPHIC_TERM: Regex = Regex::new(
        r"\b(?:county|counties|districts?|parish(?:es)?|townships?|boroughs?)\b"
    ).unwrap();

    static ref INSTITUTION_TERM: Regex = Regex::new(
        r"\b(?:universit(?:y|ies)|colleges?|hospitals?|museums?|foundations?|institutes?)\b"
    ).unwrap();
}

/// Lowercased view of an item as the rules see it.
#[derive(Debug, Clone)]
pub struct RuleInput<'a> {
    /// Purpose, recipient and source text joined by spaces.
    pub combined: String,
    pub purpose: Option<String>,
    pub amount: f64,
    pub bill_title: &'a str,
}

impl<'a> RuleInput<'a> {
    pub fn new(item: &SpendingItem, bill_title: &'a str) -> Self {
        let field = |f: &Option<String>| f.as_deref().unwrap_or_default().to_lowercase();
        let purpose = field(&item.purpose);
        Self {
            combined: format!("{} {} {}", purpose, field(&item.recipient), field(&item.source_text)),
            purpose: item.purpose.as_ref().map(|_| purpose),
            amount: item.amount_numeric,
            bill_title,
        }
    }
}

/// Points a rule adds, or `None` when it does not fire.
pub type Rule = fn(&RuleInput<'_>, &ScoringWeights) -> Option<u32>;

/// Rules with their flags, in evaluation order.
pub const RULES: &[(&str, Rule)] = &[
    (FLAG_EARMARK_SIGNALS, earmark_signals),
    (FLAG_GEOGRAPHIC, geographic_specificity),
    (FLAG_NAMED_ENTITY, named_entity),
    (FLAG_SMALL_AMOUNT, small_specific_amount),
    (FLAG_UNRELATED, potentially_unrelated),
    (FLAG_OPEN_ENDED, open_ended_availability),
];

/// Run every rule over an item; the score is clamped to 100.
pub fn heuristic_score(item: &SpendingItem, bill_title: &str, weights: &ScoringWeights) -> PorkScoreResult {
    let input = RuleInput::new(item, bill_title);
    let mut score = 0u32;
    let mut flags = BTreeSet::new();

    for (flag, rule) in RULES {
        if let Some(points) = rule(&input, weights) {
            score = score.saturating_add(points);
            flags.insert(flag.to_string());
        }
    }

    PorkScoreResult::heuristic(score, flags)
}

/// Number of distinct signal phrases in the text.
pub fn count_signals(text: &str) -> usize {
    SIGNAL_PATTERNS.iter().filter(|re| re.is_match(text)).count()
}

pub fn earmark_signals(input: &RuleInput<'_>, weights: &ScoringWeights) -> Option<u32> {
    match count_signals(&input.combined) {
        0 => None,
        n => Some((n as u32).saturating_mul(weights.earmark_signal).min(weights.earmark_signal_cap)),
    }
}

pub fn geographic_specificity(input: &RuleInput<'_>, weights: &ScoringWeights) -> Option<u32> {
    GEOGRAPHIC_TERM
        .is_match(&input.combined)
        .then_some(weights.geographic_specificity)
}

pub fn named_entity(input: &RuleInput<'_>, weights: &ScoringWeights) -> Option<u32> {
    INSTITUTION_TERM
        .is_match(&input.combined)
        .then_some(weights.named_entity)
}

pub fn small_specific_amount(input: &RuleInput<'_>, weights: &ScoringWeights) -> Option<u32> {
    (input.amount > 0.0 && input.amount < weights.small_earmark_threshold)
        .then_some(weights.small_specific_amount)
}

/// A missing or blank purpose is never unrelated, so an empty item scores 0
/// whatever the bill title.
pub fn potentially_unrelated(input: &RuleInput<'_>, weights: &ScoringWeights) -> Option<u32> {
    let purpose = input.purpose.as_deref().map(str::trim).filter(|p| !p.is_empty())?;
    if input.bill_title.trim().is_empty() || purpose == UNSPECIFIED {
        return None;
    }
    let title_words = content_words(input.bill_title);
    let overlaps = content_words(purpose).iter().any(|w| title_words.contains(w));
    (!overlaps).then_some(weights.potentially_unrelated)
}

pub fn open_ended_availability(input: &RuleInput<'_>, weights: &ScoringWeights) -> Option<u32> {
    (input.combined.contains("until expended") && !input.combined.contains("fiscal year"))
        .then_some(weights.open_ended_availability)
}

/// Lowercased alphanumeric tokens minus stop words.
pub fn content_words(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}
