//! Pork score results and bill-level score reports.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How a score was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMethod {
    Heuristic,
    Blended,
}

/// Anomaly score for one spending item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PorkScoreResult {
    /// 0 (on-topic) to 100 (textbook earmark).
    pub score: u32,
    pub flags: BTreeSet<String>,
    pub method: ScoreMethod,
    /// Collaborator explanation, present for blended scores.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl PorkScoreResult {
    pub fn heuristic(score: u32, flags: BTreeSet<String>) -> Self {
        Self {
            score: score.min(100),
            flags,
            method: ScoreMethod::Heuristic,
            reasoning: None,
        }
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }
}

/// Answer from the semantic-scoring collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticScore {
    /// Nominally 0-100; clamped before blending.
    pub score: f64,
    pub reasoning: String,
    pub flags: Vec<String>,
}

/// One scored spending item within a bill report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub item_id: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    pub result: PorkScoreResult,
}

/// Aggregate scores for every spending item in a bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillScoreReport {
    pub title: String,
    pub items_scored: usize,
    /// Mean score rounded to one decimal place.
    pub avg_score: f64,
    pub max_score: u32,
    /// Items at or above the high-pork threshold, highest first.
    pub high_pork: Vec<ScoredItem>,
    /// Every item, highest first.
    pub all_scores: Vec<ScoredItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_method_names() {
        let result = PorkScoreResult::heuristic(140, BTreeSet::new());
        assert_eq!(result.score, 100);
        assert_eq!(serde_json::to_value(result.method).unwrap(), "heuristic");
        assert_eq!(serde_json::to_value(ScoreMethod::Blended).unwrap(), "blended");

        // Collaborator answers are always blended with the heuristic.
        assert!(serde_json::from_str::<ScoreMethod>(r#""ai""#).is_err());
    }
}
