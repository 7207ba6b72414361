//! Pork scorer: heuristic, collaborator-blended and bill-level scoring.

use std::cmp::Reverse;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{Result, ScoringError};
use crate::models::bill::{BillContext, SpendingItem};
use crate::models::config::ScoringConfig;
use crate::models::score::{BillScoreReport, PorkScoreResult, ScoreMethod, ScoredItem};
use crate::semantic::{with_timeout, SemanticScorer};

use super::heuristic;

const HEURISTIC_WEIGHT: f64 = 0.3;
const SEMANTIC_WEIGHT: f64 = 0.7;

/// Spending item scorer.
#[derive(Debug, Clone, Default)]
pub struct PorkScorer {
    config: ScoringConfig,
}

impl PorkScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score an item with the heuristic rules only.
    pub fn heuristic_score(&self, item: &SpendingItem, bill_title: &str) -> PorkScoreResult {
        heuristic::heuristic_score(item, bill_title, &self.config.weights)
    }

    /// Score an item, consulting the collaborator when the heuristic score
    /// reaches `threshold`.
    ///
    /// A failed or timed-out call falls back to the heuristic result.
    pub async fn score_blended(
        &self,
        item: &SpendingItem,
        bill: &BillContext,
        scorer: &dyn SemanticScorer,
        threshold: u32,
    ) -> PorkScoreResult {
        let base = self.heuristic_score(item, &bill.title);
        if base.score < threshold {
            return base;
        }

        let limit = Duration::from_secs(self.config.collaborator_timeout_secs);
        match with_timeout(limit, scorer.score_item(item, bill)).await {
            Ok(semantic) => {
                let ai = semantic.score.clamp(0.0, 100.0);
                let blended = HEURISTIC_WEIGHT * f64::from(base.score) + SEMANTIC_WEIGHT * ai;
                let mut flags = base.flags;
                flags.extend(semantic.flags);

                debug!("Blended score {} (heuristic {}, semantic {})", blended.round(), base.score, ai);
                PorkScoreResult {
                    score: (blended.round() as u32).min(100),
                    flags,
                    method: ScoreMethod::Blended,
                    reasoning: Some(semantic.reasoning),
                }
            }
            Err(e) => {
                warn!("Semantic scoring failed for {}: {}", item.amount, e);
                base
            }
        }
    }

    /// Score every spending item of a bill, highest score first.
    ///
    /// Items are scored one after another; the collaborator is consulted at
    /// the configured `ai_threshold`.
    pub async fn score_bill(
        &self,
        items: &[(String, SpendingItem)],
        bill: &BillContext,
        scorer: Option<&dyn SemanticScorer>,
    ) -> Result<BillScoreReport> {
        if items.is_empty() {
            return Err(ScoringError::NoSpendingItems.into());
        }

        let mut all_scores = Vec::with_capacity(items.len());
        for (item_id, item) in items {
            let result = match scorer {
                Some(scorer) => {
                    self.score_blended(item, bill, scorer, self.config.ai_threshold)
                        .await
                }
                None => self.heuristic_score(item, &bill.title),
            };
            all_scores.push(ScoredItem {
                item_id: item_id.clone(),
                amount: item.amount.clone(),
                purpose: item.purpose.clone(),
                result,
            });
        }
        all_scores.sort_by_key(|s| Reverse(s.result.score));

        let total: u64 = all_scores.iter().map(|s| u64::from(s.result.score)).sum();
        let avg_score = (total as f64 / all_scores.len() as f64 * 10.0).round() / 10.0;
        let max_score = all_scores.first().map(|s| s.result.score).unwrap_or(0);
        let high_pork: Vec<ScoredItem> = all_scores
            .iter()
            .filter(|s| s.result.score >= self.config.high_pork_threshold)
            .cloned()
            .collect();

        info!(
            "Scored {} items for {}: avg {:.1}, max {}, {} high",
            all_scores.len(),
            bill.title,
            avg_score,
            max_score,
            high_pork.len()
        );

        Ok(BillScoreReport {
            title: bill.title.clone(),
            items_scored: all_scores.len(),
            avg_score,
            max_score,
            high_pork,
            all_scores,
        })
    }
}
