//! Version comparator: line diff, similarity, spending lines and sections.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::{ComparisonError, Result};
use crate::extract::rules::{AmountExtractor, FieldExtractor};
use crate::models::comparison::{
    DiffResult, SectionAnalysis, SectionChange, SectionOutcome, SectionPair, SpendingChange,
    VersionComparison, VersionText,
};
use crate::models::config::ComparisonConfig;
use crate::semantic::{with_timeout, SectionComparisonRequest, SemanticDiffer};
use crate::text::truncate_chars;

use super::myers::align;
use super::sections::{pair_sections, split_sections};

/// Bill version comparator.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    config: ComparisonConfig,
}

impl Comparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ComparisonConfig) -> Self {
        Self { config }
    }

    fn deadline(&self) -> Option<Instant> {
        Instant::now().checked_add(Duration::from_millis(self.config.diff_timeout_ms))
    }

    /// Line-level diff, character similarity and section pairing of two texts.
    pub fn diff(&self, text_a: &str, text_b: &str) -> DiffResult {
        let lines_a: Vec<&str> = text_a.lines().collect();
        let lines_b: Vec<&str> = text_b.lines().collect();
        let alignment = align(&lines_a, &lines_b, self.deadline());

        let removals: Vec<String> = unmatched(&lines_a, &alignment.kept_a);
        let additions: Vec<String> = unmatched(&lines_b, &alignment.kept_b);

        let result = DiffResult {
            spending_added: self.spending_lines(&additions),
            spending_removed: self.spending_lines(&removals),
            similarity_ratio: self.similarity_ratio(text_a, text_b),
            section_pairs: pair_sections(&split_sections(text_a), &split_sections(text_b)),
            additions,
            removals,
        };

        debug!(
            "Diff: +{} -{} lines, similarity {:.3}, {} sections",
            result.additions.len(),
            result.removals.len(),
            result.similarity_ratio,
            result.section_pairs.len()
        );
        result
    }

    /// `2·M / (|A| + |B|)` over characters; 1.0 when both are empty.
    pub fn similarity_ratio(&self, text_a: &str, text_b: &str) -> f64 {
        let a: Vec<char> = text_a.chars().collect();
        let b: Vec<char> = text_b.chars().collect();
        let total = a.len() + b.len();
        if total == 0 {
            return 1.0;
        }
        let matched = align(&a, &b, self.deadline()).matched();
        (2 * matched) as f64 / total as f64
    }

    /// Every dollar amount on the given lines, with the line as context.
    pub fn spending_lines(&self, lines: &[String]) -> Vec<SpendingChange> {
        let amounts = AmountExtractor::new();
        lines
            .iter()
            .flat_map(|line| {
                let context = truncate_chars(line.trim(), self.config.spending_context_chars).to_string();
                amounts
                    .extract_all(line)
                    .into_iter()
                    .map(move |m| SpendingChange {
                        amount: m.display,
                        context: context.clone(),
                    })
            })
            .collect()
    }

    /// Compare two labelled versions, optionally asking a collaborator to
    /// explain each changed section.
    ///
    /// Fails only when either version has no text.
    pub async fn compare_versions(
        &self,
        from: &VersionText,
        to: &VersionText,
        differ: Option<&dyn SemanticDiffer>,
    ) -> Result<VersionComparison> {
        for version in [from, to] {
            if version.text.trim().is_empty() {
                return Err(ComparisonError::EmptyVersion {
                    label: version.label.clone(),
                }
                .into());
            }
        }

        let diff = self.diff(&from.text, &to.text);
        let sections = match differ {
            Some(differ) => self.analyze_sections(&diff, from, to, differ).await,
            None => Vec::new(),
        };

        info!(
            "Compared {} -> {}: +{} -{} lines, {} sections analyzed",
            from.label,
            to.label,
            diff.additions_count(),
            diff.removals_count(),
            sections.len()
        );

        Ok(VersionComparison {
            from_version: from.label.clone(),
            to_version: to.label.clone(),
            diff,
            sections,
        })
    }

    async fn analyze_sections(
        &self,
        diff: &DiffResult,
        from: &VersionText,
        to: &VersionText,
        differ: &dyn SemanticDiffer,
    ) -> Vec<SectionAnalysis> {
        let mut analyses = Vec::new();

        for pair in diff.changed_sections().take(self.config.max_semantic_sections) {
            let outcome = match pair.change() {
                SectionChange::Added => SectionOutcome::Added {
                    summary: "New section added".to_string(),
                    excerpt: self.excerpt(pair.text_b.as_deref()),
                },
                SectionChange::Removed => SectionOutcome::Removed {
                    summary: "Section removed".to_string(),
                    excerpt: self.excerpt(pair.text_a.as_deref()),
                },
                SectionChange::Modified => self.explain(pair, from, to, differ).await,
                SectionChange::Unchanged => continue,
            };
            analyses.push(SectionAnalysis {
                section: pair.heading.clone(),
                outcome,
            });
        }

        analyses
    }

    async fn explain(
        &self,
        pair: &SectionPair,
        from: &VersionText,
        to: &VersionText,
        differ: &dyn SemanticDiffer,
    ) -> SectionOutcome {
        let max = self.config.max_section_chars;
        let request = SectionComparisonRequest {
            text_a: truncate_chars(pair.text_a.as_deref().unwrap_or_default(), max).to_string(),
            text_b: truncate_chars(pair.text_b.as_deref().unwrap_or_default(), max).to_string(),
            label_a: format!("{} - {}", from.label, pair.heading),
            label_b: format!("{} - {}", to.label, pair.heading),
        };

        let limit = Duration::from_secs(self.config.collaborator_timeout_secs);
        match with_timeout(limit, differ.compare_sections(request)).await {
            Ok(semantic) => SectionOutcome::Semantic(semantic),
            Err(e) => {
                warn!("Semantic diff failed for {}: {}", pair.heading, e);
                SectionOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn excerpt(&self, text: Option<&str>) -> String {
        truncate_chars(text.unwrap_or_default(), self.config.section_excerpt_chars).to_string()
    }
}

fn unmatched(lines: &[&str], kept: &[bool]) -> Vec<String> {
    lines
        .iter()
        .zip(kept)
        .filter(|(_, kept)| !**kept)
        .map(|(line, _)| line.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CollaboratorError, PorkchopError};
    use crate::models::comparison::SemanticDiff;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Records requests; fails for headings listed in `fail_on`.
    #[derive(Default)]
    struct FakeDiffer {
        fail_on: Vec<&'static str>,
        requests: Mutex<Vec<SectionComparisonRequest>>,
    }

    #[async_trait]
    impl SemanticDiffer for FakeDiffer {
        async fn compare_sections(
            &self,
            request: SectionComparisonRequest,
        ) -> std::result::Result<SemanticDiff, CollaboratorError> {
            let failing = self.fail_on.iter().any(|h| request.label_a.ends_with(h));
            let summary = format!("changed {}", request.label_b);
            self.requests.lock().unwrap().push(request);
            if failing {
                return Err(CollaboratorError::Request("rate limited".into()));
            }
            Ok(SemanticDiff {
                summary,
                ..Default::default()
            })
        }
    }

    struct SlowDiffer;

    #[async_trait]
    impl SemanticDiffer for SlowDiffer {
        async fn compare_sections(
            &self,
            _request: SectionComparisonRequest,
        ) -> std::result::Result<SemanticDiff, CollaboratorError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(SemanticDiff::default())
        }
    }

    const VERSION_A: &str = "SEC. 1. Short title.\nSEC. 2. The program receives $100,000,000 for operations.\nSEC. 3. Repealed provision.";
    const VERSION_B: &str = "SEC. 1. Short title.\nSEC. 2. The program receives $200,000,000 for operations.\nSEC. 4. New reporting duty.";

    #[test]
    fn test_identical_texts() {
        let result = Comparator::new().diff("same text", "same text");
        assert_eq!(result.additions_count(), 0);
        assert_eq!(result.removals_count(), 0);
        assert_eq!(result.similarity_ratio, 1.0);
    }

    #[test]
    fn test_empty_texts() {
        let result = Comparator::new().diff("", "");
        assert_eq!(result.additions_count(), 0);
        assert_eq!(result.removals_count(), 0);
        assert_eq!(result.similarity_ratio, 1.0);
        assert!(result.section_pairs.is_empty());
    }

    #[test]
    fn test_additions_and_removals() {
        let comparator = Comparator::new();

        let result = comparator.diff("line one", "line one\nline two");
        assert_eq!(result.additions, vec!["line two"]);
        assert!(result.removals.is_empty());

        let result = comparator.diff("line one\nline two", "line one");
        assert_eq!(result.removals, vec!["line two"]);
        assert!(result.additions.is_empty());
    }

    #[test]
    fn test_similarity_ratio() {
        let comparator = Comparator::new();
        let ratio = comparator.similarity_ratio(
            "The quick brown fox jumps over the lazy dog.",
            "The quick brown cat jumps over the lazy dog.",
        );
        assert!(ratio > 0.0 && ratio < 1.0);

        // "abcd" vs "abxd": three shared characters.
        assert_eq!(comparator.similarity_ratio("abcd", "abxd"), 0.75);
        assert_eq!(comparator.similarity_ratio("", "abc"), 0.0);
    }

    #[test]
    fn test_spending_changes() {
        let result = Comparator::new().diff(
            "The program receives $100,000,000 for operations.",
            "The program receives $200,000,000 for operations.",
        );
        assert_eq!(
            result.spending_added,
            vec![SpendingChange {
                amount: "$200,000,000".into(),
                context: "The program receives $200,000,000 for operations.".into(),
            }]
        );
        assert_eq!(result.spending_removed[0].amount, "$100,000,000");
    }

    #[test]
    fn test_spending_lines_every_amount() {
        let lines = vec![
            "$100,000,000 for disaster relief".to_string(),
            "no money here".to_string(),
            "  $50 million for education and $5 for paper  ".to_string(),
        ];
        let spending = Comparator::new().spending_lines(&lines);

        assert_eq!(spending.len(), 3);
        assert_eq!(spending[1].amount, "$50 million");
        assert_eq!(spending[2].context, "$50 million for education and $5 for paper");
    }

    #[test]
    fn test_section_pairs_cover_union() {
        let result = Comparator::new().diff(VERSION_A, VERSION_B);
        let headings: Vec<&str> = result.section_pairs.iter().map(|p| p.heading.as_str()).collect();

        assert_eq!(headings, vec!["SEC. 1", "SEC. 2", "SEC. 3", "SEC. 4"]);
        assert_eq!(result.section("SEC. 3").unwrap().text_b, None);
        assert_eq!(result.section("SEC. 4").unwrap().text_a, None);
        assert_eq!(result.changed_sections().count(), 3);
    }

    #[tokio::test]
    async fn test_compare_versions_rejects_blank_text() {
        let err = Comparator::new()
            .compare_versions(&VersionText::new("ih", VERSION_A), &VersionText::new("enr", "  \n"), None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PorkchopError::Comparison(ComparisonError::EmptyVersion { ref label }) if label == "enr"
        ));
    }

    #[tokio::test]
    async fn test_compare_versions_without_collaborator() {
        let comparison = Comparator::new()
            .compare_versions(&VersionText::new("ih", VERSION_A), &VersionText::new("enr", VERSION_B), None)
            .await
            .unwrap();

        assert_eq!(comparison.from_version, "ih");
        assert_eq!(comparison.to_version, "enr");
        assert!(comparison.sections.is_empty());
        assert_eq!(comparison.diff.removals.len(), 2);
    }

    #[tokio::test]
    async fn test_compare_versions_with_collaborator() {
        let differ = FakeDiffer::default();
        let comparison = Comparator::new()
            .compare_versions(
                &VersionText::new("ih", VERSION_A),
                &VersionText::new("enr", VERSION_B),
                Some(&differ),
            )
            .await
            .unwrap();

        let requests = differ.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].label_a, "ih - SEC. 2");
        assert_eq!(requests[0].label_b, "enr - SEC. 2");

        let outcomes: Vec<(&str, &str)> = comparison
            .sections
            .iter()
            .map(|s| (s.section.as_str(), s.outcome.summary()))
            .collect();
        assert_eq!(
            outcomes,
            vec![
                ("SEC. 2", "changed enr - SEC. 2"),
                ("SEC. 3", "Section removed"),
                ("SEC. 4", "New section added"),
            ]
        );
        assert_eq!(
            comparison.sections[2].outcome,
            SectionOutcome::Added {
                summary: "New section added".into(),
                excerpt: "SEC. 4. New reporting duty.".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_collaborator_failure_is_isolated() {
        let a = "SEC. 1. alpha one\nSEC. 2. beta one\nSEC. 3. gamma one";
        let b = "SEC. 1. alpha two\nSEC. 2. beta two\nSEC. 3. gamma two";
        let differ = FakeDiffer {
            fail_on: vec!["SEC. 2"],
            ..Default::default()
        };

        let comparison = Comparator::new()
            .compare_versions(&VersionText::new("ih", a), &VersionText::new("rh", b), Some(&differ))
            .await
            .unwrap();

        assert_eq!(comparison.sections.len(), 3);
        assert!(matches!(comparison.sections[0].outcome, SectionOutcome::Semantic(_)));
        assert_eq!(
            comparison.sections[1].outcome,
            SectionOutcome::Failed {
                reason: "request failed: rate limited".into()
            }
        );
        assert!(matches!(comparison.sections[2].outcome, SectionOutcome::Semantic(_)));
    }

    #[tokio::test]
    async fn test_collaborator_calls_are_capped_and_truncated() {
        let a: Vec<String> = (1..=30).map(|i| format!("SEC. {}. {} old", i, "x".repeat(50))).collect();
        let b: Vec<String> = (1..=30).map(|i| format!("SEC. {}. {} new", i, "x".repeat(50))).collect();
        let differ = FakeDiffer::default();
        let comparator = Comparator::with_config(ComparisonConfig {
            max_semantic_sections: 5,
            max_section_chars: 20,
            ..Default::default()
        });

        let comparison = comparator
            .compare_versions(
                &VersionText::new("ih", a.join("\n")),
                &VersionText::new("enr", b.join("\n")),
                Some(&differ),
            )
            .await
            .unwrap();

        assert_eq!(comparison.sections.len(), 5);
        let requests = differ.requests.lock().unwrap();
        assert_eq!(requests.len(), 5);
        assert!(requests.iter().all(|r| r.text_a.chars().count() == 20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_collaborator_timeout_becomes_failure() {
        let comparator = Comparator::with_config(ComparisonConfig {
            collaborator_timeout_secs: 1,
            ..Default::default()
        });

        let comparison = comparator
            .compare_versions(
                &VersionText::new("ih", VERSION_A),
                &VersionText::new("enr", VERSION_B),
                Some(&SlowDiffer),
            )
            .await
            .unwrap();

        assert!(matches!(comparison.sections[0].outcome, SectionOutcome::Failed { .. }));
        assert_eq!(comparison.sections[1].outcome.summary(), "Section removed");
    }
}
