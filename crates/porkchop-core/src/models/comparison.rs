//! Results of comparing two versions of bill text.

use serde::{Deserialize, Serialize};

/// A dollar amount seen on an added or removed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingChange {
    pub amount: String,
    pub context: String,
}

/// How a heading-keyed section differs between two versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionChange {
    Added,
    Removed,
    Modified,
    Unchanged,
}

/// One heading with its body in each version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPair {
    pub heading: String,
    pub text_a: Option<String>,
    pub text_b: Option<String>,
}

impl SectionPair {
    pub fn change(&self) -> SectionChange {
        match (&self.text_a, &self.text_b) {
            (None, Some(_)) => SectionChange::Added,
            (Some(_), None) => SectionChange::Removed,
            (Some(a), Some(b)) if a != b => SectionChange::Modified,
            _ => SectionChange::Unchanged,
        }
    }
}

/// Line-level and section-level differences between two texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Lines only in the second text, in order.
    pub additions: Vec<String>,
    /// Lines only in the first text, in order.
    pub removals: Vec<String>,
    /// `2·M / (|A| + |B|)` over characters.
    pub similarity_ratio: f64,
    pub spending_added: Vec<SpendingChange>,
    pub spending_removed: Vec<SpendingChange>,
    /// Union of headings in first-appearance order.
    pub section_pairs: Vec<SectionPair>,
}

impl DiffResult {
    pub fn additions_count(&self) -> usize {
        self.additions.len()
    }

    pub fn removals_count(&self) -> usize {
        self.removals.len()
    }

    /// Look up a section pair by heading.
    pub fn section(&self, heading: &str) -> Option<&SectionPair> {
        self.section_pairs.iter().find(|p| p.heading == heading)
    }

    /// Section pairs whose bodies differ.
    pub fn changed_sections(&self) -> impl Iterator<Item = &SectionPair> {
        self.section_pairs
            .iter()
            .filter(|p| p.change() != SectionChange::Unchanged)
    }
}

/// A labelled version of a bill's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionText {
    /// Version code, e.g. `ih` or `enr`.
    pub label: String,
    pub text: String,
}

impl VersionText {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modification {
    pub what: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingDelta {
    pub item: String,
    #[serde(default)]
    pub old_amount: Option<String>,
    #[serde(default)]
    pub new_amount: Option<String>,
    #[serde(default)]
    pub change: String,
}

/// Structured answer from the semantic-diff collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticDiff {
    pub summary: String,
    pub additions: Vec<String>,
    pub removals: Vec<String>,
    pub modifications: Vec<Modification>,
    pub spending_changes: Vec<SpendingDelta>,
}

/// What was learned about one changed section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionOutcome {
    /// The collaborator compared both bodies.
    Semantic(SemanticDiff),
    /// The section exists only in the newer version.
    Added { summary: String, excerpt: String },
    /// The section exists only in the older version.
    Removed { summary: String, excerpt: String },
    /// The collaborator call failed; other sections are unaffected.
    Failed { reason: String },
}

impl SectionOutcome {
    pub fn summary(&self) -> &str {
        match self {
            SectionOutcome::Semantic(diff) => &diff.summary,
            SectionOutcome::Added { summary, .. } | SectionOutcome::Removed { summary, .. } => {
                summary
            }
            SectionOutcome::Failed { .. } => "analysis unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionAnalysis {
    pub section: String,
    pub outcome: SectionOutcome,
}

/// Full comparison of two stored versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionComparison {
    pub from_version: String,
    pub to_version: String,
    pub diff: DiffResult,
    /// Per-section analysis; empty when no semantic collaborator was supplied.
    pub sections: Vec<SectionAnalysis>,
}
