//! Configuration structures for the bill processing pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the porkchop pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PorkchopConfig {
    /// Fact extraction configuration.
    pub extraction: ExtractionConfig,

    /// Chunking configuration.
    pub chunking: ChunkingConfig,

    /// Version comparison configuration.
    pub comparison: ComparisonConfig,

    /// Pork scoring configuration.
    pub scoring: ScoringConfig,
}

/// How cleaned text is segmented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkStrategy {
    /// Greedy line packing up to `max_chars`.
    Size,
    /// DIVISION/TITLE boundaries, size-split when oversized.
    #[default]
    Structure,
}

/// Chunker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Segmentation strategy.
    pub strategy: ChunkStrategy,

    /// Upper bound on chunk length in characters.
    pub max_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            strategy: ChunkStrategy::Structure,
            max_chars: 20_000,
        }
    }
}

/// Funding and deadline extraction windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Characters after a dollar amount searched for purpose/recipient.
    pub forward_window_chars: usize,

    /// Characters before a dollar amount searched when the forward context has no purpose.
    pub backward_window_chars: usize,

    /// How far back to look for a Division/Title or ALL-CAPS heading.
    pub heading_lookback_chars: usize,

    /// Shortest purpose accepted.
    pub min_purpose_chars: usize,

    /// Longer purposes are cut at a word boundary.
    pub max_purpose_chars: usize,

    /// Longer deadline actions are cut at a word boundary.
    pub max_action_chars: usize,

    /// Cap on the stored source text of a funding fact.
    pub max_source_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            forward_window_chars: 250,
            backward_window_chars: 300,
            heading_lookback_chars: 2_000,
            min_purpose_chars: 5,
            max_purpose_chars: 150,
            max_action_chars: 200,
            max_source_chars: 300,
        }
    }
}

/// Version comparison configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Maximum changed sections sent to the semantic-diff collaborator.
    pub max_semantic_sections: usize,

    /// Per-version text cap for one collaborator call.
    pub max_section_chars: usize,

    /// Excerpt length for added/removed section notes.
    pub section_excerpt_chars: usize,

    /// Context length recorded for spending lines.
    pub spending_context_chars: usize,

    /// Time budget for the character-level similarity diff.
    pub diff_timeout_ms: u64,

    /// Timeout for one collaborator call.
    pub collaborator_timeout_secs: u64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            max_semantic_sections: 20,
            max_section_chars: 10_000,
            section_excerpt_chars: 500,
            spending_context_chars: 200,
            diff_timeout_ms: 2_000,
            collaborator_timeout_secs: 60,
        }
    }
}

/// Additive heuristic weights. Evaluated in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Points per distinct earmark signal.
    pub earmark_signal: u32,

    /// Cap on the earmark signal contribution.
    pub earmark_signal_cap: u32,

    pub geographic_specificity: u32,
    pub named_entity: u32,
    pub small_specific_amount: u32,
    pub potentially_unrelated: u32,
    pub open_ended_availability: u32,

    /// Amounts strictly between zero and this are "small".
    pub small_earmark_threshold: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            earmark_signal: 15,
            earmark_signal_cap: 45,
            geographic_specificity: 20,
            named_entity: 15,
            small_specific_amount: 10,
            potentially_unrelated: 15,
            open_ended_availability: 5,
            small_earmark_threshold: 10_000_000.0,
        }
    }
}

/// Pork scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Heuristic score at which the semantic scorer is consulted.
    pub ai_threshold: u32,

    /// Score at which an item is reported as high pork.
    pub high_pork_threshold: u32,

    /// Timeout for one collaborator call.
    pub collaborator_timeout_secs: u64,

    /// Heuristic rule weights.
    pub weights: ScoringWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ai_threshold: 30,
            high_pork_threshold: 60,
            collaborator_timeout_secs: 30,
            weights: ScoringWeights::default(),
        }
    }
}

impl PorkchopConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
