//! Bill extractor combining the per-category rules.

use std::time::Instant;

use tracing::debug;

use crate::models::bill::FactBundle;
use crate::models::config::ExtractionConfig;

use super::rules::{
    deadlines::{extract_dates, extract_fiscal_years},
    DeadlineExtractor, DutyExtractor, EntityExtractor, FieldExtractor, FundingExtractor,
    ReferenceExtractor,
};
use super::FactExtractor;

/// Rule-based bill fact extractor.
///
/// Stateless between calls; categories are extracted independently.
pub struct BillExtractor {
    references: ReferenceExtractor,
    funding: FundingExtractor,
    deadlines: DeadlineExtractor,
    duties: DutyExtractor,
    entities: EntityExtractor,
}

impl BillExtractor {
    /// Create an extractor with default windows and limits.
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    pub fn with_config(config: ExtractionConfig) -> Self {
        Self {
            references: ReferenceExtractor::new(),
            funding: FundingExtractor::with_config(config.clone()),
            deadlines: DeadlineExtractor::with_config(config),
            duties: DutyExtractor::new(),
            entities: EntityExtractor::new(),
        }
    }
}

impl Default for BillExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FactExtractor for BillExtractor {
    fn extract(&self, text: &str, chunk_id: &str) -> FactBundle {
        let start = Instant::now();

        let bundle = FactBundle {
            chunk_id: chunk_id.to_string(),
            references: self.references.extract_all(text),
            funding: self.funding.extract_all(text),
            dates: extract_dates(text),
            deadlines: self.deadlines.extract_all(text),
            duties: self.duties.extract_all(text),
            entities: self.entities.extract_all(text),
            fiscal_years: extract_fiscal_years(text),
        };

        debug!(
            "Chunk {}: {} refs, {} funding, {} deadlines, {} duties, {} entities in {}ms",
            chunk_id,
            bundle.references.len(),
            bundle.funding.len(),
            bundle.deadlines.len(),
            bundle.duties.len(),
            bundle.entities.len(),
            start.elapsed().as_millis()
        );

        bundle
    }
}
