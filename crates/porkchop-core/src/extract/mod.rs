//! Pattern-based fact extraction from bill chunks.

mod parser;
pub mod rules;

pub use parser::BillExtractor;

use crate::models::bill::{Chunk, FactBundle};

/// Trait for chunk fact extractors.
pub trait FactExtractor {
    /// Extract every fact category from one chunk's text.
    fn extract(&self, text: &str, chunk_id: &str) -> FactBundle;

    /// Extract facts from each chunk, in chunk order.
    fn extract_chunks(&self, chunks: &[Chunk]) -> Vec<FactBundle> {
        chunks
            .iter()
            .map(|chunk| self.extract(&chunk.text, &chunk.id))
            .collect()
    }
}
