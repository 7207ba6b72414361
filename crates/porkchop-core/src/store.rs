//! Storage collaborator seam.

use tracing::debug;

use crate::error::Result;
use crate::models::bill::{DeadlineFact, FactBundle, FundingFact, ReferenceFact};

/// Receives extracted facts for persistence.
pub trait FactSink {
    fn add_spending_item(&mut self, bill_id: &str, chunk_id: &str, fact: &FundingFact) -> Result<()>;

    fn add_reference(&mut self, bill_id: &str, chunk_id: &str, fact: &ReferenceFact) -> Result<()>;

    fn add_deadline(&mut self, bill_id: &str, chunk_id: &str, fact: &DeadlineFact) -> Result<()>;

    fn add_entity(&mut self, bill_id: &str, chunk_id: &str, name: &str) -> Result<()>;
}

/// Forward every fact in a bundle to the sink.
///
/// Stops at the first sink error. Returns the number of records written.
pub fn persist_bundle(sink: &mut impl FactSink, bill_id: &str, bundle: &FactBundle) -> Result<usize> {
    let chunk_id = bundle.chunk_id.as_str();
    let mut written = 0;

    for fact in &bundle.funding {
        sink.add_spending_item(bill_id, chunk_id, fact)?;
        written += 1;
    }
    for fact in &bundle.references {
        sink.add_reference(bill_id, chunk_id, fact)?;
        written += 1;
    }
    for fact in &bundle.deadlines {
        sink.add_deadline(bill_id, chunk_id, fact)?;
        written += 1;
    }
    for name in &bundle.entities {
        sink.add_entity(bill_id, chunk_id, name)?;
        written += 1;
    }

    debug!("Persisted {} records from chunk {}", written, chunk_id);
    Ok(written)
}
