//! Core library for legislative bill processing.
//!
//! This crate provides:
//! - Text cleaning and hierarchical chunking of raw bill text
//! - Rule-based fact extraction (funding, citations, deadlines, duties, entities)
//! - Version comparison with section pairing and changelogs
//! - Heuristic and collaborator-blended pork scoring
//!
//! Storage and language-model access are left to callers, who plug them in
//! through [`FactSink`], [`SemanticDiffer`] and [`SemanticScorer`].

pub mod compare;
pub mod error;
pub mod extract;
pub mod models;
pub mod score;
pub mod semantic;
pub mod store;
pub mod text;

pub use compare::{render_changelog, Comparator};
pub use error::{CollaboratorError, ComparisonError, PorkchopError, Result, ScoringError};
pub use extract::{BillExtractor, FactExtractor};
pub use models::bill::{
    BillContext, Chunk, DeadlineFact, DutyFact, FactBundle, FundingFact, Modal, RefType,
    ReferenceFact, SpendingItem, UNSPECIFIED,
};
pub use models::comparison::{DiffResult, SectionOutcome, VersionComparison, VersionText};
pub use models::config::{ChunkStrategy, PorkchopConfig};
pub use models::score::{BillScoreReport, PorkScoreResult, ScoreMethod};
pub use score::PorkScorer;
pub use semantic::{SemanticDiffer, SemanticScorer};
pub use store::{persist_bundle, FactSink};
pub use text::{Chunker, Cleaner};
