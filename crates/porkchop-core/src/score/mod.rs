//! Pork scoring of spending items.

pub mod heuristic;
mod scorer;

pub use heuristic::{heuristic_score, EARMARK_SIGNALS};
pub use scorer::PorkScorer;
