//! Error types for the porkchop-core library.
//!
//! Messy bill text is never an error here. Extraction misses become empty
//! collections or `"unspecified"` fields. Only caller-input mistakes,
//! collaborator failures and I/O surface through these types.

use std::time::Duration;

use thiserror::Error;

/// Main error type for the porkchop library.
#[derive(Error, Debug)]
pub enum PorkchopError {
    /// Version comparison was requested with unusable input.
    #[error("comparison error: {0}")]
    Comparison(#[from] ComparisonError),

    /// Bill scoring was requested with unusable input.
    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),

    /// A semantic collaborator call failed.
    #[error("collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// The storage collaborator rejected a record.
    #[error("storage error: {0}")]
    Storage(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised when comparing two bill versions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    /// One of the versions has no text to compare.
    #[error("version {label} has no text content")]
    EmptyVersion { label: String },
}

/// Errors raised when scoring a whole bill.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// Nothing to score; extraction has not been run for the bill.
    #[error("no spending items to score")]
    NoSpendingItems,
}

/// Failures of the optional semantic-analysis collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The call did not finish within its deadline.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Transport or provider failure.
    #[error("request failed: {0}")]
    Request(String),

    /// The collaborator answered with something we cannot use.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Result type for the porkchop library.
pub type Result<T> = std::result::Result<T, PorkchopError>;
