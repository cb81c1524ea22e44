//! Error types for statement retrieval.
//!
//! This module defines [`FactsError`] which covers all error cases that can
//! occur when resolving identifiers, fetching, or normalizing filing data.

use thiserror::Error;

/// Errors that can occur during statement retrieval.
#[derive(Error, Debug)]
pub enum FactsError {
    /// Network-related errors (connection failures, non-success responses).
    #[error("Network error: {0}")]
    Network(String),

    /// Error parsing a response body.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A required accounting concept is missing from the fetched document.
    ///
    /// The document deserialized successfully but does not carry a concept
    /// the report cannot be assembled without, so the document is malformed
    /// relative to the known schema.
    #[error("Missing required concept: {0}")]
    MissingConcept(String),

    /// I/O error reading the ticker-to-CIK mapping file.
    #[error("CIK mapping I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`FactsError`].
pub type Result<T> = std::result::Result<T, FactsError>;
