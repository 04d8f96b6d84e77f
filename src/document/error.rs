//! Document error types

use thiserror::Error;

/// Violations of the document invariants
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document title is empty or whitespace
    #[error("Document title is empty")]
    EmptyTitle,

    /// Section level below 1
    #[error("Section '{id}' has invalid level {level}")]
    InvalidLevel { id: String, level: u32 },

    /// Two sections share an anchor id
    #[error("Duplicate section id: {0}")]
    DuplicateSectionId(String),

    /// Value is valid JSON but not a document
    #[error("Invalid document shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;
