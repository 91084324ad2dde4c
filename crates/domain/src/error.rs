//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while declaring cases.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The base address is not an absolute http(s) URL.
    #[error("invalid base address: {0}")]
    InvalidBaseAddress(String),

    /// A field path selector could not be parsed.
    #[error("invalid field path '{path}': {reason}")]
    InvalidFieldPath {
        /// The selector as written.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The category tag is not one of the known ones.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

impl DomainError {
    /// Creates an `InvalidFieldPath` error.
    pub fn invalid_field_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFieldPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
