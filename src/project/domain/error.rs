//! Error types for project domain validation.

use crate::text::TextError;
use thiserror::Error;

/// Errors returned while constructing project values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The name or description violates its text bounds.
    #[error(transparent)]
    Text(#[from] TextError),

    /// The identifier is not a positive integer.
    #[error("invalid project id {0}, expected a positive integer")]
    InvalidId(i64),
}
