//! Error types for task domain validation and parsing.

use crate::text::TextError;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title or description violates its text bounds.
    #[error(transparent)]
    Text(#[from] TextError),

    /// The deadline string could not be parsed.
    #[error("invalid deadline '{0}', expected an ISO 8601 date or date-time")]
    InvalidDeadline(String),

    /// The deadline lies in the past while the policy requires a future one.
    #[error("deadline {deadline} is not in the future (now {now})")]
    DeadlineInPast {
        /// Rejected deadline.
        deadline: DateTime<Utc>,
        /// Clock time at validation.
        now: DateTime<Utc>,
    },

    /// The identifier is not a positive integer.
    #[error("invalid task id {0}, expected a positive integer")]
    InvalidId(i64),
}

/// Error returned while parsing task statuses from input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
