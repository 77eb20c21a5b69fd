//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use crate::text::{MAX_HEADLINE_WORDS, bounded_headline};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned task identifier, unique across all projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Creates a validated task identifier from caller input.
    ///
    /// Use this when an identifier arrives from outside the crate, such as
    /// a path segment or a command-line argument. Adapters rebuilding rows
    /// use [`from_persisted`](Self::from_persisted) instead.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidId`] when the value is not positive.
    pub const fn new(value: i64) -> Result<Self, TaskDomainError> {
        if value <= 0 {
            return Err(TaskDomainError::InvalidId(value));
        }
        Ok(Self(value))
    }

    /// Wraps an identifier read back from storage.
    #[must_use]
    pub const fn from_persisted(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty task title of at most 30 words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Text`] when the trimmed title is empty or
    /// longer than 30 words.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        let title = bounded_headline(value.as_ref(), "task title", MAX_HEADLINE_WORDS)?;
        Ok(Self(title))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
