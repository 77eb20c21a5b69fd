//! Identifier and validated scalar types for the project domain.

use super::ProjectDomainError;
use crate::text::{MAX_HEADLINE_WORDS, bounded_headline};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned project identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(i64);

impl ProjectId {
    /// Creates a validated project identifier from caller input.
    ///
    /// Use this when an identifier arrives from outside the crate, such as
    /// a path segment or a command-line argument. Adapters rebuilding rows
    /// use [`from_persisted`](Self::from_persisted) instead.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidId`] when the value is not
    /// positive.
    pub const fn new(value: i64) -> Result<Self, ProjectDomainError> {
        if value <= 0 {
            return Err(ProjectDomainError::InvalidId(value));
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

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique, non-empty project name of at most 30 words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::Text`] when the trimmed name is empty or
    /// longer than 30 words.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ProjectDomainError> {
        let name = bounded_headline(value.as_ref(), "project name", MAX_HEADLINE_WORDS)?;
        Ok(Self(name))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
