//! Word-bounded text values shared by projects and tasks.
//!
//! Names and titles are limited to [`MAX_HEADLINE_WORDS`] words and
//! descriptions to [`MAX_DESCRIPTION_WORDS`]. Words are whitespace-separated
//! runs of characters.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum number of words in a project name or task title.
pub const MAX_HEADLINE_WORDS: usize = 30;

/// Maximum number of words in a project or task description.
pub const MAX_DESCRIPTION_WORDS: usize = 150;

/// Errors returned while validating bounded text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TextError {
    /// The value is empty after trimming.
    #[error("{field} must not be empty")]
    Empty {
        /// Name of the rejected field.
        field: &'static str,
    },

    /// The value exceeds its word budget.
    #[error("{field} must be at most {limit} words, got {actual}")]
    TooManyWords {
        /// Name of the rejected field.
        field: &'static str,
        /// Maximum permitted word count.
        limit: usize,
        /// Word count of the rejected value.
        actual: usize,
    },
}

/// Counts whitespace-separated words.
#[must_use]
pub fn word_count(value: &str) -> usize {
    value.split_whitespace().count()
}

/// Trims `value` and checks it is non-empty and within `limit` words.
///
/// # Errors
///
/// Returns [`TextError::Empty`] for blank input and
/// [`TextError::TooManyWords`] when the word budget is exceeded.
pub fn bounded_headline(
    value: &str,
    field: &'static str,
    limit: usize,
) -> Result<String, TextError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TextError::Empty { field });
    }
    ensure_word_limit(trimmed, field, limit)?;
    Ok(trimmed.to_owned())
}

fn ensure_word_limit(value: &str, field: &'static str, limit: usize) -> Result<(), TextError> {
    let actual = word_count(value);
    if actual > limit {
        return Err(TextError::TooManyWords {
            field,
            limit,
            actual,
        });
    }
    Ok(())
}

/// Free-form description limited to [`MAX_DESCRIPTION_WORDS`] words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] for blank input and
    /// [`TextError::TooManyWords`] above the description word budget.
    pub fn new(value: impl Into<String>) -> Result<Self, TextError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty {
                field: "description",
            });
        }
        ensure_word_limit(trimmed, "description", MAX_DESCRIPTION_WORDS)?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Validates an optional description, treating blank input as absent.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::TooManyWords`] above the description word budget.
    pub fn optional(value: Option<String>) -> Result<Option<Self>, TextError> {
        match value {
            Some(raw) if !raw.trim().is_empty() => Self::new(raw).map(Some),
            _ => Ok(None),
        }
    }

    /// Returns the description text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
