//! Caller-facing error classification.
//!
//! Services return their own error enums; adapters in front of them (HTTP,
//! CLI) map [`ErrorKind`] to their own presentation.

use std::fmt;

/// Coarse classification of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller-supplied data violates an invariant.
    Validation,
    /// A referenced project or task does not exist.
    NotFound,
    /// The write conflicts with existing state (duplicate name, limits).
    Conflict,
    /// The persistence backend failed.
    Persistence,
}

impl ErrorKind {
    /// Returns a stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Persistence => "persistence",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
