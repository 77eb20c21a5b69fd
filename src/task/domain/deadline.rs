//! Deadline parsing and the creation-time deadline policy.

use super::TaskDomainError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Naive date-time layouts accepted in addition to RFC 3339, read as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a caller-supplied deadline.
///
/// Accepts RFC 3339 timestamps, naive ISO 8601 date-times (interpreted as
/// UTC) and bare dates (midnight UTC).
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidDeadline`] when no accepted layout
/// matches.
pub fn parse_deadline(value: &str) -> Result<DateTime<Utc>, TaskDomainError> {
    let trimmed = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let naive = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok());
    if let Some(date_time) = naive {
        return Ok(date_time.and_utc());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| TaskDomainError::InvalidDeadline(value.to_owned()))
}

/// Whether a newly set deadline may lie in the past.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlinePolicy {
    /// Any parseable deadline is accepted.
    #[default]
    AllowPast,
    /// A newly set deadline must be strictly later than the current time.
    RequireFuture,
}

impl DeadlinePolicy {
    /// Returns the configuration representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllowPast => "allow_past",
            Self::RequireFuture => "require_future",
        }
    }

    /// Checks a newly set deadline against the policy.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DeadlineInPast`] under
    /// [`DeadlinePolicy::RequireFuture`] when `deadline <= now`.
    pub fn check(self, deadline: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), TaskDomainError> {
        match self {
            Self::RequireFuture if deadline <= now => {
                Err(TaskDomainError::DeadlineInPast { deadline, now })
            }
            _ => Ok(()),
        }
    }
}
