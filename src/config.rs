//! Environment-driven configuration for the services and the autoclose worker.
//!
//! | Env Var                   | Default      |
//! |---------------------------|--------------|
//! | `DATABASE_URL`            | unset        |
//! | `DATABASE_POOL_SIZE`      | `4`          |
//! | `AUTOCLOSE_INTERVAL_SECS` | `60`         |
//! | `DEADLINE_POLICY`         | `allow_past` |
//! | `MAX_NUMBER_OF_PROJECT`   | unlimited    |
//! | `MAX_NUMBER_OF_TASK`      | unlimited    |

use crate::task::domain::DeadlinePolicy;
use crate::task::services::DEFAULT_SWEEP_INTERVAL;
use std::time::Duration;
use thiserror::Error;

/// Connection string for the `PostgreSQL` backend.
pub const DATABASE_URL: &str = "DATABASE_URL";
/// Maximum number of pooled connections.
pub const DATABASE_POOL_SIZE: &str = "DATABASE_POOL_SIZE";
/// Seconds between two autoclose sweeps.
pub const AUTOCLOSE_INTERVAL_SECS: &str = "AUTOCLOSE_INTERVAL_SECS";
/// Deadline policy, `allow_past` or `require_future`.
pub const DEADLINE_POLICY: &str = "DEADLINE_POLICY";
/// Maximum number of projects.
pub const MAX_NUMBER_OF_PROJECT: &str = "MAX_NUMBER_OF_PROJECT";
/// Maximum number of tasks per project.
pub const MAX_NUMBER_OF_TASK: &str = "MAX_NUMBER_OF_TASK";

const DEFAULT_POOL_SIZE: u32 = 4;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable holds a value that cannot be used.
    #[error("invalid value '{value}' for {name}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Raw value as read.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Database connection string, if configured.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_size: u32,
    /// Pause between autoclose sweeps.
    pub autoclose_interval: Duration,
    /// Policy applied to newly set task deadlines.
    pub deadline_policy: DeadlinePolicy,
    /// Maximum number of projects, if limited.
    pub max_projects: Option<usize>,
    /// Maximum number of tasks per project, if limited.
    pub max_tasks_per_project: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
            autoclose_interval: DEFAULT_SWEEP_INTERVAL,
            deadline_policy: DeadlinePolicy::default(),
            max_projects: None,
            max_tasks_per_project: None,
        }
    }
}

impl EngineConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is set to an unusable
    /// value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is set to an unusable
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let pool_size = read(DATABASE_POOL_SIZE)
            .map(|raw| parse_positive::<u32>(DATABASE_POOL_SIZE, &raw))
            .transpose()?
            .unwrap_or(DEFAULT_POOL_SIZE);
        let autoclose_interval = read(AUTOCLOSE_INTERVAL_SECS)
            .map(|raw| parse_positive::<u64>(AUTOCLOSE_INTERVAL_SECS, &raw))
            .transpose()?
            .map_or(DEFAULT_SWEEP_INTERVAL, Duration::from_secs);
        let deadline_policy = read(DEADLINE_POLICY)
            .map(|raw| parse_deadline_policy(&raw))
            .transpose()?
            .unwrap_or_default();
        let max_projects = read(MAX_NUMBER_OF_PROJECT)
            .map(|raw| parse_positive::<usize>(MAX_NUMBER_OF_PROJECT, &raw))
            .transpose()?;
        let max_tasks_per_project = read(MAX_NUMBER_OF_TASK)
            .map(|raw| parse_positive::<usize>(MAX_NUMBER_OF_TASK, &raw))
            .transpose()?;

        Ok(Self {
            database_url: read(DATABASE_URL),
            pool_size,
            autoclose_interval,
            deadline_policy,
            max_projects,
            max_tasks_per_project,
        })
    }

    /// Returns the database URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `DATABASE_URL` is not set.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing(DATABASE_URL))
    }
}

fn parse_positive<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let invalid = |reason| ConfigError::Invalid {
        name,
        value: raw.to_owned(),
        reason,
    };
    let value = raw
        .parse::<T>()
        .map_err(|_| invalid("expected a positive integer"))?;
    if value <= T::default() {
        return Err(invalid("must be greater than zero"));
    }
    Ok(value)
}

fn parse_deadline_policy(raw: &str) -> Result<DeadlinePolicy, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "allow_past" => Ok(DeadlinePolicy::AllowPast),
        "require_future" => Ok(DeadlinePolicy::RequireFuture),
        _ => Err(ConfigError::Invalid {
            name: DEADLINE_POLICY,
            value: raw.to_owned(),
            reason: "expected allow_past or require_future",
        }),
    }
}
