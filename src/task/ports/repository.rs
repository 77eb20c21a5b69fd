//! Repository port for task persistence and the overdue query.

use crate::project::domain::ProjectId;
use crate::task::domain::{NewTask, Task, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Selection criteria for [`TaskRepository::list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Restricts the listing to one project when set.
    pub project_id: Option<ProjectId>,
}

impl TaskFilter {
    /// Matches every task.
    #[must_use]
    pub const fn all() -> Self {
        Self { project_id: None }
    }

    /// Matches the tasks of one project.
    #[must_use]
    pub const fn for_project(project_id: ProjectId) -> Self {
        Self {
            project_id: Some(project_id),
        }
    }

    /// Returns `true` when `task` satisfies the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.project_id
            .is_none_or(|project_id| task.project_id() == project_id)
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Finds a task by its globally unique identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the tasks matching `filter`, ordered by identifier.
    async fn list(&self, filter: TaskFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the number of tasks owned by a project.
    async fn count_for_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize>;

    /// Stores a new task and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::ProjectNotFound`] when the owning
    /// project does not exist at insert time.
    async fn add(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Persists the complete field set of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task no longer
    /// exists.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task no longer
    /// exists.
    async fn delete(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Returns every task with `deadline < now` whose status is not done,
    /// ordered by identifier.
    async fn list_overdue_open(&self, now: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>>;

    /// Moves a task to done as of `now` if it is still overdue and open.
    ///
    /// Only status, `closed_at` and `updated_at` are written; every other
    /// field keeps its stored value. Returns `false` when the task is gone,
    /// already done, or no longer has a deadline before `now`.
    async fn close_overdue(&self, id: TaskId, now: DateTime<Utc>) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The owning project does not exist.
    #[error("project not found for task: {0}")]
    ProjectNotFound(ProjectId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted task data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps persisted-data decoding or validation failures.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
