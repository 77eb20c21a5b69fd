//! Service layer for task creation, lookup, editing and deletion.

use crate::error::ErrorKind;
use crate::project::{domain::ProjectId, ports::ProjectRepository, ports::ProjectRepositoryError};
use crate::task::{
    domain::{
        DeadlinePolicy, NewTask, Task, TaskDomainError, TaskId, TaskRevision, TaskStatus,
        TaskTitle, parse_deadline,
    },
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use crate::text::Description;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task under a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    deadline: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
            deadline: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the deadline in any layout accepted by
    /// [`parse_deadline`](crate::task::domain::parse_deadline).
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }
}

/// Request payload for replacing the editable fields of a task.
///
/// Description and deadline are cleared unless set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    project_id: ProjectId,
    task_id: TaskId,
    title: String,
    description: Option<String>,
    deadline: Option<String>,
    status: TaskStatus,
}

impl UpdateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        task_id: TaskId,
        title: impl Into<String>,
        status: TaskStatus,
    ) -> Self {
        Self {
            project_id,
            task_id,
            title: title.into(),
            description: None,
            deadline: None,
            status,
        }
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The referenced project does not exist.
    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),
    /// The task does not exist or belongs to another project.
    #[error("task {task_id} not found in project {project_id}")]
    TaskNotFound {
        /// Project the caller scoped the lookup to.
        project_id: ProjectId,
        /// Requested task.
        task_id: TaskId,
    },
    /// The project already holds the configured maximum number of tasks.
    #[error("project {project_id} reached its limit of {limit} tasks")]
    LimitReached {
        /// Project at capacity.
        project_id: ProjectId,
        /// Configured maximum.
        limit: usize,
    },
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
    /// Project repository operation failed.
    #[error(transparent)]
    ProjectRepository(ProjectRepositoryError),
}

impl TaskServiceError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::ProjectNotFound(_)
            | Self::TaskNotFound { .. }
            | Self::Repository(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::LimitReached { .. } => ErrorKind::Conflict,
            Self::Repository(_) | Self::ProjectRepository(_) => ErrorKind::Persistence,
        }
    }
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::ProjectNotFound(project_id) => Self::ProjectNotFound(project_id),
            other => Self::Repository(other),
        }
    }
}

impl From<ProjectRepositoryError> for TaskServiceError {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::NotFound(project_id) => Self::ProjectNotFound(project_id),
            other => Self::ProjectRepository(other),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
pub struct TaskService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    clock: Arc<C>,
    deadline_policy: DeadlinePolicy,
    max_tasks_per_project: Option<usize>,
}

impl<T, P, C> Clone for TaskService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            projects: Arc::clone(&self.projects),
            clock: Arc::clone(&self.clock),
            deadline_policy: self.deadline_policy,
            max_tasks_per_project: self.max_tasks_per_project,
        }
    }
}

impl<T, P, C> TaskService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a task service that accepts past deadlines and has no task
    /// limit.
    #[must_use]
    pub fn new(tasks: Arc<T>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
            clock,
            deadline_policy: DeadlinePolicy::default(),
            max_tasks_per_project: None,
        }
    }

    /// Sets the policy applied to newly set deadlines.
    #[must_use]
    pub const fn with_deadline_policy(mut self, policy: DeadlinePolicy) -> Self {
        self.deadline_policy = policy;
        self
    }

    /// Caps the number of tasks a single project may hold.
    #[must_use]
    pub const fn with_max_tasks_per_project(mut self, max_tasks: Option<usize>) -> Self {
        self.max_tasks_per_project = max_tasks;
        self
    }

    async fn ensure_project_exists(&self, project_id: ProjectId) -> TaskServiceResult<()> {
        self.projects
            .find_by_id(project_id)
            .await?
            .map(|_| ())
            .ok_or(TaskServiceError::ProjectNotFound(project_id))
    }

    async fn find_task_or_error(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .filter(|task| task.project_id() == project_id)
            .ok_or(TaskServiceError::TaskNotFound {
                project_id,
                task_id,
            })
    }

    fn parse_optional_deadline(
        raw: Option<&str>,
    ) -> Result<Option<DateTime<Utc>>, TaskDomainError> {
        raw.map(parse_deadline).transpose()
    }

    /// Creates a task in `todo` under an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProjectNotFound`] when the project does
    /// not exist, [`TaskServiceError::Domain`] for an invalid title,
    /// description or deadline and [`TaskServiceError::LimitReached`] when
    /// the project is at its task limit.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let CreateTaskRequest {
            project_id,
            title,
            description,
            deadline,
        } = request;

        self.ensure_project_exists(project_id).await?;

        let parsed_title = TaskTitle::new(&title)?;
        let parsed_description = Description::optional(description).map_err(TaskDomainError::from)?;
        let parsed_deadline = Self::parse_optional_deadline(deadline.as_deref())?;
        if let Some(value) = parsed_deadline {
            self.deadline_policy.check(value, self.clock.utc())?;
        }

        if let Some(limit) = self.max_tasks_per_project
            && self.tasks.count_for_project(project_id).await? >= limit
        {
            return Err(TaskServiceError::LimitReached { project_id, limit });
        }

        let draft = NewTask::new(
            project_id,
            parsed_title,
            parsed_description,
            parsed_deadline,
            &*self.clock,
        );
        let task = self.tasks.add(&draft).await?;
        tracing::debug!(task_id = %task.id(), %project_id, "task created");
        Ok(task)
    }

    /// Lists the tasks of a project ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProjectNotFound`] when the project does
    /// not exist.
    pub async fn list_tasks_by_project(&self, project_id: ProjectId) -> TaskServiceResult<Vec<Task>> {
        self.ensure_project_exists(project_id).await?;
        Ok(self.tasks.list(TaskFilter::for_project(project_id)).await?)
    }

    /// Retrieves a task scoped to its project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist or belongs to a different project.
    pub async fn get_task(&self, project_id: ProjectId, task_id: TaskId) -> TaskServiceResult<Task> {
        self.find_task_or_error(project_id, task_id).await
    }

    /// Replaces title, description, deadline and status of a task.
    ///
    /// The status change follows [`Task::transition_status_at`]. The clock is
    /// read once, so `updated_at` and a new `closed_at` share one instant.
    /// The deadline policy only applies when the deadline value changes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is not in the
    /// project and [`TaskServiceError::Domain`] for invalid input. Nothing is
    /// persisted when validation fails.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> TaskServiceResult<Task> {
        let UpdateTaskRequest {
            project_id,
            task_id,
            title,
            description,
            deadline,
            status,
        } = request;

        let mut task = self.find_task_or_error(project_id, task_id).await?;
        let now = self.clock.utc();

        let parsed_title = TaskTitle::new(&title)?;
        let parsed_description = Description::optional(description).map_err(TaskDomainError::from)?;
        let parsed_deadline = Self::parse_optional_deadline(deadline.as_deref())?;
        if let Some(value) = parsed_deadline
            && task.deadline() != Some(value)
        {
            self.deadline_policy.check(value, now)?;
        }

        task.revise_at(
            TaskRevision {
                title: parsed_title,
                description: parsed_description,
                deadline: parsed_deadline,
            },
            now,
        );
        task.transition_status_at(status, now);
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Changes only the status of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is not in the
    /// project.
    pub async fn update_task_status(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskServiceResult<Task> {
        let mut task = self.find_task_or_error(project_id, task_id).await?;
        task.transition_status(status, &*self.clock);
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is not in the
    /// project.
    pub async fn delete_task(&self, project_id: ProjectId, task_id: TaskId) -> TaskServiceResult<()> {
        let task = self.find_task_or_error(project_id, task_id).await?;
        self.tasks.delete(&task).await?;
        tracing::debug!(%task_id, %project_id, "task deleted");
        Ok(())
    }
}
