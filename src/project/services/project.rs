//! Service layer for project creation, lookup, update and deletion.

use crate::error::ErrorKind;
use crate::project::{
    domain::{NewProject, Project, ProjectDomainError, ProjectId, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::text::Description;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: Option<String>,
}

impl CreateProjectRequest {
    /// Creates a request with the required name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for replacing a project's name and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    project_id: ProjectId,
    name: String,
    description: Option<String>,
}

impl UpdateProjectRequest {
    /// Creates a request; the description is cleared unless set.
    #[must_use]
    pub fn new(project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            project_id,
            name: name.into(),
            description: None,
        }
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// No project exists with the given identifier.
    #[error("project {0} not found")]
    NotFound(ProjectId),
    /// Another project already uses the name.
    #[error("project name '{0}' is already in use")]
    DuplicateName(ProjectName),
    /// The configured maximum number of projects has been reached.
    #[error("project limit of {limit} reached")]
    LimitReached {
        /// Configured maximum.
        limit: usize,
    },
    /// Repository operation failed.
    #[error(transparent)]
    Repository(ProjectRepositoryError),
}

impl ProjectServiceError {
    /// Classifies the error for callers.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateName(_) | Self::LimitReached { .. } => ErrorKind::Conflict,
            Self::Repository(_) => ErrorKind::Persistence,
        }
    }
}

impl From<ProjectRepositoryError> for ProjectServiceError {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::DuplicateName(name) => Self::DuplicateName(name),
            ProjectRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service.
pub struct ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    max_projects: Option<usize>,
}

impl<R, C> Clone for ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            max_projects: self.max_projects,
        }
    }
}

impl<R, C> ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service without a project limit.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            max_projects: None,
        }
    }

    /// Caps the number of projects that may exist at once.
    #[must_use]
    pub const fn with_max_projects(mut self, max_projects: Option<usize>) -> Self {
        self.max_projects = max_projects;
        self
    }

    async fn find_project_or_error(&self, project_id: ProjectId) -> ProjectServiceResult<Project> {
        self.repository
            .find_by_id(project_id)
            .await?
            .ok_or(ProjectServiceError::NotFound(project_id))
    }

    /// Creates a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] when the name or description
    /// is invalid, [`ProjectServiceError::DuplicateName`] when the name is
    /// taken and [`ProjectServiceError::LimitReached`] when the configured
    /// project limit is reached.
    pub async fn create_project(&self, request: CreateProjectRequest) -> ProjectServiceResult<Project> {
        let name = ProjectName::new(&request.name)?;
        let description = Description::optional(request.description)
            .map_err(ProjectDomainError::from)?;

        if let Some(limit) = self.max_projects
            && self.repository.count().await? >= limit
        {
            return Err(ProjectServiceError::LimitReached { limit });
        }

        let draft = NewProject::new(name, description, &*self.clock);
        let project = self.repository.add(&draft).await?;
        tracing::debug!(project_id = %project.id(), "project created");
        Ok(project)
    }

    /// Retrieves a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when no project has the
    /// identifier.
    pub async fn get_project(&self, project_id: ProjectId) -> ProjectServiceResult<Project> {
        self.find_project_or_error(project_id).await
    }

    /// Lists all projects ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn list_projects(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.repository.list().await?)
    }

    /// Replaces a project's name and description.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project does not
    /// exist, [`ProjectServiceError::Domain`] for invalid input and
    /// [`ProjectServiceError::DuplicateName`] when the name belongs to
    /// another project.
    pub async fn update_project(&self, request: UpdateProjectRequest) -> ProjectServiceResult<Project> {
        let mut project = self.find_project_or_error(request.project_id).await?;
        let name = ProjectName::new(&request.name)?;
        let description = Description::optional(request.description)
            .map_err(ProjectDomainError::from)?;

        project.revise(name, description, &*self.clock);
        self.repository.update(&project).await?;
        Ok(project)
    }

    /// Deletes a project and every task it owns.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project does not
    /// exist.
    pub async fn delete_project(&self, project_id: ProjectId) -> ProjectServiceResult<()> {
        let project = self.find_project_or_error(project_id).await?;
        self.repository.delete(&project).await?;
        tracing::debug!(%project_id, "project deleted with its tasks");
        Ok(())
    }
}
