//! Repository port for project persistence.

use crate::project::domain::{NewProject, Project, ProjectId, ProjectName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns every project ordered by identifier.
    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>>;

    /// Returns the number of stored projects.
    async fn count(&self) -> ProjectRepositoryResult<usize>;

    /// Stores a new project and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateName`] when another project
    /// already uses the name.
    async fn add(&self, project: &NewProject) -> ProjectRepositoryResult<Project>;

    /// Persists the complete field set of an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project no longer
    /// exists or [`ProjectRepositoryError::DuplicateName`] when the new name
    /// belongs to another project.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Deletes a project together with all of its tasks in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project no longer
    /// exists.
    async fn delete(&self, project: &Project) -> ProjectRepositoryResult<()>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// Another project already uses the name.
    #[error("duplicate project name: {0}")]
    DuplicateName(ProjectName),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted project data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps persisted-data decoding or validation failures.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
