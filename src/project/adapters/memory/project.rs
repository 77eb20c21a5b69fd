//! In-memory repository for project tests.

use async_trait::async_trait;

use crate::project::{
    domain::{NewProject, Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::storage::memory::{InMemoryStore, StoreState};

/// Thread-safe in-memory project repository.
///
/// Deleting a project removes its tasks from the shared [`InMemoryStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    store: InMemoryStore,
}

impl InMemoryProjectRepository {
    /// Creates a repository backed by a fresh store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository over an existing store.
    #[must_use]
    pub const fn with_store(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn name_taken_by_other(state: &StoreState, project: &Project) -> bool {
    state
        .projects
        .values()
        .any(|existing| existing.name() == project.name() && existing.id() != project.id())
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self
            .store
            .read()
            .map_err(ProjectRepositoryError::persistence)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self
            .store
            .read()
            .map_err(ProjectRepositoryError::persistence)?;
        Ok(state.projects.values().cloned().collect())
    }

    async fn count(&self) -> ProjectRepositoryResult<usize> {
        let state = self
            .store
            .read()
            .map_err(ProjectRepositoryError::persistence)?;
        Ok(state.projects.len())
    }

    async fn add(&self, project: &NewProject) -> ProjectRepositoryResult<Project> {
        let mut state = self
            .store
            .write()
            .map_err(ProjectRepositoryError::persistence)?;

        if state
            .projects
            .values()
            .any(|existing| existing.name() == project.name())
        {
            return Err(ProjectRepositoryError::DuplicateName(
                project.name().clone(),
            ));
        }

        let id = state.next_project_id();
        let stored = project.clone().into_project(id);
        state.projects.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self
            .store
            .write()
            .map_err(ProjectRepositoryError::persistence)?;

        if !state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::NotFound(project.id()));
        }
        if name_taken_by_other(&state, project) {
            return Err(ProjectRepositoryError::DuplicateName(
                project.name().clone(),
            ));
        }

        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn delete(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self
            .store
            .write()
            .map_err(ProjectRepositoryError::persistence)?;

        if state.projects.remove(&project.id()).is_none() {
            return Err(ProjectRepositoryError::NotFound(project.id()));
        }
        state
            .tasks
            .retain(|_, task| task.project_id() != project.id());
        Ok(())
    }
}
