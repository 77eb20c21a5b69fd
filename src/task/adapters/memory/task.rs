//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::project::domain::ProjectId;
use crate::storage::memory::InMemoryStore;
use crate::task::{
    domain::{NewTask, Task, TaskId, TaskStatus},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Share an [`InMemoryStore`] with an
/// [`InMemoryProjectRepository`](crate::project::adapters::memory::InMemoryProjectRepository)
/// so that inserts see existing projects and project deletes cascade.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    store: InMemoryStore,
}

impl InMemoryTaskRepository {
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

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.store.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, filter: TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.store.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect())
    }

    async fn count_for_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        let state = self.store.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id)
            .count())
    }

    async fn add(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self
            .store
            .write()
            .map_err(TaskRepositoryError::persistence)?;

        if !state.projects.contains_key(&task.project_id()) {
            return Err(TaskRepositoryError::ProjectNotFound(task.project_id()));
        }

        let id = state.next_task_id();
        let stored = task.clone().into_task(id);
        state.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self
            .store
            .write()
            .map_err(TaskRepositoryError::persistence)?;

        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn delete(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self
            .store
            .write()
            .map_err(TaskRepositoryError::persistence)?;

        state
            .tasks
            .remove(&task.id())
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(task.id()))
    }

    async fn list_overdue_open(&self, now: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.store.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.is_overdue_at(now))
            .cloned()
            .collect())
    }

    async fn close_overdue(&self, id: TaskId, now: DateTime<Utc>) -> TaskRepositoryResult<bool> {
        let mut state = self
            .store
            .write()
            .map_err(TaskRepositoryError::persistence)?;

        let Some(task) = state
            .tasks
            .get_mut(&id)
            .filter(|task| task.is_overdue_at(now))
        else {
            return Ok(false);
        };
        task.transition_status_at(TaskStatus::Done, now);
        Ok(true)
    }
}
