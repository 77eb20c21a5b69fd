//! Shared in-memory state for project and task test doubles.

use crate::project::domain::{Project, ProjectId};
use crate::task::domain::{Task, TaskId};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory backend shared by project and task repositories.
///
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

/// Rows held by an [`InMemoryStore`].
#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub(crate) projects: BTreeMap<ProjectId, Project>,
    pub(crate) tasks: BTreeMap<TaskId, Task>,
    last_project_id: i64,
    last_task_id: i64,
}

impl StoreState {
    /// Allocates the next project identifier.
    pub(crate) fn next_project_id(&mut self) -> ProjectId {
        self.last_project_id += 1;
        ProjectId::from_persisted(self.last_project_id)
    }

    /// Allocates the next task identifier.
    pub(crate) fn next_task_id(&mut self) -> TaskId {
        self.last_task_id += 1;
        TaskId::from_persisted(self.last_task_id)
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires shared read access.
    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, std::io::Error> {
        self.state
            .read()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }

    /// Acquires exclusive write access.
    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, std::io::Error> {
        self.state
            .write()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }
}
