//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskyard::project::{adapters::memory::InMemoryProjectRepository, services::ProjectService};
use taskyard::storage::memory::InMemoryStore;
use taskyard::task::{
    adapters::memory::InMemoryTaskRepository,
    services::{OverdueTaskSweeper, TaskService},
};

/// Project service over the shared in-memory store.
pub type Projects = ProjectService<InMemoryProjectRepository, DefaultClock>;

/// Task service over the shared in-memory store.
pub type Tasks = TaskService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

/// Sweeper over the shared in-memory store.
pub type Sweeper = OverdueTaskSweeper<InMemoryTaskRepository, DefaultClock>;

/// Services wired to a single in-memory store.
pub struct Engine {
    pub projects: Projects,
    pub tasks: Tasks,
    pub sweeper: Sweeper,
}

/// Builds services that share one store, as a deployment shares one database.
#[fixture]
pub fn engine() -> Engine {
    let store = InMemoryStore::new();
    let project_repo = Arc::new(InMemoryProjectRepository::with_store(store.clone()));
    let task_repo = Arc::new(InMemoryTaskRepository::with_store(store));
    let clock = Arc::new(DefaultClock);

    Engine {
        projects: ProjectService::new(Arc::clone(&project_repo), Arc::clone(&clock)),
        tasks: TaskService::new(Arc::clone(&task_repo), project_repo, Arc::clone(&clock)),
        sweeper: OverdueTaskSweeper::new(task_repo, clock),
    }
}
