//! Shared world state for overdue task sweep BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskyard::project::{
    adapters::memory::InMemoryProjectRepository, domain::Project, services::ProjectService,
};
use taskyard::storage::memory::InMemoryStore;
use taskyard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{OverdueTaskSweeper, SweepReport, TaskService},
};

/// Project service used by the BDD world.
pub type TestProjectService = ProjectService<InMemoryProjectRepository, DefaultClock>;

/// Task service used by the BDD world.
pub type TestTaskService =
    TaskService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

/// Scenario world for sweep behaviour tests.
pub struct AutocloseWorld {
    pub projects: TestProjectService,
    pub tasks: TestTaskService,
    pub sweeper: OverdueTaskSweeper<InMemoryTaskRepository, DefaultClock>,
    pub project: Option<Project>,
    pub tasks_by_title: HashMap<String, Task>,
    pub last_report: Option<SweepReport>,
}

impl AutocloseWorld {
    /// Creates a world whose services share one store.
    #[must_use]
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let project_repo = Arc::new(InMemoryProjectRepository::with_store(store.clone()));
        let task_repo = Arc::new(InMemoryTaskRepository::with_store(store));
        let clock = Arc::new(DefaultClock);

        Self {
            projects: ProjectService::new(Arc::clone(&project_repo), Arc::clone(&clock)),
            tasks: TaskService::new(Arc::clone(&task_repo), project_repo, Arc::clone(&clock)),
            sweeper: OverdueTaskSweeper::new(task_repo, clock),
            project: None,
            tasks_by_title: HashMap::new(),
            last_report: None,
        }
    }

    /// Returns the project created by the scenario.
    pub fn project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns a task created by the scenario.
    pub fn task(&self, title: &str) -> Result<&Task, eyre::Report> {
        self.tasks_by_title
            .get(title)
            .ok_or_else(|| eyre::eyre!("missing task {title:?} in scenario world"))
    }

    /// Re-reads a task through the service.
    pub fn reload(&self, title: &str) -> Result<Task, eyre::Report> {
        let project_id = self.project()?.id();
        let task_id = self.task(title)?.id();
        Ok(run_async(self.tasks.get_task(project_id, task_id))?)
    }

    /// Returns the report of the most recent sweep.
    pub fn report(&self) -> Result<&SweepReport, eyre::Report> {
        self.last_report
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no sweep has run in this scenario"))
    }
}

impl Default for AutocloseWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AutocloseWorld {
    AutocloseWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
