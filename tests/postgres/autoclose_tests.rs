//! Services and the sweeper running against `PostgreSQL`.

use std::sync::Arc;

use super::helpers::TestDatabase;
use chrono::{Duration, SecondsFormat, SubsecRound, Utc};
use eyre::{Result, ensure};
use mockable::DefaultClock;
use rstest::rstest;
use taskyard::error::ErrorKind;
use taskyard::project::services::{CreateProjectRequest, ProjectService};
use taskyard::task::domain::TaskStatus;
use taskyard::task::services::{CreateTaskRequest, OverdueTaskSweeper, TaskService};

fn deadline_from_now(offset: Duration) -> String {
    (Utc::now() + offset).to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_closes_overdue_tasks_and_is_idempotent() -> Result<()> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let project_repo = Arc::new(db.projects());
    let task_repo = Arc::new(db.tasks());
    let clock = Arc::new(DefaultClock);
    let projects = ProjectService::new(Arc::clone(&project_repo), Arc::clone(&clock));
    let tasks = TaskService::new(Arc::clone(&task_repo), project_repo, Arc::clone(&clock));
    let sweeper = OverdueTaskSweeper::new(task_repo, clock);

    let project = projects
        .create_project(CreateProjectRequest::new("P"))
        .await?;
    let a = tasks
        .create_task(
            CreateTaskRequest::new(project.id(), "A")
                .with_deadline(deadline_from_now(Duration::hours(-1))),
        )
        .await?;
    let b = tasks
        .create_task(
            CreateTaskRequest::new(project.id(), "B")
                .with_deadline(deadline_from_now(Duration::hours(1))),
        )
        .await?;

    let first = sweeper.sweep().await?;
    let second = sweeper.sweep().await?;
    let a_after = tasks.get_task(project.id(), a.id()).await?;
    let b_after = tasks.get_task(project.id(), b.id()).await?;

    ensure!(first.closed == vec![a.id()], "first sweep {:?}", first.closed);
    ensure!(second.closed.is_empty(), "second sweep {:?}", second.closed);
    ensure!(a_after.status() == TaskStatus::Done, "A should be done");
    // Timestamps are stored with microsecond precision.
    let swept_at = first.swept_at.map(|at| at.trunc_subsecs(6));
    ensure!(a_after.closed_at() == swept_at, "A closed at sweep time");
    ensure!(b_after.status() == TaskStatus::Todo, "B should stay todo");
    ensure!(b_after.closed_at().is_none(), "B stays open");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn service_errors_classify_database_outcomes() -> Result<()> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let project_repo = Arc::new(db.projects());
    let clock = Arc::new(DefaultClock);
    let projects = ProjectService::new(Arc::clone(&project_repo), Arc::clone(&clock));
    let tasks = TaskService::new(Arc::new(db.tasks()), project_repo, clock);

    let project = projects
        .create_project(CreateProjectRequest::new("Classified"))
        .await?;
    let duplicate = projects
        .create_project(CreateProjectRequest::new("Classified"))
        .await;
    projects.delete_project(project.id()).await?;
    let orphan = tasks
        .create_task(CreateTaskRequest::new(project.id(), "Orphan"))
        .await;

    ensure!(
        duplicate.as_ref().err().map(|err| err.kind()) == Some(ErrorKind::Conflict),
        "duplicate: {duplicate:?}"
    );
    ensure!(
        orphan.as_ref().err().map(|err| err.kind()) == Some(ErrorKind::NotFound),
        "orphan: {orphan:?}"
    );
    Ok(())
}
