//! Task repository behaviour against `PostgreSQL`.

use super::helpers::TestDatabase;
use chrono::{DateTime, Duration, TimeZone, Utc};
use eyre::{Result, bail, ensure};
use mockable::DefaultClock;
use rstest::rstest;
use taskyard::project::domain::{NewProject, ProjectId, ProjectName};
use taskyard::project::ports::ProjectRepository;
use taskyard::task::domain::{NewTask, TaskRevision, TaskStatus, TaskTitle};
use taskyard::task::ports::{TaskFilter, TaskRepository, TaskRepositoryError};
use taskyard::text::Description;

fn noon() -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid timestamp"))
}

async fn seed_project(db: &TestDatabase, name: &str) -> Result<ProjectId> {
    let project = db
        .projects()
        .add(&NewProject::new(ProjectName::new(name)?, None, &DefaultClock))
        .await?;
    Ok(project.id())
}

fn task(project_id: ProjectId, title: &str, deadline: Option<DateTime<Utc>>) -> Result<NewTask> {
    Ok(NewTask::new(
        project_id,
        TaskTitle::new(title)?,
        None,
        deadline,
        &DefaultClock,
    ))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_round_trips_every_field() -> Result<()> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let project_id = seed_project(&db, "Fields").await?;
    let repo = db.tasks();
    let draft = NewTask::new(
        project_id,
        TaskTitle::new("Measure twice")?,
        Some(Description::new("Cut once")?),
        Some(noon()?),
        &DefaultClock,
    );

    let created = repo.add(&draft).await?;
    let Some(found) = repo.find_by_id(created.id()).await? else {
        bail!("task should be stored");
    };

    ensure!(found.project_id() == project_id, "owner should round trip");
    ensure!(found.title().as_str() == "Measure twice", "title should round trip");
    ensure!(
        found.description().map(Description::as_str) == Some("Cut once"),
        "description should round trip"
    );
    ensure!(found.deadline() == Some(noon()?), "deadline should round trip");
    ensure!(found.status() == TaskStatus::Todo, "new task should be todo");
    ensure!(found.closed_at().is_none(), "new task should be open");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_under_missing_project_is_project_not_found() -> Result<()> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let repo = db.tasks();
    let missing = ProjectId::from_persisted(4242);

    let result = repo.add(&task(missing, "Orphan", None)?).await;

    ensure!(
        matches!(result, Err(TaskRepositoryError::ProjectNotFound(id)) if id == missing),
        "unexpected result {result:?}"
    );
    ensure!(
        repo.list(TaskFilter::all()).await?.is_empty(),
        "no row should be created"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_project_and_counts() -> Result<()> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let left = seed_project(&db, "Left").await?;
    let right = seed_project(&db, "Right").await?;
    let repo = db.tasks();
    for (project_id, title) in [(left, "L1"), (right, "R1"), (left, "L2")] {
        repo.add(&task(project_id, title, None)?).await?;
    }

    let titles: Vec<String> = repo
        .list(TaskFilter::for_project(left))
        .await?
        .iter()
        .map(|stored| stored.title().as_str().to_owned())
        .collect();

    ensure!(titles == ["L1", "L2"], "titles {titles:?}");
    ensure!(repo.count_for_project(left).await? == 2, "left count");
    ensure!(repo.count_for_project(right).await? == 1, "right count");
    ensure!(repo.list(TaskFilter::all()).await?.len() == 3, "all tasks");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_persists_status_and_closure() -> Result<()> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let project_id = seed_project(&db, "Updates").await?;
    let repo = db.tasks();
    let mut stored = repo.add(&task(project_id, "Finish", Some(noon()?))?).await?;

    stored.transition_status_at(TaskStatus::Done, noon()?);
    repo.update(&stored).await?;
    let Some(done) = repo.find_by_id(stored.id()).await? else {
        bail!("task should exist");
    };
    stored.transition_status_at(TaskStatus::Doing, noon()? + Duration::hours(1));
    repo.update(&stored).await?;
    let Some(reopened) = repo.find_by_id(stored.id()).await? else {
        bail!("task should exist");
    };

    ensure!(done.status() == TaskStatus::Done, "done should persist");
    ensure!(done.closed_at() == Some(noon()?), "closed_at should persist");
    ensure!(reopened.status() == TaskStatus::Doing, "reopen should persist");
    ensure!(reopened.closed_at().is_none(), "closed_at should be cleared");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_of_missing_task_are_not_found() -> Result<()> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let project_id = seed_project(&db, "Vanishing").await?;
    let repo = db.tasks();
    let stored = repo.add(&task(project_id, "Ephemeral", None)?).await?;
    repo.delete(&stored).await?;

    let updated = repo.update(&stored).await;
    let deleted = repo.delete(&stored).await;

    ensure!(
        matches!(updated, Err(TaskRepositoryError::NotFound(_))),
        "update: {updated:?}"
    );
    ensure!(
        matches!(deleted, Err(TaskRepositoryError::NotFound(_))),
        "delete: {deleted:?}"
    );
    ensure!(repo.find_by_id(stored.id()).await?.is_none(), "task is gone");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_query_selects_open_tasks_strictly_before_now() -> Result<()> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let project_id = seed_project(&db, "Overdue").await?;
    let repo = db.tasks();
    let now = noon()?;
    let late = repo
        .add(&task(project_id, "Late", Some(now - Duration::minutes(1)))?)
        .await?;
    repo.add(&task(project_id, "Exact", Some(now))?).await?;
    repo.add(&task(project_id, "Future", Some(now + Duration::minutes(1)))?)
        .await?;
    repo.add(&task(project_id, "Undated", None)?).await?;
    let mut finished = repo
        .add(&task(project_id, "Finished", Some(now - Duration::hours(3)))?)
        .await?;
    finished.transition_status_at(TaskStatus::Done, now - Duration::hours(2));
    repo.update(&finished).await?;

    let overdue = repo.list_overdue_open(now).await?;

    let ids: Vec<_> = overdue.iter().map(|stored| stored.id()).collect();
    ensure!(ids == vec![late.id()], "overdue ids {ids:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn close_overdue_writes_only_status_fields() -> Result<()> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let project_id = seed_project(&db, "Closing").await?;
    let repo = db.tasks();
    let now = noon()?;
    let mut late = repo
        .add(&task(project_id, "Late", Some(now - Duration::hours(1)))?)
        .await?;
    let future = repo
        .add(&task(project_id, "Future", Some(now + Duration::hours(1)))?)
        .await?;

    late.revise_at(
        TaskRevision {
            title: TaskTitle::new("Edited meanwhile")?,
            description: Some(Description::new("Kept by the sweep")?),
            deadline: late.deadline(),
        },
        now - Duration::minutes(1),
    );
    repo.update(&late).await?;

    let closed = repo.close_overdue(late.id(), now).await?;
    let closed_again = repo.close_overdue(late.id(), now).await?;
    let future_closed = repo.close_overdue(future.id(), now).await?;
    let Some(stored) = repo.find_by_id(late.id()).await? else {
        bail!("task should exist");
    };

    ensure!(closed, "overdue task should be closed");
    ensure!(!closed_again, "done task should not be closed twice");
    ensure!(!future_closed, "future task should not be closed");
    ensure!(stored.title().as_str() == "Edited meanwhile", "title should be kept");
    ensure!(
        stored.description().map(Description::as_str) == Some("Kept by the sweep"),
        "description should be kept"
    );
    ensure!(stored.status() == TaskStatus::Done, "status should be done");
    ensure!(stored.closed_at() == Some(now), "closed_at should be the sweep time");
    ensure!(stored.updated_at() == now, "updated_at should be the sweep time");
    Ok(())
}
