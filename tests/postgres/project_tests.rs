//! Project repository behaviour against `PostgreSQL`.

use super::helpers::TestDatabase;
use eyre::{Result, bail, ensure};
use mockable::DefaultClock;
use rstest::rstest;
use taskyard::project::domain::{NewProject, ProjectName};
use taskyard::project::ports::{ProjectRepository, ProjectRepositoryError};
use taskyard::task::domain::{NewTask, TaskTitle};
use taskyard::task::ports::{TaskFilter, TaskRepository};
use taskyard::text::Description;

fn draft(name: &str) -> Result<NewProject> {
    Ok(NewProject::new(ProjectName::new(name)?, None, &DefaultClock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_find_list_and_count_projects() -> Result<()> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let repo = db.projects();

    let described = NewProject::new(
        ProjectName::new("Orchard")?,
        Some(Description::new("Apples and pears")?),
        &DefaultClock,
    );
    let first = repo.add(&described).await?;
    let second = repo.add(&draft("Vineyard")?).await?;

    let found = repo.find_by_id(first.id()).await?;
    let listed = repo.list().await?;

    ensure!(second.id() > first.id(), "ids should increase");
    ensure!(found.as_ref() == Some(&first), "found {found:?}");
    ensure!(
        first.description().map(Description::as_str) == Some("Apples and pears"),
        "description round trip"
    );
    ensure!(listed == vec![first, second], "listed {listed:?}");
    ensure!(repo.count().await? == 2, "two projects expected");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_names_map_to_duplicate_name() -> Result<()> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let repo = db.projects();
    repo.add(&draft("Unique")?).await?;
    let other = repo.add(&draft("Other")?).await?;

    let inserted = repo.add(&draft("Unique")?).await;
    let mut renamed = other.clone();
    renamed.revise(ProjectName::new("Unique")?, None, &DefaultClock);
    let updated = repo.update(&renamed).await;

    ensure!(
        matches!(inserted, Err(ProjectRepositoryError::DuplicateName(_))),
        "insert: {inserted:?}"
    );
    ensure!(
        matches!(updated, Err(ProjectRepositoryError::DuplicateName(_))),
        "update: {updated:?}"
    );
    ensure!(repo.count().await? == 2, "no extra row should exist");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_persists_revised_fields() -> Result<()> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let repo = db.projects();
    let mut project = repo.add(&draft("Before")?).await?;

    project.revise(
        ProjectName::new("After")?,
        Some(Description::new("Renamed")?),
        &DefaultClock,
    );
    repo.update(&project).await?;

    let Some(stored) = repo.find_by_id(project.id()).await? else {
        bail!("project should still exist");
    };
    ensure!(stored.name().as_str() == "After", "name: {}", stored.name());
    ensure!(
        stored.description().map(Description::as_str) == Some("Renamed"),
        "description should be stored"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_project_and_its_tasks() -> Result<()> {
    let Some(db) = TestDatabase::create()? else {
        return Ok(());
    };
    let projects = db.projects();
    let tasks = db.tasks();
    let doomed = projects.add(&draft("Doomed")?).await?;
    let kept = projects.add(&draft("Kept")?).await?;
    for (project_id, title) in [
        (doomed.id(), "One"),
        (doomed.id(), "Two"),
        (kept.id(), "Three"),
    ] {
        let task = NewTask::new(project_id, TaskTitle::new(title)?, None, None, &DefaultClock);
        tasks.add(&task).await?;
    }

    projects.delete(&doomed).await?;

    ensure!(
        projects.find_by_id(doomed.id()).await?.is_none(),
        "project should be gone"
    );
    ensure!(
        tasks.list(TaskFilter::for_project(doomed.id())).await?.is_empty(),
        "tasks should be gone"
    );
    ensure!(
        tasks.list(TaskFilter::all()).await?.len() == 1,
        "other project keeps its task"
    );
    let again = projects.delete(&doomed).await;
    ensure!(
        matches!(again, Err(ProjectRepositoryError::NotFound(id)) if id == doomed.id()),
        "second delete: {again:?}"
    );
    Ok(())
}
