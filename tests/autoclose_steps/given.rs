//! Given steps for overdue task sweep scenarios.

use super::world::{AutocloseWorld, run_async};
use chrono::{Duration, SecondsFormat, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskyard::project::services::CreateProjectRequest;
use taskyard::task::services::CreateTaskRequest;

fn add_task(world: &mut AutocloseWorld, title: String, offset: Duration) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let deadline = (Utc::now() + offset).to_rfc3339_opts(SecondsFormat::Secs, true);
    let created = run_async(
        world
            .tasks
            .create_task(CreateTaskRequest::new(project_id, title.clone()).with_deadline(deadline)),
    )
    .wrap_err("create task for sweep scenario")?;
    world.tasks_by_title.insert(title, created);
    Ok(())
}

#[given(r#"a project "{name}""#)]
fn a_project(world: &mut AutocloseWorld, name: String) -> Result<(), eyre::Report> {
    let created = run_async(world.projects.create_project(CreateProjectRequest::new(name)))
        .wrap_err("create project for sweep scenario")?;
    world.project = Some(created);
    Ok(())
}

#[given(r#"a task "{title}" due {minutes:u32} minutes ago"#)]
fn a_task_due_in_the_past(
    world: &mut AutocloseWorld,
    title: String,
    minutes: u32,
) -> Result<(), eyre::Report> {
    add_task(world, title, -Duration::minutes(i64::from(minutes)))
}

#[given(r#"a task "{title}" due in {minutes:u32} minutes"#)]
fn a_task_due_in_the_future(
    world: &mut AutocloseWorld,
    title: String,
    minutes: u32,
) -> Result<(), eyre::Report> {
    add_task(world, title, Duration::minutes(i64::from(minutes)))
}
