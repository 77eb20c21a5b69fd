//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::models::{NewTaskRow, TaskChangeset, TaskRow};
use crate::project::domain::ProjectId;
use crate::storage::postgres::{PgPool, schema::tasks};
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskStatus, TaskTitle},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::text::Description;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, filter: TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .select(TaskRow::as_select())
                .order(tasks::id.asc())
                .into_boxed();
            if let Some(project_id) = filter.project_id {
                query = query.filter(tasks::project_id.eq(project_id.value()));
            }
            let rows = query.load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count_for_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let total: i64 = tasks::table
                .filter(tasks::project_id.eq(project_id.value()))
                .count()
                .get_result(connection)?;
            usize::try_from(total).map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn add(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let project_id = task.project_id();
        let new_row = NewTaskRow {
            project_id: project_id.value(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(|text| text.as_str().to_owned()),
            status: TaskStatus::Todo.as_str().to_owned(),
            deadline: task.deadline(),
            created_at: task.created_at(),
            updated_at: task.created_at(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::ProjectNotFound(project_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(tasks::table.filter(tasks::id.eq(task_id.value())))
                .set(&changeset)
                .execute(connection)?;

            if updated_count == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();

        self.run_blocking(move |connection| {
            let deleted_count =
                diesel::delete(tasks::table.filter(tasks::id.eq(task_id.value())))
                    .execute(connection)?;

            if deleted_count == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn list_overdue_open(&self, now: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::deadline.lt(now))
                .filter(tasks::status.ne(TaskStatus::Done.as_str()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn close_overdue(&self, id: TaskId, now: DateTime<Utc>) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(id.value()))
                    .filter(tasks::status.ne(TaskStatus::Done.as_str()))
                    .filter(tasks::deadline.lt(now)),
            )
            .set((
                tasks::status.eq(TaskStatus::Done.as_str()),
                tasks::closed_at.eq(Some(now)),
                tasks::updated_at.eq(now),
            ))
            .execute(connection)?;
            Ok(updated_count > 0)
        })
        .await
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().map(|text| text.as_str().to_owned()),
        status: task.status().as_str().to_owned(),
        deadline: task.deadline(),
        closed_at: task.closed_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        project_id,
        title,
        description,
        status,
        deadline,
        closed_at,
        created_at,
        updated_at,
    } = row;

    let parsed_title = TaskTitle::new(&title).map_err(TaskRepositoryError::invalid_persisted_data)?;
    let parsed_description =
        Description::optional(description).map_err(TaskRepositoryError::invalid_persisted_data)?;
    let parsed_status =
        TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::invalid_persisted_data)?;

    let data = PersistedTaskData {
        id: TaskId::from_persisted(id),
        project_id: ProjectId::from_persisted(project_id),
        title: parsed_title,
        description: parsed_description,
        status: parsed_status,
        deadline,
        closed_at,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
