//! `PostgreSQL` repository implementation for project storage.

use super::models::{NewProjectRow, ProjectRow};
use crate::project::{
    domain::{NewProject, PersistedProjectData, Project, ProjectId, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::storage::postgres::{
    PgPool,
    schema::{projects, tasks},
};
use crate::text::Description;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

impl From<DieselError> for ProjectRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.value()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .order(projects::id.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn count(&self) -> ProjectRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let total: i64 = projects::table.count().get_result(connection)?;
            usize::try_from(total).map_err(ProjectRepositoryError::persistence)
        })
        .await
    }

    async fn add(&self, project: &NewProject) -> ProjectRepositoryResult<Project> {
        let name = project.name().clone();
        let new_row = NewProjectRow {
            name: project.name().as_str().to_owned(),
            description: project.description().map(|text| text.as_str().to_owned()),
            created_at: project.created_at(),
            updated_at: project.created_at(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(projects::table)
                .values(&new_row)
                .returning(ProjectRow::as_returning())
                .get_result::<ProjectRow>(connection)
                .map_err(|err| map_name_violation(err, &name))?;
            row_to_project(row)
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let name = project.name().clone();
        let description = project.description().map(|text| text.as_str().to_owned());
        let updated_at = project.updated_at();

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(projects::table.filter(projects::id.eq(project_id.value())))
                    .set((
                        projects::name.eq(name.as_str()),
                        projects::description.eq(&description),
                        projects::updated_at.eq(updated_at),
                    ))
                    .execute(connection)
                    .map_err(|err| map_name_violation(err, &name))?;

            if updated_count == 0 {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();

        self.run_blocking(move |connection| {
            connection.transaction::<_, ProjectRepositoryError, _>(|tx_conn| {
                diesel::delete(tasks::table.filter(tasks::project_id.eq(project_id.value())))
                    .execute(tx_conn)?;
                let deleted_count =
                    diesel::delete(projects::table.filter(projects::id.eq(project_id.value())))
                        .execute(tx_conn)?;
                if deleted_count == 0 {
                    return Err(ProjectRepositoryError::NotFound(project_id));
                }
                Ok(())
            })
        })
        .await
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let ProjectRow {
        id,
        name,
        description,
        created_at,
        updated_at,
    } = row;

    let parsed_name =
        ProjectName::new(&name).map_err(ProjectRepositoryError::invalid_persisted_data)?;
    let parsed_description =
        Description::optional(description).map_err(ProjectRepositoryError::invalid_persisted_data)?;

    let data = PersistedProjectData {
        id: ProjectId::from_persisted(id),
        name: parsed_name,
        description: parsed_description,
        created_at,
        updated_at,
    };
    Ok(Project::from_persisted(data))
}

fn map_name_violation(err: DieselError, name: &ProjectName) -> ProjectRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_name_unique_violation(info.as_ref()) =>
        {
            ProjectRepositoryError::DuplicateName(name.clone())
        }
        _ => ProjectRepositoryError::persistence(err),
    }
}

fn is_name_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_projects_name")
}
