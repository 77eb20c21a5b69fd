//! Application services for project management.

mod project;

pub use project::{
    CreateProjectRequest, ProjectService, ProjectServiceError, ProjectServiceResult,
    UpdateProjectRequest,
};
