//! Domain model for projects.
//!
//! Project values are validated on construction and carry no storage
//! awareness.

mod error;
mod ids;
mod project;

pub use error::ProjectDomainError;
pub use ids::{ProjectId, ProjectName};
pub use project::{NewProject, PersistedProjectData, Project};
