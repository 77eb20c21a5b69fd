//! Domain model for task lifecycle management.
//!
//! Tasks belong to exactly one project, move freely between
//! [`TaskStatus`] values, and carry a `closed_at` timestamp exactly while
//! they are done. Infrastructure concerns stay outside this boundary.

mod deadline;
mod error;
mod ids;
mod status;
mod task;

pub use deadline::{DeadlinePolicy, parse_deadline};
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use status::TaskStatus;
pub use task::{NewTask, PersistedTaskData, Task, TaskRevision};
