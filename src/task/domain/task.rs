//! Task aggregate root and related task lifecycle types.

use super::{TaskId, TaskStatus, TaskTitle};
use crate::project::domain::ProjectId;
use crate::text::Description;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated task awaiting an identifier from the repository.
///
/// New tasks always start in [`TaskStatus::Todo`] without a `closed_at`
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    project_id: ProjectId,
    title: TaskTitle,
    description: Option<Description>,
    deadline: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a task draft stamped with the current clock time.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        title: TaskTitle,
        description: Option<Description>,
        deadline: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            project_id,
            title,
            description,
            deadline,
            created_at: clock.utc(),
        }
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attaches the identifier assigned by storage.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            project_id: self.project_id,
            title: self.title,
            description: self.description,
            status: TaskStatus::Todo,
            deadline: self.deadline,
            closed_at: None,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Manually edited task fields other than status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRevision {
    /// Replacement title.
    pub title: TaskTitle,
    /// Replacement description.
    pub description: Option<Description>,
    /// Replacement deadline.
    pub deadline: Option<DateTime<Utc>>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    description: Option<Description>,
    status: TaskStatus,
    deadline: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<Description>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted closure timestamp, if any.
    pub closed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    ///
    /// Rows that break the `closed_at` invariant are repaired on load: a done
    /// task without a closure time is treated as closed at `updated_at`, and
    /// an open task drops any stale closure time.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let closed_at = match (data.status, data.closed_at) {
            (TaskStatus::Done, None) => Some(data.updated_at),
            (TaskStatus::Done, Some(closed_at)) => Some(closed_at),
            (TaskStatus::Todo | TaskStatus::Doing, _) => None,
        };

        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            deadline: data.deadline,
            closed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Returns the task lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the time the task was last moved into `done`, if it is done.
    #[must_use]
    pub const fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the deadline is strictly before `now` and the task
    /// is not done.
    #[must_use]
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_done() && self.deadline.is_some_and(|deadline| deadline < now)
    }

    /// Moves the task to `new_status` at the current clock time.
    pub fn transition_status(&mut self, new_status: TaskStatus, clock: &impl Clock) {
        self.transition_status_at(new_status, clock.utc());
    }

    /// Moves the task to `new_status` as of `at`.
    ///
    /// Entering `done` sets `closed_at = at`, leaving `done` clears it, and
    /// staying in `done` keeps the original closure time. Same-status
    /// transitions are accepted.
    pub fn transition_status_at(&mut self, new_status: TaskStatus, at: DateTime<Utc>) {
        self.closed_at = match (self.status.is_done(), new_status.is_done()) {
            (false, true) => Some(at),
            (true, true) => self.closed_at,
            (_, false) => None,
        };
        self.status = new_status;
        self.updated_at = at;
    }

    /// Replaces title, description and deadline at the current clock time.
    pub fn revise(&mut self, revision: TaskRevision, clock: &impl Clock) {
        self.revise_at(revision, clock.utc());
    }

    /// Replaces title, description and deadline as of `at`.
    pub fn revise_at(&mut self, revision: TaskRevision, at: DateTime<Utc>) {
        let TaskRevision {
            title,
            description,
            deadline,
        } = revision;
        self.title = title;
        self.description = description;
        self.deadline = deadline;
        self.updated_at = at;
    }
}
