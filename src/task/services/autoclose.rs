//! Unattended closure of overdue tasks.
//!
//! [`OverdueTaskSweeper`] performs a single pass: it captures `now` once,
//! loads every open task whose deadline is strictly before `now` and moves
//! each one to `done` with `closed_at = now`. Each closure is a status-only
//! write that re-checks the overdue condition in storage, so edits made
//! after the query are kept and a task whose deadline was moved past `now`
//! stays open. One failed write leaves the rest of the batch unaffected; the
//! failed task stays overdue and is picked up again by the next pass.
//!
//! [`AutocloseScheduler`] repeats the sweep on a fixed interval until its
//! cancellation token fires.

use crate::task::{
    domain::TaskId,
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Default pause between two sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// A task that could not be closed during a sweep.
#[derive(Debug, Clone)]
pub struct SweepFailure {
    /// Task whose closing write failed.
    pub task_id: TaskId,
    /// Repository error raised by the write.
    pub error: TaskRepositoryError,
}

/// Outcome of one sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Time the sweep treated as `now`.
    pub swept_at: Option<DateTime<Utc>>,
    /// Tasks moved to `done`, in identifier order.
    pub closed: Vec<TaskId>,
    /// Tasks that were done, deleted or rescheduled before they could be
    /// closed.
    pub skipped: Vec<TaskId>,
    /// Tasks left open because their write failed.
    pub failures: Vec<SweepFailure>,
}

impl SweepReport {
    /// Number of tasks closed.
    #[must_use]
    pub fn closed_count(&self) -> usize {
        self.closed.len()
    }

    /// Returns `true` when every overdue task was closed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Closes overdue open tasks in a single pass.
pub struct OverdueTaskSweeper<T, C>
where
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<T, C> Clone for OverdueTaskSweeper<T, C>
where
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, C> OverdueTaskSweeper<T, C>
where
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a sweeper over a task repository.
    #[must_use]
    pub const fn new(tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self { tasks, clock }
    }

    /// Runs one sweep as of the current clock time.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the overdue query itself fails.
    /// Failures to persist individual tasks are reported in
    /// [`SweepReport::failures`] instead.
    pub async fn sweep(&self) -> TaskRepositoryResult<SweepReport> {
        self.sweep_at(self.clock.utc()).await
    }

    /// Runs one sweep as of `now`.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the overdue query fails.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> TaskRepositoryResult<SweepReport> {
        let overdue = self.tasks.list_overdue_open(now).await?;
        let mut report = SweepReport {
            swept_at: Some(now),
            ..SweepReport::default()
        };

        for task in overdue {
            let task_id = task.id();
            match self.tasks.close_overdue(task_id, now).await {
                Ok(true) => {
                    tracing::debug!(%task_id, project_id = %task.project_id(), "overdue task closed");
                    report.closed.push(task_id);
                }
                Ok(false) => {
                    tracing::debug!(%task_id, "task changed before it could be closed");
                    report.skipped.push(task_id);
                }
                Err(error) => {
                    tracing::warn!(%task_id, error = %error, "failed to close overdue task");
                    report.failures.push(SweepFailure { task_id, error });
                }
            }
        }

        Ok(report)
    }
}

/// Runs an [`OverdueTaskSweeper`] on a fixed interval.
pub struct AutocloseScheduler<T, C>
where
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    sweeper: OverdueTaskSweeper<T, C>,
    interval: Duration,
}

impl<T, C> AutocloseScheduler<T, C>
where
    T: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a scheduler using [`DEFAULT_SWEEP_INTERVAL`].
    #[must_use]
    pub const fn new(sweeper: OverdueTaskSweeper<T, C>) -> Self {
        Self {
            sweeper,
            interval: DEFAULT_SWEEP_INTERVAL,
        }
    }

    /// Overrides the pause between sweeps.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Returns the configured interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Sweeps immediately and then once per interval until `cancel` fires.
    ///
    /// Ticks missed while a sweep is running are skipped. A failed sweep is
    /// logged and retried on the next tick.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "autoclose scheduler started"
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!("autoclose scheduler stopping");
                    break;
                }
                _ = interval.tick() => self.tick().await,
            }
        }
    }

    /// Spawns [`run`](Self::run) on the current Tokio runtime.
    #[must_use]
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }

    async fn tick(&self) {
        match self.sweeper.sweep().await {
            Ok(report) if report.closed.is_empty() && report.failures.is_empty() => {
                tracing::debug!("autoclose sweep found no overdue tasks");
            }
            Ok(report) => {
                tracing::info!(
                    closed = report.closed_count(),
                    skipped = report.skipped.len(),
                    failed = report.failures.len(),
                    "autoclose sweep finished"
                );
            }
            Err(error) => {
                tracing::error!(error = %error, "autoclose sweep failed");
            }
        }
    }
}
