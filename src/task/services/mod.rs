//! Application services for task orchestration and automatic closure.

mod autoclose;
mod task;

pub use autoclose::{
    AutocloseScheduler, DEFAULT_SWEEP_INTERVAL, OverdueTaskSweeper, SweepFailure, SweepReport,
};
pub use task::{
    CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult, UpdateTaskRequest,
};
