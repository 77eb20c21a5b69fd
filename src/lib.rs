//! Taskyard: project and task lifecycle engine.
//!
//! This crate tracks projects and the tasks they own, enforces the task
//! status rules and closes overdue tasks automatically.
//!
//! # Architecture
//!
//! Taskyard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: `PostgreSQL` and in-memory implementations of the ports
//! - **Services**: Validation and orchestration on top of the ports
//!
//! # Modules
//!
//! - [`project`]: Project creation, update and cascading deletion
//! - [`task`]: Task lifecycle, status transitions and the autoclose sweep
//! - [`storage`]: Storage shared by both contexts
//! - [`text`]: Word-bounded text rules
//! - [`error`]: Caller-facing error classification
//! - [`config`]: Environment configuration
//! - [`telemetry`]: Tracing setup for binaries

pub mod config;
pub mod error;
pub mod project;
pub mod storage;
pub mod task;
pub mod telemetry;
pub mod text;
