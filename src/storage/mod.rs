//! Storage shared by the project and task adapters.
//!
//! Projects and tasks live in one backend so that deleting a project can
//! remove its tasks atomically. [`memory`] holds the shared in-memory state
//! used by test doubles; [`postgres`] holds the Diesel schema and pool.

pub mod memory;
pub mod postgres;
