//! Task lifecycle management.
//!
//! Tasks belong to a project and move freely between `todo`, `doing` and
//! `done`; `closed_at` is set exactly while a task is `done`. Open tasks whose
//! deadline has passed are closed by the autoclose sweeper. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services and the autoclose scheduler in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
