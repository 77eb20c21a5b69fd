//! Step definitions for overdue task sweep scenarios.

pub mod given;
pub mod world;
