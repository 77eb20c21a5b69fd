//! Project management for taskyard.
//!
//! Projects are named containers that own tasks. Deleting a project removes
//! every task it owns in the same transaction. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
