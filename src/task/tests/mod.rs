//! Unit tests for the task module.
//!
//! Tests are organised by concern: domain values and transitions, deadline
//! handling, service orchestration and the autoclose sweep.
