//! Domain model for weekly tasks.
//!
//! # Responsibility
//! - Define the task record shared by store, ranking and edit flows.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal from the persisted collection.

pub mod task;
