//! Repository layer over the persisted task record.
//!
//! # Responsibility
//! - Own the durable task collection and its mutation contract.
//! - Keep serialization details away from ranking and session logic.
//!
//! # Invariants
//! - Every write replaces the whole collection.
//! - Not-found mutations are no-ops, never errors.

pub mod task_store;
