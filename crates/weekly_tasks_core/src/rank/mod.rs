//! Ranking and filtering of task snapshots.
//!
//! # Responsibility
//! - Score tasks by priority and deadline proximity.
//! - Narrow snapshots by text search and current-week membership.
//!
//! # Invariants
//! - Both engines are pure over `(tasks, now)` and never touch storage.
//! - Ranking is stable: equal scores keep input order.

pub mod filter;
pub mod urgency;
