//! Calendar arithmetic on the local wall clock.
//!
//! # Responsibility
//! - Compute ISO week windows (Monday through Sunday).
//! - Resolve deadline shortcuts offered by the task form.

pub mod quick_pick;
pub mod week;
