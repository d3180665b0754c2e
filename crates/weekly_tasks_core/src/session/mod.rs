//! Form-facing edit flow.
//!
//! # Responsibility
//! - Track whether the form creates a new task or edits an existing one.
//! - Validate raw form input before any store mutation.

pub mod edit_session;
