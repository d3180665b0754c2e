//! Core use-case services.
//!
//! # Responsibility
//! - Combine store, filter and ranking into read entry points for the UI.
//! - Keep presentation layers away from raw storage.

pub mod task_service;
