//! Durable task collection over a single named record.
//!
//! # Responsibility
//! - Load and save the whole task collection as one JSON array.
//! - Provide create/update/toggle/remove with read-modify-write semantics.
//!
//! # Invariants
//! - Persisted order is insertion order.
//! - Task ids are unique across the collection; `save` refuses duplicates.
//! - `load` never fails: absent or malformed payloads read as empty.
//! - Mutations recover from a malformed payload but never from a failed
//!   backend read; a read error aborts the mutation before anything is written.
//! - Mutations targeting a missing id are no-ops and write nothing.

use crate::clock::Clock;
use crate::model::task::{Task, TaskDraft, TaskId, TaskValidationError};
use crate::storage::{StorageBackend, StorageError};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Task store error for persistence and integrity failures.
#[derive(Debug)]
pub enum StoreError {
    /// Backend could not read or write the raw record.
    Storage(StorageError),
    /// Persisted payload is not a valid task collection.
    Corrupt(String),
    /// A task violates record invariants.
    Validation(TaskValidationError),
    /// Two tasks share the same id.
    DuplicateId(TaskId),
    /// Collection could not be encoded.
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Corrupt(message) => write!(f, "persisted tasks are corrupt: {message}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "duplicate task id: {id}"),
            Self::Serialize(err) => write!(f, "failed to encode tasks: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Corrupt(_) | Self::DuplicateId(_) => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Task collection persisted through a [`StorageBackend`].
pub struct TaskStore<B: StorageBackend, C: Clock> {
    backend: B,
    clock: C,
}

impl<B: StorageBackend, C: Clock> TaskStore<B, C> {
    pub fn new(backend: B, clock: C) -> Self {
        Self { backend, clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads the collection, treating any unreadable payload as empty.
    ///
    /// Corruption is logged but not surfaced; use [`Self::load_checked`] to
    /// tell an empty store from a corrupt one.
    pub fn load(&self) -> Vec<Task> {
        match self.load_checked() {
            Ok(tasks) => tasks,
            Err(StoreError::Storage(err)) => {
                error!(
                    "event=tasks_load module=store status=error fallback=empty error={}",
                    err
                );
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=tasks_load module=store status=recovered fallback=empty error={}",
                    err
                );
                Vec::new()
            }
        }
    }

    /// Reads the collection and reports corruption instead of hiding it.
    ///
    /// # Errors
    /// - [`StoreError::Storage`] when the backend read fails.
    /// - [`StoreError::Corrupt`] when the payload is not a valid collection.
    pub fn load_checked(&self) -> StoreResult<Vec<Task>> {
        match self.backend.read()? {
            Some(raw) => decode_tasks(&raw),
            None => Ok(Vec::new()),
        }
    }

    /// Base collection for a read-modify-write.
    ///
    /// A corrupt payload is replaced by the next write; a failed read is
    /// returned so the caller does not overwrite data it never saw.
    fn load_for_write(&self) -> StoreResult<Vec<Task>> {
        match self.load_checked() {
            Err(StoreError::Corrupt(message)) => {
                warn!(
                    "event=tasks_load module=store status=recovered fallback=empty error={}",
                    message
                );
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Replaces the whole persisted collection.
    pub fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        ensure_collection_valid(tasks)?;
        let raw = serde_json::to_string(tasks).map_err(StoreError::Serialize)?;
        if let Err(err) = self.backend.write(&raw) {
            error!(
                "event=tasks_save module=store status=error count={} error={}",
                tasks.len(),
                err
            );
            return Err(err.into());
        }
        debug!(
            "event=tasks_save module=store status=ok count={}",
            tasks.len()
        );
        Ok(())
    }

    /// Looks up one task by id.
    pub fn get(&self, id: &str) -> Option<Task> {
        self.load().into_iter().find(|task| task.id == id)
    }

    /// Appends a new task built from `draft` and persists the collection.
    ///
    /// # Contract
    /// - Assigns a fresh id, `created_at = now` and `done = false`.
    /// - Returns the stored task.
    pub fn create(&self, draft: TaskDraft) -> StoreResult<Task> {
        let task = Task::from_draft(draft, self.clock.epoch_millis());
        task.validate()?;

        let mut tasks = self.load_for_write()?;
        tasks.push(task.clone());
        self.save(&tasks)?;

        info!(
            "event=task_create module=store status=ok task_id={} priority={} count={}",
            task.id,
            task.priority,
            tasks.len()
        );
        Ok(task)
    }

    /// Replaces title/description/deadline/priority of task `id`.
    ///
    /// Returns `Ok(false)` without writing when `id` is not stored.
    pub fn update(&self, id: &str, patch: TaskDraft) -> StoreResult<bool> {
        self.mutate("task_update", id, |tasks, index| {
            let mut updated = tasks[index].clone();
            updated.apply(patch);
            updated.validate()?;
            tasks[index] = updated;
            Ok(())
        })
    }

    /// Flips `done` for task `id`; `Ok(false)` when not stored.
    pub fn toggle_done(&self, id: &str) -> StoreResult<bool> {
        self.mutate("task_toggle_done", id, |tasks, index| {
            tasks[index].done = !tasks[index].done;
            Ok(())
        })
    }

    /// Deletes task `id`; `Ok(false)` when not stored.
    pub fn remove(&self, id: &str) -> StoreResult<bool> {
        self.mutate("task_remove", id, |tasks, index| {
            tasks.remove(index);
            Ok(())
        })
    }

    fn mutate(
        &self,
        event: &str,
        id: &str,
        change: impl FnOnce(&mut Vec<Task>, usize) -> StoreResult<()>,
    ) -> StoreResult<bool> {
        let mut tasks = self.load_for_write()?;
        let Some(index) = tasks.iter().position(|task| task.id == id) else {
            debug!("event={event} module=store status=not_found task_id={id}");
            return Ok(false);
        };

        change(&mut tasks, index)?;
        self.save(&tasks)?;

        info!("event={event} module=store status=ok task_id={id}");
        Ok(true)
    }
}

/// Decodes a raw record into a validated task collection.
///
/// Blank payloads decode as empty.
pub fn decode_tasks(raw: &str) -> StoreResult<Vec<Task>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let tasks: Vec<Task> =
        serde_json::from_str(raw).map_err(|err| StoreError::Corrupt(err.to_string()))?;
    ensure_collection_valid(&tasks).map_err(|err| StoreError::Corrupt(err.to_string()))?;
    Ok(tasks)
}

fn ensure_collection_valid(tasks: &[Task]) -> StoreResult<()> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        task.validate()?;
        if !seen.insert(task.id.as_str()) {
            return Err(StoreError::DuplicateId(task.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode_tasks, StoreError};

    #[test]
    fn blank_payload_decodes_as_empty() {
        assert!(decode_tasks("").unwrap().is_empty());
        assert!(decode_tasks("  \n").unwrap().is_empty());
        assert!(decode_tasks("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_payloads_are_corrupt() {
        for raw in ["{not json", "null", "{}", "[{\"id\":\"a\"}]"] {
            let err = decode_tasks(raw).unwrap_err();
            assert!(matches!(err, StoreError::Corrupt(_)), "raw={raw}");
        }
    }

    #[test]
    fn duplicate_ids_are_corrupt() {
        let raw = r#"[
            {"id":"a","title":"one","description":"","deadline":"2024-01-01T18:00","priority":"low","done":false,"createdAt":1},
            {"id":"a","title":"two","description":"","deadline":"2024-01-02T18:00","priority":"high","done":true,"createdAt":2}
        ]"#;
        let err = decode_tasks(raw).unwrap_err();
        assert!(err.to_string().contains("duplicate task id: a"));
    }

    #[test]
    fn partial_deadline_is_corrupt() {
        let raw = r#"[{"id":"a","title":"one","deadline":"2024-01-01","priority":"low","createdAt":1}]"#;
        assert!(matches!(decode_tasks(raw), Err(StoreError::Corrupt(_))));
    }
}
