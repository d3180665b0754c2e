//! Task use-case service.
//!
//! # Responsibility
//! - Expose the ranked view read path (filter, then rank).
//! - Delegate mutations to the task store unchanged.
//!
//! # Invariants
//! - Each view is computed from one snapshot loaded at call time.
//! - Display order is never written back to storage.

use crate::clock::Clock;
use crate::model::task::{Task, TaskDraft};
use crate::rank::filter::TaskFilter;
use crate::rank::urgency::{rank_by_urgency, rank_entries, RankedTask};
use crate::repo::task_store::{StoreResult, TaskStore};
use crate::storage::StorageBackend;
use chrono::NaiveDateTime;
use log::debug;

/// Use-case facade over a [`TaskStore`].
pub struct TaskService<B: StorageBackend, C: Clock> {
    store: TaskStore<B, C>,
}

impl<B: StorageBackend, C: Clock> TaskService<B, C> {
    pub fn new(store: TaskStore<B, C>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TaskStore<B, C> {
        &self.store
    }

    /// Filtered tasks ordered by descending urgency.
    ///
    /// # Contract
    /// - Text and week predicates are combined with AND.
    /// - Equal scores keep store (insertion) order.
    pub fn get_ranked_view(
        &self,
        now: NaiveDateTime,
        search_query: &str,
        only_this_week: bool,
    ) -> Vec<Task> {
        let filtered = self.filtered(now, search_query, only_this_week);
        rank_by_urgency(filtered, now)
    }

    /// Same as [`Self::get_ranked_view`] evaluated at the store clock's now.
    pub fn current_ranked_view(&self, search_query: &str, only_this_week: bool) -> Vec<Task> {
        self.get_ranked_view(self.store.clock().local_now(), search_query, only_this_week)
    }

    /// Ranked view with per-task score, due bucket and overdue flag.
    pub fn ranked_entries(
        &self,
        now: NaiveDateTime,
        search_query: &str,
        only_this_week: bool,
    ) -> Vec<RankedTask> {
        let filtered = self.filtered(now, search_query, only_this_week);
        rank_entries(filtered, now)
    }

    pub fn create(&self, draft: TaskDraft) -> StoreResult<Task> {
        self.store.create(draft)
    }

    pub fn update(&self, id: &str, patch: TaskDraft) -> StoreResult<bool> {
        self.store.update(id, patch)
    }

    pub fn toggle_done(&self, id: &str) -> StoreResult<bool> {
        self.store.toggle_done(id)
    }

    pub fn remove(&self, id: &str) -> StoreResult<bool> {
        self.store.remove(id)
    }

    fn filtered(&self, now: NaiveDateTime, search_query: &str, only_this_week: bool) -> Vec<Task> {
        let snapshot = self.store.load();
        let filtered = TaskFilter::new(search_query, only_this_week).apply(&snapshot, now);
        debug!(
            "event=ranked_view module=service status=ok total={} shown={} only_this_week={}",
            snapshot.len(),
            filtered.len(),
            only_this_week
        );
        filtered
    }
}
