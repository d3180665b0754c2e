//! Core domain logic for Weekly Tasks.
//! This crate owns task persistence, urgency ranking, week filtering and
//! the create/edit flow; presentation layers only call into it.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod rank;
pub mod repo;
pub mod schedule;
pub mod service;
pub mod session;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{BackendConfig, ConfigError, StoreConfig, DEFAULT_RECORD_KEY};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{
    Deadline, DeadlineParseError, Priority, Task, TaskDraft, TaskId, TaskValidationError,
};
pub use rank::filter::TaskFilter;
pub use rank::urgency::{
    days_until, is_overdue, rank_by_urgency, time_weight, urgency_score, DueBucket, RankedTask,
};
pub use repo::task_store::{StoreError, StoreResult, TaskStore};
pub use schedule::quick_pick::QuickPick;
pub use schedule::week::{end_of_week, start_of_week, WeekWindow};
pub use service::task_service::TaskService;
pub use session::edit_session::{
    EditMode, EditSession, FormValidationError, SessionError, SubmitOutcome, TaskForm,
};
pub use storage::{
    FileBackend, MemoryBackend, SqliteBackend, StorageBackend, StorageError, StorageResult,
    RECORD_SCHEMA_VERSION,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
