//! Store configuration.
//!
//! # Responsibility
//! - Describe where the task record lives and under which name.
//! - Build the matching storage backend.
//!
//! # Invariants
//! - Record keys are non-empty after trimming.

use crate::clock::Clock;
use crate::repo::task_store::TaskStore;
use crate::storage::{FileBackend, MemoryBackend, SqliteBackend, StorageBackend, StorageError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Record name used when none is configured.
pub const DEFAULT_RECORD_KEY: &str = "weeklyTasks.v1";

/// Where the task record is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BackendConfig {
    /// Process memory; lost on exit.
    #[default]
    Memory,
    /// `<dir>/<record_key>.json`.
    File { dir: PathBuf },
    /// `records` table inside the SQLite database at `path`.
    Sqlite { path: PathBuf },
}

impl BackendConfig {
    fn label(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File { .. } => "file",
            Self::Sqlite { .. } => "sqlite",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub record_key: String,
    pub backend: BackendConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            record_key: DEFAULT_RECORD_KEY.to_string(),
            backend: BackendConfig::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyRecordKey,
    Storage(StorageError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRecordKey => write!(f, "record key cannot be empty"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyRecordKey => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for ConfigError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl StoreConfig {
    pub fn file(dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: BackendConfig::File { dir: dir.into() },
            ..Self::default()
        }
    }

    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: BackendConfig::Sqlite { path: path.into() },
            ..Self::default()
        }
    }

    pub fn with_record_key(mut self, record_key: impl Into<String>) -> Self {
        self.record_key = record_key.into();
        self
    }

    /// Builds the configured backend.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyRecordKey`] for a blank record key.
    /// - [`ConfigError::Storage`] when the SQLite database cannot be opened.
    pub fn open_backend(&self) -> Result<Box<dyn StorageBackend>, ConfigError> {
        let key = self.record_key.trim();
        if key.is_empty() {
            return Err(ConfigError::EmptyRecordKey);
        }

        let backend: Box<dyn StorageBackend> = match &self.backend {
            BackendConfig::Memory => Box::new(MemoryBackend::new()),
            BackendConfig::File { dir } => Box::new(FileBackend::in_dir(dir, key)),
            BackendConfig::Sqlite { path } => Box::new(SqliteBackend::open(path, key)?),
        };
        info!(
            "event=store_open module=config status=ok backend={} record_key={}",
            self.backend.label(),
            key
        );
        Ok(backend)
    }

    /// Opens a task store over the configured backend.
    pub fn open_store<C: Clock>(
        &self,
        clock: C,
    ) -> Result<TaskStore<Box<dyn StorageBackend>, C>, ConfigError> {
        Ok(TaskStore::new(self.open_backend()?, clock))
    }
}
