//! Storage backends for the single persisted task record.
//!
//! # Responsibility
//! - Define the raw `read`/`write` contract the task store depends on.
//! - Provide in-memory, file and SQLite implementations.
//!
//! # Invariants
//! - `write` replaces the whole record; readers never observe a partial
//!   payload.
//! - `read` returns `None` when the record was never written.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod file;
mod memory;
mod sqlite;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use sqlite::{SqliteBackend, RECORD_SCHEMA_VERSION};

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport-level failure while reading or writing the raw record.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Sqlite(rusqlite::Error),
    /// Database was written by a build with a newer records schema.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "storage io error: {err}"),
            Self::Sqlite(err) => write!(f, "storage database error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "records schema version {found} is newer than supported {supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Raw access to one named persisted record.
pub trait StorageBackend {
    /// Reads the raw record, or `None` when it does not exist yet.
    fn read(&self) -> StorageResult<Option<String>>;
    /// Replaces the raw record.
    fn write(&self, raw: &str) -> StorageResult<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn read(&self) -> StorageResult<Option<String>> {
        (**self).read()
    }

    fn write(&self, raw: &str) -> StorageResult<()> {
        (**self).write(raw)
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn read(&self) -> StorageResult<Option<String>> {
        (**self).read()
    }

    fn write(&self, raw: &str) -> StorageResult<()> {
        (**self).write(raw)
    }
}
