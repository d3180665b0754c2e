//! SQLite-backed named record.
//!
//! # Invariants
//! - One row per record name in the `records` table.
//! - The schema is upgraded before the backend is handed out; a database
//!   from a newer build is refused.
//! - Every open emits one `records_db_open` start event and one ok/error event.

use super::{StorageBackend, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

mod schema;

pub use schema::RECORD_SCHEMA_VERSION;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Record stored as a row in a SQLite database.
pub struct SqliteBackend {
    conn: Connection,
    record_key: String,
}

impl SqliteBackend {
    /// Opens a database file, creating or upgrading the `records` table.
    pub fn open(path: impl AsRef<Path>, record_key: impl Into<String>) -> StorageResult<Self> {
        let conn = connect("file", || Connection::open(path))?;
        Ok(Self::wrap(conn, record_key))
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory(record_key: impl Into<String>) -> StorageResult<Self> {
        let conn = connect("memory", Connection::open_in_memory)?;
        Ok(Self::wrap(conn, record_key))
    }

    fn wrap(conn: Connection, record_key: impl Into<String>) -> Self {
        Self {
            conn,
            record_key: record_key.into(),
        }
    }

    pub fn record_key(&self) -> &str {
        &self.record_key
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// `PRAGMA user_version` of the open database.
    pub fn schema_version(&self) -> StorageResult<u32> {
        Ok(schema::schema_version(&self.conn)?)
    }

    /// Epoch millis of the last write to this record, if any.
    pub fn updated_at(&self) -> StorageResult<Option<i64>> {
        let millis = self
            .conn
            .query_row(
                "SELECT updated_at FROM records WHERE name = ?1;",
                [self.record_key.as_str()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(millis)
    }
}

impl StorageBackend for SqliteBackend {
    fn read(&self) -> StorageResult<Option<String>> {
        let raw = self
            .conn
            .query_row(
                "SELECT payload FROM records WHERE name = ?1;",
                [self.record_key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(raw)
    }

    fn write(&self, raw: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO records (name, payload) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET
                payload = excluded.payload,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.record_key.as_str(), raw],
        )?;
        Ok(())
    }
}

fn connect(
    mode: &str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StorageResult<Connection> {
    let started_at = Instant::now();
    info!("event=records_db_open module=storage status=start mode={mode}");

    let result = open().map_err(StorageError::from).and_then(|mut conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let found = schema::upgrade(&mut conn)?;
        Ok((conn, found))
    });

    match result {
        Ok((conn, found)) => {
            info!(
                "event=records_db_open module=storage status=ok mode={} duration_ms={} from_version={} version={}",
                mode,
                started_at.elapsed().as_millis(),
                found,
                RECORD_SCHEMA_VERSION
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=records_db_open module=storage status=error mode={} duration_ms={} error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}
