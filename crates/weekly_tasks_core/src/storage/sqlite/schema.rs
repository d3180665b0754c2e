//! Schema steps for the `records` table.
//!
//! Step `n` (1-based) moves a database from schema version `n - 1` to `n`.
//! The number of applied steps lives in `PRAGMA user_version`.

use crate::storage::{StorageError, StorageResult};
use log::info;
use rusqlite::Connection;

const STEPS: &[&str] = &[include_str!("0001_records.sql")];

/// Schema version written by this build.
pub const RECORD_SCHEMA_VERSION: u32 = STEPS.len() as u32;

pub(super) fn schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Brings `conn` up to [`RECORD_SCHEMA_VERSION`], one transaction per step.
///
/// Returns the version found before upgrading. A database written by a
/// newer build is refused untouched.
pub(super) fn upgrade(conn: &mut Connection) -> StorageResult<u32> {
    let found = schema_version(conn)?;
    if found > RECORD_SCHEMA_VERSION {
        return Err(StorageError::SchemaTooNew {
            found,
            supported: RECORD_SCHEMA_VERSION,
        });
    }

    for (version, sql) in (found + 1..).zip(STEPS.iter().skip(found as usize)) {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
        info!("event=records_schema module=storage status=upgraded version={version}");
    }
    Ok(found)
}
