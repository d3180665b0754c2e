use rusqlite::Connection;
use weekly_tasks_core::{
    SqliteBackend, StorageBackend, StorageError, DEFAULT_RECORD_KEY, RECORD_SCHEMA_VERSION,
};

#[test]
fn fresh_database_is_upgraded_to_current_schema() {
    let backend = SqliteBackend::open_in_memory(DEFAULT_RECORD_KEY).unwrap();

    assert_eq!(backend.schema_version().unwrap(), RECORD_SCHEMA_VERSION);
    assert_eq!(backend.read().unwrap(), None);
    assert_eq!(backend.updated_at().unwrap(), None);
}

#[test]
fn reopening_keeps_payload_and_schema_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weekly_tasks.sqlite3");

    let first = SqliteBackend::open(&path, DEFAULT_RECORD_KEY).unwrap();
    first.write("[\"kept\"]").unwrap();
    drop(first);

    let second = SqliteBackend::open(&path, DEFAULT_RECORD_KEY).unwrap();
    assert_eq!(second.schema_version().unwrap(), RECORD_SCHEMA_VERSION);
    assert_eq!(second.read().unwrap().as_deref(), Some("[\"kept\"]"));
}

#[test]
fn write_stamps_updated_at_and_keeps_one_row_per_key() {
    let backend = SqliteBackend::open_in_memory(DEFAULT_RECORD_KEY).unwrap();
    backend.write("[]").unwrap();
    let first_stamp = backend.updated_at().unwrap().unwrap();
    assert!(first_stamp > 0);

    backend
        .connection()
        .execute(
            "UPDATE records SET updated_at = 0 WHERE name = ?1;",
            [DEFAULT_RECORD_KEY],
        )
        .unwrap();
    backend.write("[1]").unwrap();

    assert!(backend.updated_at().unwrap().unwrap() > 0);
    let rows: i64 = backend
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM records WHERE name = ?1;",
            [DEFAULT_RECORD_KEY],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn empty_record_key_cannot_be_written() {
    let backend = SqliteBackend::open_in_memory("").unwrap();

    let err = backend.write("[]").unwrap_err();
    assert!(matches!(err, StorageError::Sqlite(_)));
    assert_eq!(backend.read().unwrap(), None);
}

#[test]
fn database_from_newer_build_is_refused_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = SqliteBackend::open(&path, DEFAULT_RECORD_KEY)
        .err()
        .unwrap();
    match err {
        StorageError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, RECORD_SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'records';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 0);
}
