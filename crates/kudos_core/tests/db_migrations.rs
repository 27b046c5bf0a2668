use kudos_core::db::migrations::{apply_migrations, latest_version};
use kudos_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "accomplishments");
    assert_table_exists(&conn, "preferences");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kudos.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "accomplishments");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn schema_rejects_rows_without_text_or_photo() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO accomplishments (uuid, text, photo_data, color, created_at)
         VALUES ('11111111-2222-4333-8444-555555555555', '   ', NULL, 'blue', 0);",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn failing_migration_names_version_and_rolls_back() {
    let mut conn = Connection::open_in_memory().unwrap();
    // A pre-existing table without `created_at` breaks the index in migration 1.
    conn.execute_batch("CREATE TABLE accomplishments (uuid TEXT PRIMARY KEY);")
        .unwrap();

    match apply_migrations(&mut conn).unwrap_err() {
        DbError::MigrationFailed { version, .. } => assert_eq!(version, 1),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(schema_version(&conn), 0);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
