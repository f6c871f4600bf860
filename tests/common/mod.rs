//! Shared test infrastructure for model layer tests.
//!
//! `setup_test_db()` opens a temporary SQLite database, runs the schema,
//! and returns it together with the TempDir that must stay alive for the
//! connection to remain valid.

use rusqlite::{Connection, params};
use tempfile::TempDir;

use brightline::db::MIGRATIONS;

pub const CLOSER_USERNAME: &str = "casey";
pub const CLOSER_DISPLAY_NAME: &str = "Casey Morgan";

pub fn setup_test_db() -> (TempDir, Connection) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let conn = Connection::open(&db_path).expect("Failed to open test DB");

    conn.execute_batch("PRAGMA foreign_keys=ON; PRAGMA journal_mode=WAL;")
        .expect("Failed to set pragmas");

    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");

    (dir, conn)
}

/// Insert a closer account and return its id. Most slot and booking tests
/// need one because time_slots.closer_id is NOT NULL.
pub fn seed_closer(conn: &Connection) -> i64 {
    conn.execute(
        "INSERT INTO users (username, password, email, display_name, role) \
         VALUES (?1, 'not-a-real-hash', 'casey@example.com', ?2, 'closer')",
        params![CLOSER_USERNAME, CLOSER_DISPLAY_NAME],
    )
    .expect("Failed to seed closer");
    conn.last_insert_rowid()
}

/// Insert an open slot and return its id.
pub fn seed_slot(conn: &Connection, closer_id: i64, date: &str, time: &str) -> i64 {
    conn.execute(
        "INSERT INTO time_slots (closer_id, slot_date, slot_time, time_zone) \
         VALUES (?1, ?2, ?3, 'America/New_York')",
        params![closer_id, date, time],
    )
    .expect("Failed to seed slot");
    conn.last_insert_rowid()
}
