//! Settings and activity log tests.

mod common;

use brightline::models::{activity, setting};
use common::*;

fn seed_setting(conn: &rusqlite::Connection, name: &str, value: &str) -> i64 {
    conn.execute(
        "INSERT INTO settings (name, label, value, sort_order) VALUES (?1, ?2, ?3, 10)",
        rusqlite::params![name, name, value],
    )
    .expect("Failed to seed setting");
    conn.last_insert_rowid()
}

#[test]
fn test_get_value_falls_back_to_default() {
    let (_dir, conn) = setup_test_db();
    seed_setting(&conn, "site.name", "Brightline Media");

    assert_eq!(setting::get_value(&conn, "site.name", "fallback"), "Brightline Media");
    assert_eq!(setting::get_value(&conn, "site.missing", "fallback"), "fallback");
}

#[test]
fn test_update_value_by_id() {
    let (_dir, conn) = setup_test_db();
    let id = seed_setting(&conn, "site.tagline", "Old tagline");

    assert_eq!(setting::update_value(&conn, id, "New tagline").expect("Update failed"), 1);
    assert_eq!(setting::get_value(&conn, "site.tagline", ""), "New tagline");

    let all = setting::find_all(&conn).expect("Query failed");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].value, "New tagline");
}

#[test]
fn test_activity_log_returns_newest_first_with_limit() {
    let (_dir, conn) = setup_test_db();
    for i in 1..=5 {
        activity::log(&conn, "admin", &format!("action {i}")).expect("Log failed");
    }

    let recent = activity::find_recent(&conn, 3).expect("Query failed");
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].message, "action 5");
    assert_eq!(recent[0].actor, "admin");
    assert_eq!(recent[2].message, "action 3");
}
