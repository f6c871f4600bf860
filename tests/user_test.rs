//! User model tests — creation, duplicate usernames, password updates,
//! and the last-admin guard.

mod common;

use brightline::auth::password;
use brightline::models::user::*;
use common::*;

fn new_user(username: &str, role: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: "hashed-password".to_string(),
        email: format!("{username}@example.com"),
        display_name: format!("{username} display"),
        role: role.to_string(),
    }
}

#[test]
fn test_create_and_find() {
    let (_dir, conn) = setup_test_db();

    let id = create(&conn, &new_user("avery", "closer")).expect("Create failed");
    assert!(id > 0);

    let found = find_display_by_id(&conn, id)
        .expect("Query failed")
        .expect("User not found");
    assert_eq!(found.username, "avery");
    assert_eq!(found.role, "closer");

    assert!(find_display_by_id(&conn, 9999).expect("Query failed").is_none());
}

#[test]
fn test_duplicate_username_fails() {
    let (_dir, conn) = setup_test_db();
    create(&conn, &new_user("avery", "closer")).expect("Create failed");

    let result = create(&conn, &new_user("avery", "admin"));
    assert!(result.is_err(), "Usernames are unique");
}

#[test]
fn test_find_by_username_for_login() {
    let (_dir, conn) = setup_test_db();
    let hash = password::hash_password("s3cret-pass").expect("Hash failed");
    let mut user = new_user("avery", "closer");
    user.password = hash;
    create(&conn, &user).expect("Create failed");

    let found = find_by_username(&conn, "avery")
        .expect("Query failed")
        .expect("User not found");
    assert!(password::verify_password("s3cret-pass", &found.password).expect("Verify failed"));
    assert!(!password::verify_password("wrong-pass", &found.password).expect("Verify failed"));

    assert!(find_by_username(&conn, "nobody").expect("Query failed").is_none());
}

#[test]
fn test_update_password_takes_effect() {
    let (_dir, conn) = setup_test_db();
    let hash = password::hash_password("old-password").expect("Hash failed");
    let mut user = new_user("avery", "closer");
    user.password = hash;
    let id = create(&conn, &user).expect("Create failed");

    let new_hash = password::hash_password("new-password").expect("Hash failed");
    assert_eq!(update_password(&conn, id, &new_hash).expect("Update failed"), 1);

    let found = find_by_id(&conn, id).expect("Query failed").expect("User not found");
    assert!(password::verify_password("new-password", &found.password).expect("Verify failed"));
    assert!(!password::verify_password("old-password", &found.password).expect("Verify failed"));
}

#[test]
fn test_is_last_admin_guard() {
    let (_dir, conn) = setup_test_db();
    let only_admin = create(&conn, &new_user("root", "admin")).expect("Create failed");
    let closer = create(&conn, &new_user("avery", "closer")).expect("Create failed");

    assert!(is_last_admin(&conn, only_admin).expect("Query failed"));
    assert!(!is_last_admin(&conn, closer).expect("Query failed"));

    let second_admin = create(&conn, &new_user("boss", "admin")).expect("Create failed");
    assert!(!is_last_admin(&conn, only_admin).expect("Query failed"));
    assert!(!is_last_admin(&conn, second_admin).expect("Query failed"));
}

#[test]
fn test_validate_user_form_password_rules() {
    let form = UserForm {
        username: "avery".to_string(),
        password: String::new(),
        email: "avery@example.com".to_string(),
        display_name: String::new(),
        role: "closer".to_string(),
        csrf_token: String::new(),
    };

    // Creation requires a password, editing does not.
    assert_eq!(validate_user_form(&form, true).len(), 1);
    assert!(validate_user_form(&form, false).is_empty());
}

#[test]
fn test_deleting_closer_cascades_to_slots() {
    let (_dir, conn) = setup_test_db();
    let closer_id = seed_closer(&conn);
    seed_slot(&conn, closer_id, "2026-09-20", "10:00 AM");

    assert_eq!(delete(&conn, closer_id).expect("Delete failed"), 1);

    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM time_slots", [], |row| row.get(0))
        .expect("Count failed");
    assert_eq!(remaining, 0);
}
