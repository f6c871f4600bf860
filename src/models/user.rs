use rusqlite::{Connection, params};
use serde::Deserialize;

use crate::auth::session::{ROLE_ADMIN, ROLE_CLOSER};
use crate::auth::validate;

/// Internal user struct for authentication — includes password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

/// Safe version for templates — no password hash.
#[derive(Debug, Clone)]
pub struct UserDisplay {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub created_at: String,
}

/// New user data for creation.
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

/// Form data from create/edit user forms. Password empty on edit means
/// "leave unchanged".
#[derive(Debug, Deserialize)]
pub struct UserForm {
    pub username: String,
    pub password: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub csrf_token: String,
}

pub fn validate_user_form(form: &UserForm, require_password: bool) -> Vec<String> {
    let mut errors = vec![];
    errors.extend(validate::validate_username(&form.username));
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_optional(&form.display_name, "Display name", 100));
    errors.extend(validate::validate_one_of(&form.role, &[ROLE_ADMIN, ROLE_CLOSER], "Role"));
    if require_password || !form.password.is_empty() {
        errors.extend(validate::validate_password(&form.password));
    }
    errors
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        password: row.get("password")?,
        email: row.get("email")?,
        display_name: row.get("display_name")?,
        role: row.get("role")?,
    })
}

fn row_to_user_display(row: &rusqlite::Row) -> rusqlite::Result<UserDisplay> {
    Ok(UserDisplay {
        id: row.get("id")?,
        username: row.get("username")?,
        email: row.get("email")?,
        display_name: row.get("display_name")?,
        role: row.get("role")?,
        created_at: row.get("created_at")?,
    })
}

pub fn create(conn: &Connection, new: &NewUser) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO users (username, password, email, display_name, role) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            new.username.trim(),
            new.password,
            new.email.trim(),
            new.display_name.trim(),
            new.role,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update everything but the password.
pub fn update(conn: &Connection, id: i64, form: &UserForm) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE users \
         SET username = ?2, email = ?3, display_name = ?4, role = ?5, \
             updated_at = strftime('%Y-%m-%dT%H:%M:%S', 'now') \
         WHERE id = ?1",
        params![
            id,
            form.username.trim(),
            form.email.trim(),
            form.display_name.trim(),
            form.role,
        ],
    )
}

pub fn update_password(conn: &Connection, id: i64, password_hash: &str) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE users \
         SET password = ?2, updated_at = strftime('%Y-%m-%dT%H:%M:%S', 'now') \
         WHERE id = ?1",
        params![id, password_hash],
    )
}

pub fn update_display_name(conn: &Connection, id: i64, display_name: &str) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE users \
         SET display_name = ?2, updated_at = strftime('%Y-%m-%dT%H:%M:%S', 'now') \
         WHERE id = ?1",
        params![id, display_name.trim()],
    )
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM users WHERE id = ?1", params![id])
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?1")?;
    let mut rows = stmt.query_map(params![id], row_to_user)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn find_display_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<UserDisplay>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, email, display_name, role, created_at FROM users WHERE id = ?1",
    )?;
    let mut rows = stmt.query_map(params![id], row_to_user_display)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Find user by username for authentication.
pub fn find_by_username(conn: &Connection, username: &str) -> rusqlite::Result<Option<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users WHERE username = ?1")?;
    let mut rows = stmt.query_map(params![username], row_to_user)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn find_all(conn: &Connection) -> rusqlite::Result<Vec<UserDisplay>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, email, display_name, role, created_at \
         FROM users ORDER BY username",
    )?;
    let users = stmt
        .query_map([], row_to_user_display)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(users)
}

pub fn count(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
}

/// True if this user is the only admin left. Deleting or demoting them
/// would lock everyone out of user management.
pub fn is_last_admin(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let is_admin: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM users WHERE id = ?1 AND role = 'admin'",
        params![id],
        |row| row.get(0),
    )?;
    if !is_admin {
        return Ok(false);
    }
    let admin_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE role = 'admin'",
        [],
        |row| row.get(0),
    )?;
    Ok(admin_count <= 1)
}
