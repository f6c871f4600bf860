use rusqlite::{Connection, params};
use serde::Deserialize;

use crate::auth::validate;

#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
}

/// Public contact form payload.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
    #[serde(default)]
    pub csrf_token: String,
}

pub fn validate_contact_form(form: &ContactForm) -> Vec<String> {
    let mut errors = vec![];
    errors.extend(validate::validate_required(&form.name, "Name", 100));
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_optional(&form.phone, "Phone", 30));
    errors.extend(validate::validate_optional(&form.company, "Company", 100));
    errors.extend(validate::validate_required(&form.message, "Message", 4000));
    errors
}

pub fn create(conn: &Connection, form: &ContactForm) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO contact_submissions (name, email, phone, company, message) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            form.name.trim(),
            form.email.trim(),
            form.phone.trim(),
            form.company.trim(),
            form.message.trim(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn row_to_submission(row: &rusqlite::Row) -> rusqlite::Result<ContactSubmission> {
    Ok(ContactSubmission {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        company: row.get("company")?,
        message: row.get("message")?,
        is_read: row.get("is_read")?,
        created_at: row.get("created_at")?,
    })
}

/// All submissions, unread first, newest within each group.
pub fn find_all(conn: &Connection) -> rusqlite::Result<Vec<ContactSubmission>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM contact_submissions ORDER BY is_read, created_at DESC, id DESC",
    )?;
    let submissions = stmt
        .query_map([], row_to_submission)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(submissions)
}

pub fn mark_read(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE contact_submissions SET is_read = 1 WHERE id = ?1",
        params![id],
    )
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM contact_submissions WHERE id = ?1", params![id])
}

pub fn count_unread(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM contact_submissions WHERE is_read = 0",
        [],
        |row| row.get(0),
    )
}
