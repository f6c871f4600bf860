use rusqlite::{Connection, params};
use serde::Deserialize;

use crate::auth::validate;

#[derive(Debug, Clone)]
pub struct Testimonial {
    pub id: i64,
    pub client_name: String,
    pub company: String,
    pub quote: String,
    pub rating: i64,
    pub is_published: bool,
    pub sort_order: i64,
}

#[derive(Debug, Deserialize)]
pub struct TestimonialForm {
    pub client_name: String,
    pub company: String,
    pub quote: String,
    pub rating: i64,
    pub sort_order: i64,
    pub csrf_token: String,
}

pub fn validate_testimonial_form(form: &TestimonialForm) -> Vec<String> {
    let mut errors = vec![];
    errors.extend(validate::validate_required(&form.client_name, "Client name", 100));
    errors.extend(validate::validate_optional(&form.company, "Company", 100));
    errors.extend(validate::validate_required(&form.quote, "Quote", 2000));
    if !(1..=5).contains(&form.rating) {
        errors.push("Rating must be between 1 and 5".to_string());
    }
    errors
}

fn row_to_testimonial(row: &rusqlite::Row) -> rusqlite::Result<Testimonial> {
    Ok(Testimonial {
        id: row.get("id")?,
        client_name: row.get("client_name")?,
        company: row.get("company")?,
        quote: row.get("quote")?,
        rating: row.get("rating")?,
        is_published: row.get("is_published")?,
        sort_order: row.get("sort_order")?,
    })
}

pub fn create(conn: &Connection, form: &TestimonialForm) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO testimonials (client_name, company, quote, rating, sort_order) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            form.client_name.trim(),
            form.company.trim(),
            form.quote.trim(),
            form.rating,
            form.sort_order,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, form: &TestimonialForm) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE testimonials \
         SET client_name = ?2, company = ?3, quote = ?4, rating = ?5, sort_order = ?6, \
             updated_at = strftime('%Y-%m-%dT%H:%M:%S', 'now') \
         WHERE id = ?1",
        params![
            id,
            form.client_name.trim(),
            form.company.trim(),
            form.quote.trim(),
            form.rating,
            form.sort_order,
        ],
    )
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM testimonials WHERE id = ?1", params![id])
}

/// Flip the published flag. Returns the new state, or None if missing.
pub fn toggle_published(conn: &Connection, id: i64) -> rusqlite::Result<Option<bool>> {
    let changed = conn.execute(
        "UPDATE testimonials \
         SET is_published = NOT is_published, \
             updated_at = strftime('%Y-%m-%dT%H:%M:%S', 'now') \
         WHERE id = ?1",
        params![id],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    let state: bool = conn.query_row(
        "SELECT is_published FROM testimonials WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(Some(state))
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Testimonial>> {
    let mut stmt = conn.prepare("SELECT * FROM testimonials WHERE id = ?1")?;
    let mut rows = stmt.query_map(params![id], row_to_testimonial)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn find_all(conn: &Connection) -> rusqlite::Result<Vec<Testimonial>> {
    let mut stmt = conn.prepare("SELECT * FROM testimonials ORDER BY sort_order, id")?;
    let rows = stmt
        .query_map([], row_to_testimonial)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Published testimonials for the public pages.
pub fn find_published(conn: &Connection) -> rusqlite::Result<Vec<Testimonial>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM testimonials WHERE is_published = 1 ORDER BY sort_order, id",
    )?;
    let rows = stmt
        .query_map([], row_to_testimonial)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn count_published(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM testimonials WHERE is_published = 1",
        [],
        |row| row.get(0),
    )
}
