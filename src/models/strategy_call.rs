use rusqlite::{Connection, OptionalExtension, params};
use serde::Deserialize;

use crate::auth::validate;

#[derive(Debug, Clone)]
pub struct StrategyCallSubmission {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub monthly_budget: String,
    pub goals: String,
    pub rep_name: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct SalesRep {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub calendar_link: String,
    pub is_active: bool,
    pub assigned_count: i64,
}

/// Public strategy-call qualification form.
#[derive(Debug, Default, Deserialize)]
pub struct StrategyCallForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub monthly_budget: String,
    pub goals: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Deserialize)]
pub struct SalesRepForm {
    pub name: String,
    pub email: String,
    pub calendar_link: String,
    pub csrf_token: String,
}

pub fn validate_strategy_call_form(form: &StrategyCallForm) -> Vec<String> {
    let mut errors = vec![];
    errors.extend(validate::validate_required(&form.first_name, "First name", 100));
    errors.extend(validate::validate_required(&form.last_name, "Last name", 100));
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_required(&form.phone, "Phone", 30));
    errors.extend(validate::validate_optional(&form.company, "Company", 100));
    errors.extend(validate::validate_optional(&form.monthly_budget, "Monthly budget", 50));
    errors.extend(validate::validate_optional(&form.goals, "Goals", 4000));
    errors
}

pub fn validate_sales_rep_form(form: &SalesRepForm) -> Vec<String> {
    let mut errors = vec![];
    errors.extend(validate::validate_required(&form.name, "Name", 100));
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_optional(&form.calendar_link, "Calendar link", 300));
    errors
}

/// Create a submission, assigning it to the active rep with the fewest
/// existing assignments (round-robin by load). No active reps leaves the
/// submission unassigned.
pub fn create(conn: &Connection, form: &StrategyCallForm) -> rusqlite::Result<i64> {
    let rep_id: Option<i64> = conn
        .query_row(
            "SELECT r.id FROM sales_representatives r \
             LEFT JOIN strategy_call_submissions s ON s.sales_rep_id = r.id \
             WHERE r.is_active = 1 \
             GROUP BY r.id \
             ORDER BY COUNT(s.id), r.id \
             LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    conn.execute(
        "INSERT INTO strategy_call_submissions \
            (first_name, last_name, email, phone, company, monthly_budget, goals, sales_rep_id) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            form.first_name.trim(),
            form.last_name.trim(),
            form.email.trim(),
            form.phone.trim(),
            form.company.trim(),
            form.monthly_budget.trim(),
            form.goals.trim(),
            rep_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_all(conn: &Connection) -> rusqlite::Result<Vec<StrategyCallSubmission>> {
    let mut stmt = conn.prepare(
        "SELECT s.id, s.first_name, s.last_name, s.email, s.phone, s.company, \
                s.monthly_budget, s.goals, s.created_at, \
                COALESCE(r.name, '') AS rep_name \
         FROM strategy_call_submissions s \
         LEFT JOIN sales_representatives r ON r.id = s.sales_rep_id \
         ORDER BY s.created_at DESC, s.id DESC",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(StrategyCallSubmission {
                id: row.get("id")?,
                first_name: row.get("first_name")?,
                last_name: row.get("last_name")?,
                email: row.get("email")?,
                phone: row.get("phone")?,
                company: row.get("company")?,
                monthly_budget: row.get("monthly_budget")?,
                goals: row.get("goals")?,
                rep_name: row.get("rep_name")?,
                created_at: row.get("created_at")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn count(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM strategy_call_submissions", [], |row| row.get(0))
}

pub fn create_rep(conn: &Connection, form: &SalesRepForm) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO sales_representatives (name, email, calendar_link) VALUES (?1, ?2, ?3)",
        params![form.name.trim(), form.email.trim(), form.calendar_link.trim()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_reps(conn: &Connection) -> rusqlite::Result<Vec<SalesRep>> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.name, r.email, r.calendar_link, r.is_active, \
                COUNT(s.id) AS assigned_count \
         FROM sales_representatives r \
         LEFT JOIN strategy_call_submissions s ON s.sales_rep_id = r.id \
         GROUP BY r.id \
         ORDER BY r.name, r.id",
    )?;
    let reps = stmt
        .query_map([], |row| {
            Ok(SalesRep {
                id: row.get("id")?,
                name: row.get("name")?,
                email: row.get("email")?,
                calendar_link: row.get("calendar_link")?,
                is_active: row.get("is_active")?,
                assigned_count: row.get("assigned_count")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(reps)
}

pub fn toggle_rep_active(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE sales_representatives SET is_active = NOT is_active WHERE id = ?1",
        params![id],
    )
}

pub fn delete_rep(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM sales_representatives WHERE id = ?1", params![id])
}
