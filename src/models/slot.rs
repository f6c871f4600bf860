use chrono::NaiveDate;
use rusqlite::{Connection, params};
use serde::Deserialize;

use crate::auth::validate;

/// Legacy dropdown sentinel. The time-zone select is built from grouped
/// options so this can no longer be picked, but the write path still rejects
/// it in case an old client submits it.
pub const RESERVED_OPTION: &str = "SEPARATOR";

/// Friendly labels for the time zones closers actually sell in.
/// Anything else renders as UTC.
pub const TIME_ZONES: &[(&str, &str)] = &[
    ("America/New_York", "Eastern Time (ET)"),
    ("America/Chicago", "Central Time (CT)"),
    ("America/Denver", "Mountain Time (MT)"),
    ("America/Los_Angeles", "Pacific Time (PT)"),
    ("Europe/London", "UK Time (GMT/BST)"),
    ("Europe/Berlin", "Central Europe (CET)"),
    ("Asia/Dubai", "Gulf Time (GST)"),
];

pub fn friendly_label(time_zone: &str) -> &'static str {
    TIME_ZONES
        .iter()
        .find(|(iana, _)| *iana == time_zone)
        .map(|(_, label)| *label)
        .unwrap_or("UTC")
}

/// One `<optgroup>` worth of time-zone choices.
pub struct TimeZoneGroup {
    pub label: &'static str,
    pub zones: Vec<(&'static str, &'static str)>,
}

pub fn time_zone_options() -> Vec<TimeZoneGroup> {
    vec![
        TimeZoneGroup {
            label: "North America",
            zones: TIME_ZONES[..4].to_vec(),
        },
        TimeZoneGroup {
            label: "Europe & Middle East",
            zones: TIME_ZONES[4..].to_vec(),
        },
    ]
}

#[derive(Debug, Clone)]
pub struct Slot {
    pub id: i64,
    pub closer_id: i64,
    pub slot_date: String,
    pub slot_time: String,
    pub time_zone: String,
    pub is_available: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Slot row for the manager table, with the owning closer's name joined in.
#[derive(Debug, Clone)]
pub struct SlotDisplay {
    pub id: i64,
    pub closer_id: i64,
    pub closer_name: String,
    pub slot_date: String,
    pub slot_time: String,
    pub time_zone: String,
    pub time_zone_label: &'static str,
    pub is_available: bool,
}

pub struct NewSlot {
    pub closer_id: i64,
    pub slot_date: String,
    pub slot_time: String,
    pub time_zone: String,
}

/// Form data from the add/edit slot forms.
#[derive(Debug, Deserialize)]
pub struct SlotForm {
    pub slot_date: String,
    pub slot_time: String,
    pub time_zone: String,
    pub csrf_token: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SlotStats {
    pub total: i64,
    pub available: i64,
    pub booked: i64,
}

/// List filter: optional date, optional "available"/"booked" status.
#[derive(Debug, Default, Deserialize)]
pub struct SlotFilter {
    pub date: Option<String>,
    pub status: Option<String>,
}

/// Validate an add/edit slot form. Returns human-readable errors; the write
/// only happens when this comes back empty.
pub fn validate_slot_form(form: &SlotForm) -> Vec<String> {
    let mut errors = vec![];
    for value in [&form.slot_date, &form.slot_time, &form.time_zone] {
        if value.trim() == RESERVED_OPTION {
            errors.push("A placeholder option was submitted; pick a real value".to_string());
            return errors;
        }
    }
    errors.extend(validate::validate_date(&form.slot_date, "Date"));
    errors.extend(validate::validate_required(&form.slot_time, "Time", 20));
    if !TIME_ZONES.iter().any(|(iana, _)| *iana == form.time_zone.trim()) {
        errors.push("Time zone is not a valid option".to_string());
    }
    errors
}

fn row_to_slot(row: &rusqlite::Row) -> rusqlite::Result<Slot> {
    Ok(Slot {
        id: row.get("id")?,
        closer_id: row.get("closer_id")?,
        slot_date: row.get("slot_date")?,
        slot_time: row.get("slot_time")?,
        time_zone: row.get("time_zone")?,
        is_available: row.get("is_available")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn create(conn: &Connection, new: &NewSlot) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO time_slots (closer_id, slot_date, slot_time, time_zone) \
         VALUES (?1, ?2, ?3, ?4)",
        params![new.closer_id, new.slot_date.trim(), new.slot_time.trim(), new.time_zone.trim()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, form: &SlotForm) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE time_slots \
         SET slot_date = ?2, slot_time = ?3, time_zone = ?4, \
             updated_at = strftime('%Y-%m-%dT%H:%M:%S', 'now') \
         WHERE id = ?1",
        params![id, form.slot_date.trim(), form.slot_time.trim(), form.time_zone.trim()],
    )
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM time_slots WHERE id = ?1", params![id])
}

/// Flip the availability flag. Returns the new state, or None if the slot
/// does not exist.
pub fn toggle_availability(conn: &Connection, id: i64) -> rusqlite::Result<Option<bool>> {
    let changed = conn.execute(
        "UPDATE time_slots \
         SET is_available = NOT is_available, \
             updated_at = strftime('%Y-%m-%dT%H:%M:%S', 'now') \
         WHERE id = ?1",
        params![id],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    let state: bool = conn.query_row(
        "SELECT is_available FROM time_slots WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(Some(state))
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Slot>> {
    let mut stmt = conn.prepare("SELECT * FROM time_slots WHERE id = ?1")?;
    let mut rows = stmt.query_map(params![id], row_to_slot)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Slots for the manager table. `closer_id = None` means all closers
/// (admin view); the filter narrows by date and availability.
pub fn find_filtered(
    conn: &Connection,
    closer_id: Option<i64>,
    filter: &SlotFilter,
) -> rusqlite::Result<Vec<SlotDisplay>> {
    let mut sql = String::from(
        "SELECT s.id, s.closer_id, u.display_name AS closer_name, \
                s.slot_date, s.slot_time, s.time_zone, s.is_available \
         FROM time_slots s \
         JOIN users u ON u.id = s.closer_id \
         WHERE 1=1",
    );
    let mut bind: Vec<rusqlite::types::Value> = vec![];

    if let Some(id) = closer_id {
        sql.push_str(&format!(" AND s.closer_id = ?{}", bind.len() + 1));
        bind.push(rusqlite::types::Value::Integer(id));
    }
    if let Some(date) = filter.date.as_deref().filter(|d| !d.trim().is_empty()) {
        sql.push_str(&format!(" AND s.slot_date = ?{}", bind.len() + 1));
        bind.push(rusqlite::types::Value::Text(date.trim().to_string()));
    }
    match filter.status.as_deref() {
        Some("available") => sql.push_str(" AND s.is_available = 1"),
        Some("booked") => sql.push_str(" AND s.is_available = 0"),
        _ => {}
    }
    sql.push_str(" ORDER BY s.slot_date, s.slot_time, s.id");

    let mut stmt = conn.prepare(&sql)?;
    let slots = stmt
        .query_map(rusqlite::params_from_iter(bind.iter()), |row| {
            let time_zone: String = row.get("time_zone")?;
            Ok(SlotDisplay {
                id: row.get("id")?,
                closer_id: row.get("closer_id")?,
                closer_name: row.get("closer_name")?,
                slot_date: row.get("slot_date")?,
                slot_time: row.get("slot_time")?,
                time_zone_label: friendly_label(&time_zone),
                time_zone,
                is_available: row.get("is_available")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(slots)
}

/// Available/booked counts for the manager dashboard cards.
pub fn stats(conn: &Connection, closer_id: Option<i64>) -> rusqlite::Result<SlotStats> {
    let (sql, bind): (&str, Vec<i64>) = match closer_id {
        Some(id) => (
            "SELECT COUNT(*), COALESCE(SUM(is_available), 0) FROM time_slots WHERE closer_id = ?1",
            vec![id],
        ),
        None => ("SELECT COUNT(*), COALESCE(SUM(is_available), 0) FROM time_slots", vec![]),
    };
    let (total, available): (i64, i64) = conn.query_row(
        sql,
        rusqlite::params_from_iter(bind.iter()),
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(SlotStats { total, available, booked: total - available })
}

/// Distinct upcoming dates that still have at least one open slot.
/// `today` is YYYY-MM-DD; past dates never show on the booking calendar.
pub fn available_dates(conn: &Connection, today: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT slot_date FROM time_slots \
         WHERE is_available = 1 AND slot_date >= ?1 \
         ORDER BY slot_date",
    )?;
    let dates = stmt
        .query_map(params![today], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(dates)
}

/// An open time on a given day, as shown on booking step 1.
#[derive(Debug, Clone)]
pub struct AvailableTime {
    pub slot_time: String,
    pub time_zone_label: &'static str,
}

pub fn available_times(conn: &Connection, date: &str) -> rusqlite::Result<Vec<AvailableTime>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT slot_time, time_zone FROM time_slots \
         WHERE is_available = 1 AND slot_date = ?1 \
         ORDER BY slot_time",
    )?;
    let times = stmt
        .query_map(params![date], |row| {
            let slot_time: String = row.get(0)?;
            let time_zone: String = row.get(1)?;
            Ok(AvailableTime {
                slot_time,
                time_zone_label: friendly_label(&time_zone),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(times)
}

/// True if the date string is strictly before today. Unparseable dates are
/// treated as past so they never show on the calendar.
pub fn is_past(date: &str, today: NaiveDate) -> bool {
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(d) => d < today,
        Err(_) => true,
    }
}
