use rusqlite::{Connection, OptionalExtension, params};
use serde::Deserialize;

use crate::models::slot;

pub const CALL_STATUSES: &[&str] = &["Scheduled", "Completed", "No Show", "Rescheduled", "Cancelled"];
pub const DEAL_STATUSES: &[&str] = &["Pending", "Won", "Lost", "Follow Up"];

pub const STATUS_CANCELLED: &str = "Cancelled";

/// Contact details collected on booking step 2.
pub struct NewBooking {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub additional_info: String,
}

/// What the confirmation page needs after a successful booking.
#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub booking_id: i64,
    pub slot_date: String,
    pub slot_time: String,
    pub time_zone_label: &'static str,
    pub closer_name: String,
}

/// Row for the closer-side bookings table.
#[derive(Debug, Clone)]
pub struct BookingListItem {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub slot_date: String,
    pub slot_time: String,
    pub call_status: String,
    pub deal_status: String,
    pub closer_name: String,
}

/// Full booking for the detail / outcome page.
#[derive(Debug, Clone)]
pub struct BookingDetail {
    pub id: i64,
    pub slot_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub additional_info: String,
    pub call_status: String,
    pub deal_status: String,
    pub closer_notes: String,
    pub invoice_sent: bool,
    pub invoice_sent_date: String,
    pub invoice_link: String,
    pub contract_sent: bool,
    pub contract_sent_date: String,
    pub contract_link: String,
    pub ad_spend: String,
    pub offer_made: String,
    pub deposit_amount: String,
    pub payment_link: String,
    pub follow_up_date: String,
    pub reschedule_date: String,
    pub slot_date: String,
    pub slot_time: String,
    pub time_zone_label: &'static str,
    pub closer_id: i64,
    pub closer_name: String,
    pub created_at: String,
}

/// Outcome form posted from the booking detail page. Checkboxes arrive only
/// when ticked, hence the Options.
#[derive(Debug, Deserialize)]
pub struct OutcomeForm {
    pub call_status: String,
    pub deal_status: String,
    pub closer_notes: String,
    pub invoice_sent: Option<String>,
    pub invoice_sent_date: String,
    pub invoice_link: String,
    pub contract_sent: Option<String>,
    pub contract_sent_date: String,
    pub contract_link: String,
    pub ad_spend: String,
    pub offer_made: String,
    pub deposit_amount: String,
    pub payment_link: String,
    pub follow_up_date: String,
    pub reschedule_date: String,
    pub csrf_token: String,
}

/// Book the open slot matching (date, time), if one is left.
///
/// The availability check, the booking insert, and the slot flip run in one
/// transaction, so two racing submissions cannot both book the same slot:
/// the loser either finds no open slot or trips the unique index on live
/// bookings per slot. Returns Ok(None) when nothing matched.
pub fn create_for_slot(
    conn: &mut Connection,
    slot_date: &str,
    slot_time: &str,
    new: &NewBooking,
) -> rusqlite::Result<Option<BookingConfirmation>> {
    let tx = conn.transaction()?;

    let matched: Option<(i64, String, String, String, String)> = tx
        .query_row(
            "SELECT s.id, s.slot_date, s.slot_time, s.time_zone, u.display_name \
             FROM time_slots s \
             JOIN users u ON u.id = s.closer_id \
             WHERE s.slot_date = ?1 AND s.slot_time = ?2 AND s.is_available = 1 \
             ORDER BY s.id LIMIT 1",
            params![slot_date, slot_time],
            |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
            },
        )
        .optional()?;

    let Some((slot_id, date, time, time_zone, closer_name)) = matched else {
        return Ok(None);
    };

    tx.execute(
        "INSERT INTO bookings (slot_id, first_name, last_name, email, phone, additional_info) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            slot_id,
            new.first_name.trim(),
            new.last_name.trim(),
            new.email.trim(),
            new.phone.trim(),
            new.additional_info.trim(),
        ],
    )?;
    let booking_id = tx.last_insert_rowid();

    tx.execute(
        "UPDATE time_slots \
         SET is_available = 0, updated_at = strftime('%Y-%m-%dT%H:%M:%S', 'now') \
         WHERE id = ?1",
        params![slot_id],
    )?;

    tx.commit()?;

    Ok(Some(BookingConfirmation {
        booking_id,
        slot_date: date,
        slot_time: time,
        time_zone_label: slot::friendly_label(&time_zone),
        closer_name,
    }))
}

/// Bookings for the back-office table. `closer_id = None` means all closers.
pub fn find_for_closer(
    conn: &Connection,
    closer_id: Option<i64>,
) -> rusqlite::Result<Vec<BookingListItem>> {
    let mut sql = String::from(
        "SELECT b.id, b.first_name, b.last_name, b.email, \
                s.slot_date, s.slot_time, b.call_status, b.deal_status, \
                u.display_name AS closer_name \
         FROM bookings b \
         JOIN time_slots s ON s.id = b.slot_id \
         JOIN users u ON u.id = s.closer_id",
    );
    let mut bind: Vec<i64> = vec![];
    if let Some(id) = closer_id {
        sql.push_str(" WHERE s.closer_id = ?1");
        bind.push(id);
    }
    sql.push_str(" ORDER BY s.slot_date DESC, s.slot_time DESC, b.id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let bookings = stmt
        .query_map(rusqlite::params_from_iter(bind.iter()), |row| {
            Ok(BookingListItem {
                id: row.get("id")?,
                first_name: row.get("first_name")?,
                last_name: row.get("last_name")?,
                email: row.get("email")?,
                slot_date: row.get("slot_date")?,
                slot_time: row.get("slot_time")?,
                call_status: row.get("call_status")?,
                deal_status: row.get("deal_status")?,
                closer_name: row.get("closer_name")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(bookings)
}

pub fn find_detail(conn: &Connection, id: i64) -> rusqlite::Result<Option<BookingDetail>> {
    let mut stmt = conn.prepare(
        "SELECT b.*, s.slot_date, s.slot_time, s.time_zone, \
                s.closer_id, u.display_name AS closer_name \
         FROM bookings b \
         JOIN time_slots s ON s.id = b.slot_id \
         JOIN users u ON u.id = s.closer_id \
         WHERE b.id = ?1",
    )?;
    let mut rows = stmt.query_map(params![id], |row| {
        let time_zone: String = row.get("time_zone")?;
        Ok(BookingDetail {
            id: row.get("id")?,
            slot_id: row.get("slot_id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            additional_info: row.get("additional_info")?,
            call_status: row.get("call_status")?,
            deal_status: row.get("deal_status")?,
            closer_notes: row.get("closer_notes")?,
            invoice_sent: row.get("invoice_sent")?,
            invoice_sent_date: row.get("invoice_sent_date")?,
            invoice_link: row.get("invoice_link")?,
            contract_sent: row.get("contract_sent")?,
            contract_sent_date: row.get("contract_sent_date")?,
            contract_link: row.get("contract_link")?,
            ad_spend: row.get("ad_spend")?,
            offer_made: row.get("offer_made")?,
            deposit_amount: row.get("deposit_amount")?,
            payment_link: row.get("payment_link")?,
            follow_up_date: row.get("follow_up_date")?,
            reschedule_date: row.get("reschedule_date")?,
            slot_date: row.get("slot_date")?,
            slot_time: row.get("slot_time")?,
            time_zone_label: slot::friendly_label(&time_zone),
            closer_id: row.get("closer_id")?,
            closer_name: row.get("closer_name")?,
            created_at: row.get("created_at")?,
        })
    })?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Validate the two status dropdowns; everything else is free-form.
pub fn validate_outcome_form(form: &OutcomeForm) -> Vec<String> {
    let mut errors = vec![];
    errors.extend(crate::auth::validate::validate_one_of(
        &form.call_status, CALL_STATUSES, "Call status",
    ));
    errors.extend(crate::auth::validate::validate_one_of(
        &form.deal_status, DEAL_STATUSES, "Deal status",
    ));
    errors
}

/// Full-row outcome update from the detail page. Setting the call status to
/// Cancelled reopens the underlying slot.
pub fn update_outcome(conn: &mut Connection, id: i64, form: &OutcomeForm) -> rusqlite::Result<usize> {
    let tx = conn.transaction()?;

    let changed = tx.execute(
        "UPDATE bookings SET \
            call_status = ?2, deal_status = ?3, closer_notes = ?4, \
            invoice_sent = ?5, invoice_sent_date = ?6, invoice_link = ?7, \
            contract_sent = ?8, contract_sent_date = ?9, contract_link = ?10, \
            ad_spend = ?11, offer_made = ?12, deposit_amount = ?13, \
            payment_link = ?14, follow_up_date = ?15, reschedule_date = ?16, \
            updated_at = strftime('%Y-%m-%dT%H:%M:%S', 'now') \
         WHERE id = ?1",
        params![
            id,
            form.call_status,
            form.deal_status,
            form.closer_notes.trim(),
            form.invoice_sent.is_some(),
            form.invoice_sent_date.trim(),
            form.invoice_link.trim(),
            form.contract_sent.is_some(),
            form.contract_sent_date.trim(),
            form.contract_link.trim(),
            form.ad_spend.trim(),
            form.offer_made.trim(),
            form.deposit_amount.trim(),
            form.payment_link.trim(),
            form.follow_up_date.trim(),
            form.reschedule_date.trim(),
        ],
    )?;

    if changed > 0 && form.call_status == STATUS_CANCELLED {
        tx.execute(
            "UPDATE time_slots \
             SET is_available = 1, updated_at = strftime('%Y-%m-%dT%H:%M:%S', 'now') \
             WHERE id = (SELECT slot_id FROM bookings WHERE id = ?1)",
            params![id],
        )?;
    }

    tx.commit()?;
    Ok(changed)
}

pub fn count(conn: &Connection, closer_id: Option<i64>) -> rusqlite::Result<i64> {
    match closer_id {
        Some(id) => conn.query_row(
            "SELECT COUNT(*) FROM bookings b \
             JOIN time_slots s ON s.id = b.slot_id WHERE s.closer_id = ?1",
            params![id],
            |row| row.get(0),
        ),
        None => conn.query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0)),
    }
}

pub fn count_by_deal_status(
    conn: &Connection,
    closer_id: Option<i64>,
    deal_status: &str,
) -> rusqlite::Result<i64> {
    match closer_id {
        Some(id) => conn.query_row(
            "SELECT COUNT(*) FROM bookings b \
             JOIN time_slots s ON s.id = b.slot_id \
             WHERE s.closer_id = ?1 AND b.deal_status = ?2",
            params![id, deal_status],
            |row| row.get(0),
        ),
        None => conn.query_row(
            "SELECT COUNT(*) FROM bookings WHERE deal_status = ?1",
            params![deal_status],
            |row| row.get(0),
        ),
    }
}
