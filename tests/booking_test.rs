//! Booking model tests — the transactional create path, double-booking
//! protection, outcome updates, and the cancel-reopens-slot rule.

mod common;

use brightline::models::booking::*;
use brightline::models::slot;
use common::*;

fn sample_lead() -> NewBooking {
    NewBooking {
        first_name: "Avery".to_string(),
        last_name: "Chen".to_string(),
        email: "avery@example.com".to_string(),
        phone: "+1 555 0100".to_string(),
        additional_info: "Spending about $20k/mo on Meta".to_string(),
    }
}

fn blank_outcome(call_status: &str, deal_status: &str) -> OutcomeForm {
    OutcomeForm {
        call_status: call_status.to_string(),
        deal_status: deal_status.to_string(),
        closer_notes: String::new(),
        invoice_sent: None,
        invoice_sent_date: String::new(),
        invoice_link: String::new(),
        contract_sent: None,
        contract_sent_date: String::new(),
        contract_link: String::new(),
        ad_spend: String::new(),
        offer_made: String::new(),
        deposit_amount: String::new(),
        payment_link: String::new(),
        follow_up_date: String::new(),
        reschedule_date: String::new(),
        csrf_token: String::new(),
    }
}

#[test]
fn test_create_books_slot_and_returns_confirmation() {
    let (_dir, mut conn) = setup_test_db();
    let closer_id = seed_closer(&conn);
    let slot_id = seed_slot(&conn, closer_id, "2026-09-20", "10:00 AM");

    let confirmation = create_for_slot(&mut conn, "2026-09-20", "10:00 AM", &sample_lead())
        .expect("Create failed")
        .expect("Expected a confirmation");

    assert_eq!(confirmation.slot_date, "2026-09-20");
    assert_eq!(confirmation.slot_time, "10:00 AM");
    assert_eq!(confirmation.time_zone_label, "Eastern Time (ET)");
    assert_eq!(confirmation.closer_name, CLOSER_DISPLAY_NAME);

    let booked = slot::find_by_id(&conn, slot_id)
        .expect("Query failed")
        .expect("Slot not found");
    assert!(!booked.is_available, "Booking should close the slot");
}

#[test]
fn test_create_returns_none_when_nothing_matches() {
    let (_dir, mut conn) = setup_test_db();
    let closer_id = seed_closer(&conn);
    seed_slot(&conn, closer_id, "2026-09-20", "10:00 AM");

    let miss = create_for_slot(&mut conn, "2026-09-20", "4:00 PM", &sample_lead())
        .expect("Create failed");
    assert!(miss.is_none());

    let empty_day = create_for_slot(&mut conn, "2026-09-21", "10:00 AM", &sample_lead())
        .expect("Create failed");
    assert!(empty_day.is_none());
}

#[test]
fn test_second_booking_on_same_slot_fails() {
    let (_dir, mut conn) = setup_test_db();
    let closer_id = seed_closer(&conn);
    seed_slot(&conn, closer_id, "2026-09-20", "10:00 AM");

    let first = create_for_slot(&mut conn, "2026-09-20", "10:00 AM", &sample_lead())
        .expect("Create failed");
    assert!(first.is_some());

    let second = create_for_slot(&mut conn, "2026-09-20", "10:00 AM", &sample_lead())
        .expect("Create failed");
    assert!(second.is_none(), "The slot is taken, the second lead must not book it");
}

#[test]
fn test_live_booking_unique_index_holds_even_without_availability_check() {
    let (_dir, mut conn) = setup_test_db();
    let closer_id = seed_closer(&conn);
    let slot_id = seed_slot(&conn, closer_id, "2026-09-20", "10:00 AM");

    create_for_slot(&mut conn, "2026-09-20", "10:00 AM", &sample_lead())
        .expect("Create failed")
        .expect("Expected a confirmation");

    // A write that skips the availability check still cannot attach a second
    // live booking to the slot.
    let result = conn.execute(
        "INSERT INTO bookings (slot_id, first_name, last_name, email, phone, additional_info) \
         VALUES (?1, 'X', 'Y', 'x@example.com', '', '')",
        rusqlite::params![slot_id],
    );
    assert!(result.is_err());
}

#[test]
fn test_cancel_reopens_slot_and_allows_rebooking() {
    let (_dir, mut conn) = setup_test_db();
    let closer_id = seed_closer(&conn);
    let slot_id = seed_slot(&conn, closer_id, "2026-09-20", "10:00 AM");

    let confirmation = create_for_slot(&mut conn, "2026-09-20", "10:00 AM", &sample_lead())
        .expect("Create failed")
        .expect("Expected a confirmation");

    let changed = update_outcome(
        &mut conn,
        confirmation.booking_id,
        &blank_outcome(STATUS_CANCELLED, "Lost"),
    )
    .expect("Update failed");
    assert_eq!(changed, 1);

    let slot = slot::find_by_id(&conn, slot_id)
        .expect("Query failed")
        .expect("Slot not found");
    assert!(slot.is_available, "Cancelling must reopen the slot");

    let rebooked = create_for_slot(&mut conn, "2026-09-20", "10:00 AM", &sample_lead())
        .expect("Create failed");
    assert!(rebooked.is_some(), "A cancelled booking must not block the slot");
}

#[test]
fn test_find_for_closer_scopes_by_owner() {
    let (_dir, mut conn) = setup_test_db();
    let closer_id = seed_closer(&conn);
    seed_slot(&conn, closer_id, "2026-09-20", "10:00 AM");
    create_for_slot(&mut conn, "2026-09-20", "10:00 AM", &sample_lead())
        .expect("Create failed")
        .expect("Expected a confirmation");

    let all = find_for_closer(&conn, None).expect("Query failed");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].first_name, "Avery");
    assert_eq!(all[0].call_status, "Scheduled");
    assert_eq!(all[0].deal_status, "Pending");

    let mine = find_for_closer(&conn, Some(closer_id)).expect("Query failed");
    assert_eq!(mine.len(), 1);

    let theirs = find_for_closer(&conn, Some(closer_id + 1)).expect("Query failed");
    assert!(theirs.is_empty());
}

#[test]
fn test_outcome_update_round_trips_detail_fields() {
    let (_dir, mut conn) = setup_test_db();
    let closer_id = seed_closer(&conn);
    seed_slot(&conn, closer_id, "2026-09-20", "10:00 AM");
    let confirmation = create_for_slot(&mut conn, "2026-09-20", "10:00 AM", &sample_lead())
        .expect("Create failed")
        .expect("Expected a confirmation");

    let mut form = blank_outcome("Completed", "Won");
    form.closer_notes = "Closed on the second call".to_string();
    form.invoice_sent = Some("1".to_string());
    form.invoice_sent_date = "2026-09-21".to_string();
    form.deposit_amount = "2500".to_string();

    update_outcome(&mut conn, confirmation.booking_id, &form).expect("Update failed");

    let detail = find_detail(&conn, confirmation.booking_id)
        .expect("Query failed")
        .expect("Booking not found");
    assert_eq!(detail.call_status, "Completed");
    assert_eq!(detail.deal_status, "Won");
    assert_eq!(detail.closer_notes, "Closed on the second call");
    assert!(detail.invoice_sent);
    assert!(!detail.contract_sent);
    assert_eq!(detail.deposit_amount, "2500");
    assert_eq!(detail.closer_id, closer_id);

    assert_eq!(count_by_deal_status(&conn, None, "Won").expect("Count failed"), 1);
    assert_eq!(count_by_deal_status(&conn, Some(closer_id), "Lost").expect("Count failed"), 0);
}

#[test]
fn test_validate_outcome_rejects_unknown_statuses() {
    let form = blank_outcome("Ghosted", "Maybe");
    let errors = validate_outcome_form(&form);
    assert_eq!(errors.len(), 2);
}
