//! Time slot model tests — creation, validation, filtering, toggling,
//! and the public availability queries behind the booking calendar.

mod common;

use brightline::models::slot::*;
use chrono::NaiveDate;
use common::*;

fn valid_form() -> SlotForm {
    SlotForm {
        slot_date: "2026-09-15".to_string(),
        slot_time: "10:00 AM".to_string(),
        time_zone: "America/New_York".to_string(),
        csrf_token: String::new(),
    }
}

#[test]
fn test_validate_accepts_valid_form() {
    assert!(validate_slot_form(&valid_form()).is_empty());
}

#[test]
fn test_validate_rejects_reserved_option() {
    let mut form = valid_form();
    form.time_zone = RESERVED_OPTION.to_string();
    let errors = validate_slot_form(&form);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("placeholder"));
}

#[test]
fn test_validate_rejects_bad_date_and_unknown_zone() {
    let mut form = valid_form();
    form.slot_date = "15/09/2026".to_string();
    form.time_zone = "Mars/Olympus_Mons".to_string();
    let errors = validate_slot_form(&form);
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_create_and_find_by_id() {
    let (_dir, conn) = setup_test_db();
    let closer_id = seed_closer(&conn);

    let id = create(
        &conn,
        &NewSlot {
            closer_id,
            slot_date: "2026-09-15".to_string(),
            slot_time: "10:00 AM".to_string(),
            time_zone: "America/New_York".to_string(),
        },
    )
    .expect("Failed to create slot");

    let slot = find_by_id(&conn, id).expect("Query failed").expect("Slot not found");
    assert_eq!(slot.slot_date, "2026-09-15");
    assert!(slot.is_available);
}

#[test]
fn test_duplicate_slot_for_same_closer_fails() {
    let (_dir, conn) = setup_test_db();
    let closer_id = seed_closer(&conn);
    seed_slot(&conn, closer_id, "2026-09-15", "10:00 AM");

    let result = create(
        &conn,
        &NewSlot {
            closer_id,
            slot_date: "2026-09-15".to_string(),
            slot_time: "10:00 AM".to_string(),
            time_zone: "America/New_York".to_string(),
        },
    );
    assert!(result.is_err(), "Same closer, date, and time should hit the unique constraint");
}

#[test]
fn test_update_onto_existing_slot_reports_unique_violation() {
    let (_dir, conn) = setup_test_db();
    let closer_id = seed_closer(&conn);
    seed_slot(&conn, closer_id, "2026-09-15", "10:00 AM");
    let other_id = seed_slot(&conn, closer_id, "2026-09-16", "1:00 PM");

    let err = update(&conn, other_id, &valid_form())
        .expect_err("Editing onto a taken date and time should fail");
    assert!(
        err.to_string().contains("UNIQUE"),
        "Error must carry the constraint name so the form can re-render with a friendly message"
    );

    let unchanged = find_by_id(&conn, other_id).expect("Query failed").expect("Slot not found");
    assert_eq!(unchanged.slot_date, "2026-09-16");
}

#[test]
fn test_toggle_flips_availability_and_stats() {
    let (_dir, conn) = setup_test_db();
    let closer_id = seed_closer(&conn);
    let slot_id = seed_slot(&conn, closer_id, "2026-09-15", "10:00 AM");
    seed_slot(&conn, closer_id, "2026-09-15", "1:00 PM");

    let before = stats(&conn, None).expect("Stats failed");
    assert_eq!(before.total, 2);
    assert_eq!(before.available, 2);
    assert_eq!(before.booked, 0);

    let state = toggle_availability(&conn, slot_id).expect("Toggle failed");
    assert_eq!(state, Some(false));

    let after = stats(&conn, None).expect("Stats failed");
    assert_eq!(after.available, 1);
    assert_eq!(after.booked, 1);

    assert_eq!(toggle_availability(&conn, 9999).expect("Toggle failed"), None);
}

#[test]
fn test_find_filtered_by_date_status_and_closer() {
    let (_dir, conn) = setup_test_db();
    let closer_id = seed_closer(&conn);
    seed_slot(&conn, closer_id, "2026-09-15", "10:00 AM");
    let booked_id = seed_slot(&conn, closer_id, "2026-09-16", "1:00 PM");
    toggle_availability(&conn, booked_id).expect("Toggle failed");

    let by_date = find_filtered(
        &conn,
        None,
        &SlotFilter { date: Some("2026-09-15".to_string()), status: None },
    )
    .expect("Query failed");
    assert_eq!(by_date.len(), 1);
    assert_eq!(by_date[0].slot_date, "2026-09-15");
    assert_eq!(by_date[0].closer_name, CLOSER_DISPLAY_NAME);

    let booked = find_filtered(
        &conn,
        None,
        &SlotFilter { date: None, status: Some("booked".to_string()) },
    )
    .expect("Query failed");
    assert_eq!(booked.len(), 1);
    assert_eq!(booked[0].id, booked_id);

    let other_closer = find_filtered(&conn, Some(closer_id + 1), &SlotFilter::default())
        .expect("Query failed");
    assert!(other_closer.is_empty());
}

#[test]
fn test_available_dates_skip_past_and_booked() {
    let (_dir, conn) = setup_test_db();
    let closer_id = seed_closer(&conn);
    seed_slot(&conn, closer_id, "2026-09-10", "10:00 AM");
    seed_slot(&conn, closer_id, "2026-09-20", "10:00 AM");
    let booked_id = seed_slot(&conn, closer_id, "2026-09-25", "10:00 AM");
    toggle_availability(&conn, booked_id).expect("Toggle failed");

    let dates = available_dates(&conn, "2026-09-15").expect("Query failed");
    assert_eq!(dates, vec!["2026-09-20".to_string()]);
}

#[test]
fn test_available_times_carry_friendly_zone_label() {
    let (_dir, conn) = setup_test_db();
    let closer_id = seed_closer(&conn);
    seed_slot(&conn, closer_id, "2026-09-20", "3:30 PM");
    seed_slot(&conn, closer_id, "2026-09-20", "10:00 AM");

    let times = available_times(&conn, "2026-09-20").expect("Query failed");
    assert_eq!(times.len(), 2);
    assert_eq!(times[0].slot_time, "10:00 AM");
    assert_eq!(times[0].time_zone_label, "Eastern Time (ET)");
}

#[test]
fn test_is_past_treats_garbage_as_past() {
    let today = NaiveDate::from_ymd_opt(2026, 9, 15).unwrap();
    assert!(is_past("2026-09-14", today));
    assert!(!is_past("2026-09-15", today));
    assert!(!is_past("2026-09-16", today));
    assert!(is_past("not-a-date", today));
}

#[test]
fn test_friendly_label_defaults_to_utc() {
    assert_eq!(friendly_label("America/New_York"), "Eastern Time (ET)");
    assert_eq!(friendly_label("Atlantis/Lost_City"), "UTC");
}
