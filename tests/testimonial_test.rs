//! Testimonial model tests — CRUD, the publish toggle, and the ordering
//! the public pages rely on.

mod common;

use brightline::models::testimonial::*;
use common::*;

fn sample_form(client_name: &str, sort_order: i64) -> TestimonialForm {
    TestimonialForm {
        client_name: client_name.to_string(),
        company: "Fernhill Outdoor Co.".to_string(),
        quote: "They doubled our return on ad spend.".to_string(),
        rating: 5,
        sort_order,
        csrf_token: String::new(),
    }
}

#[test]
fn test_validate_rejects_out_of_range_rating() {
    let mut form = sample_form("Maya", 10);
    form.rating = 6;
    assert_eq!(validate_testimonial_form(&form).len(), 1);
    form.rating = 0;
    assert_eq!(validate_testimonial_form(&form).len(), 1);
    form.rating = 3;
    assert!(validate_testimonial_form(&form).is_empty());
}

#[test]
fn test_create_starts_unpublished() {
    let (_dir, conn) = setup_test_db();
    let id = create(&conn, &sample_form("Maya", 10)).expect("Create failed");

    let t = find_by_id(&conn, id).expect("Query failed").expect("Not found");
    assert!(!t.is_published, "New testimonials start as drafts");
    assert!(find_published(&conn).expect("Query failed").is_empty());
}

#[test]
fn test_publish_toggle_and_count() {
    let (_dir, conn) = setup_test_db();
    let id = create(&conn, &sample_form("Maya", 10)).expect("Create failed");

    assert_eq!(toggle_published(&conn, id).expect("Toggle failed"), Some(true));
    assert_eq!(count_published(&conn).expect("Count failed"), 1);

    assert_eq!(toggle_published(&conn, id).expect("Toggle failed"), Some(false));
    assert_eq!(count_published(&conn).expect("Count failed"), 0);

    assert_eq!(toggle_published(&conn, 9999).expect("Toggle failed"), None);
}

#[test]
fn test_published_ordering_follows_sort_order() {
    let (_dir, conn) = setup_test_db();
    let late = create(&conn, &sample_form("Zed", 20)).expect("Create failed");
    let early = create(&conn, &sample_form("Amy", 10)).expect("Create failed");
    toggle_published(&conn, late).expect("Toggle failed");
    toggle_published(&conn, early).expect("Toggle failed");

    let published = find_published(&conn).expect("Query failed");
    assert_eq!(published.len(), 2);
    assert_eq!(published[0].client_name, "Amy");
    assert_eq!(published[1].client_name, "Zed");
}

#[test]
fn test_update_and_delete() {
    let (_dir, conn) = setup_test_db();
    let id = create(&conn, &sample_form("Maya", 10)).expect("Create failed");

    let mut form = sample_form("Maya Lindqvist", 5);
    form.rating = 4;
    assert_eq!(update(&conn, id, &form).expect("Update failed"), 1);

    let t = find_by_id(&conn, id).expect("Query failed").expect("Not found");
    assert_eq!(t.client_name, "Maya Lindqvist");
    assert_eq!(t.rating, 4);
    assert_eq!(t.sort_order, 5);

    assert_eq!(delete(&conn, id).expect("Delete failed"), 1);
    assert!(find_all(&conn).expect("Query failed").is_empty());
}
