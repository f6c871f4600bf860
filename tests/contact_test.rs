//! Contact inbox tests — submission validation, read state, and the CSV
//! export built from real rows.

mod common;

use brightline::models::contact::*;
use brightline::models::export;
use common::*;

fn sample_form(name: &str, message: &str) -> ContactForm {
    ContactForm {
        name: name.to_string(),
        email: "lead@example.com".to_string(),
        phone: String::new(),
        company: "Acme, Inc.".to_string(),
        message: message.to_string(),
        csrf_token: String::new(),
    }
}

#[test]
fn test_validate_requires_name_email_message() {
    let mut form = sample_form("", "");
    form.email = "not-an-email".to_string();
    let errors = validate_contact_form(&form);
    assert_eq!(errors.len(), 3);

    assert!(validate_contact_form(&sample_form("Avery", "Hello")).is_empty());
}

#[test]
fn test_create_and_unread_ordering() {
    let (_dir, conn) = setup_test_db();

    let first = create(&conn, &sample_form("First", "Oldest")).expect("Create failed");
    let second = create(&conn, &sample_form("Second", "Newest")).expect("Create failed");

    mark_read(&conn, second).expect("Mark read failed");

    let all = find_all(&conn).expect("Query failed");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first, "Unread submissions come first");
    assert!(!all[0].is_read);
    assert!(all[1].is_read);

    assert_eq!(count_unread(&conn).expect("Count failed"), 1);
}

#[test]
fn test_delete_removes_submission() {
    let (_dir, conn) = setup_test_db();
    let id = create(&conn, &sample_form("Avery", "Hello")).expect("Create failed");

    assert_eq!(delete(&conn, id).expect("Delete failed"), 1);
    assert!(find_all(&conn).expect("Query failed").is_empty());
    assert_eq!(delete(&conn, id).expect("Delete failed"), 0);
}

#[test]
fn test_csv_export_from_real_rows() {
    let (_dir, conn) = setup_test_db();
    create(&conn, &sample_form("Avery", "Line one\nline two, with a comma")).expect("Create failed");
    create(&conn, &sample_form("Blake", "Plain message")).expect("Create failed");

    let submissions = find_all(&conn).expect("Query failed");
    let rows: Vec<Vec<String>> = submissions
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                c.email.clone(),
                c.company.clone(),
                c.message.clone(),
            ]
        })
        .collect();
    let csv = export::build(&["id", "name", "email", "company", "message"], &rows);

    assert!(csv.starts_with("id,name,email,company,message\n"));
    assert!(csv.contains("\"Acme, Inc.\""), "Comma fields must be quoted");
    assert!(csv.contains("\"Line one\nline two, with a comma\""));
}
