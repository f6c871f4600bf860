//! CSV assembly for the back-office export downloads.

/// Quote a field if it contains a comma, quote, or newline; embedded quotes
/// double up per RFC 4180.
pub fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Build a CSV document: header line plus one line per row.
pub fn build(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut csv = header.join(",");
    csv.push('\n');
    for row in rows {
        let line: Vec<String> = row.iter().map(|f| escape(f)).collect();
        csv.push_str(&line.join(","));
        csv.push('\n');
    }
    csv
}

/// Download filename with today's date, e.g. `contacts-2026-08-29.csv`.
pub fn filename(prefix: &str) -> String {
    let today = chrono::Local::now().format("%Y-%m-%d");
    format!("{prefix}-{today}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_pass_through() {
        assert_eq!(escape("hello"), "hello");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(escape(r#"say "hi""#), r#""say ""hi""""#);
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn n_rows_produce_n_plus_one_lines() {
        let rows = vec![
            vec!["1".to_string(), "Ada".to_string()],
            vec!["2".to_string(), "Grace".to_string()],
            vec!["3".to_string(), "Edsger".to_string()],
        ];
        let csv = build(&["id", "name"], &rows);
        assert_eq!(csv.trim_end().lines().count(), rows.len() + 1);
        assert!(csv.starts_with("id,name\n"));
    }

    #[test]
    fn filename_carries_the_date() {
        let name = filename("contacts");
        assert!(name.starts_with("contacts-"));
        assert!(name.ends_with(".csv"));
    }
}
