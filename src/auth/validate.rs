use chrono::NaiveDate;

/// Validate a username: 2-50 chars, alphanumeric and underscore only.
pub fn validate_username(username: &str) -> Option<String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Some("Username is required".to_string());
    }
    if trimmed.len() < 2 {
        return Some("Username must be at least 2 characters".to_string());
    }
    if trimmed.len() > 50 {
        return Some("Username must be at most 50 characters".to_string());
    }
    if !trimmed.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Some("Username may only contain letters, numbers, and underscores".to_string());
    }
    None
}

/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    if !trimmed.contains('@') || !trimmed.contains('.') {
        return Some("Email must be a valid address (contain '@' and '.')".to_string());
    }
    None
}

/// Validate a password: min 8 chars on create.
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Password is required".to_string());
    }
    if password.len() < 8 {
        return Some("Password must be at least 8 characters".to_string());
    }
    None
}

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.len() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.len() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate a calendar date in YYYY-MM-DD form.
pub fn validate_date(value: &str, field_name: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_err() {
        return Some(format!("{field_name} must be a valid date (YYYY-MM-DD)"));
    }
    None
}

/// Validate that a dropdown value is one of the allowed options.
pub fn validate_one_of(value: &str, allowed: &[&str], field_name: &str) -> Option<String> {
    if allowed.contains(&value) {
        None
    } else {
        Some(format!("{field_name} is not a valid option"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(validate_username("jordan_r").is_none());
        assert!(validate_username("").is_some());
        assert!(validate_username("a").is_some());
        assert!(validate_username("has space").is_some());
    }

    #[test]
    fn date_must_be_real() {
        assert!(validate_date("2026-09-15", "Date").is_none());
        assert!(validate_date("2026-02-30", "Date").is_some());
        assert!(validate_date("15/09/2026", "Date").is_some());
        assert!(validate_date("", "Date").is_some());
    }

    #[test]
    fn one_of_enforces_membership() {
        assert!(validate_one_of("Won", &["Pending", "Won", "Lost"], "Deal status").is_none());
        assert!(validate_one_of("Maybe", &["Pending", "Won", "Lost"], "Deal status").is_some());
    }
}
