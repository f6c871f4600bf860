use actix_session::Session;

use crate::errors::AppError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CLOSER: &str = "closer";

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>("user_id").unwrap_or(None)
}

pub fn get_username(session: &Session) -> Result<String, String> {
    match session.get::<String>("username") {
        Ok(Some(username)) => Ok(username),
        Ok(None) => Err("No username in session".to_string()),
        Err(e) => Err(format!("Session error: {}", e)),
    }
}

pub fn get_role(session: &Session) -> Result<String, String> {
    match session.get::<String>("role") {
        Ok(Some(role)) => Ok(role),
        Ok(None) => Err("No role in session".to_string()),
        Err(e) => Err(format!("Session error: {}", e)),
    }
}

pub fn is_admin(session: &Session) -> bool {
    matches!(get_role(session).as_deref(), Ok(ROLE_ADMIN))
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}

/// Require an authenticated session; returns the user id.
pub fn require_user(session: &Session) -> Result<i64, AppError> {
    get_user_id(session).ok_or_else(|| AppError::Session("Not logged in".to_string()))
}

/// Require the admin role on top of authentication.
pub fn require_admin(session: &Session) -> Result<i64, AppError> {
    let user_id = require_user(session)?;
    if is_admin(session) {
        Ok(user_id)
    } else {
        Err(AppError::Forbidden)
    }
}
