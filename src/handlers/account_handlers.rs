use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::session::require_user;
use crate::auth::{csrf, password, validate};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::user;
use crate::templates_structs::{AccountTemplate, PageContext};

#[derive(Deserialize)]
pub struct AccountForm {
    pub display_name: String,
    pub current_password: String,
    pub new_password: String,
    pub csrf_token: String,
}

pub async fn form(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn, "/admin/account")?;
    render(AccountTemplate { ctx, errors: vec![] })
}

pub async fn submit(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<AccountForm>,
) -> Result<HttpResponse, AppError> {
    let user_id = require_user(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let current = user::find_by_id(&conn, user_id)?.ok_or(AppError::NotFound)?;

    let mut errors = vec![];
    errors.extend(validate::validate_optional(&form.display_name, "Display name", 100));

    let wants_password_change = !form.new_password.is_empty();
    if wants_password_change {
        errors.extend(validate::validate_password(&form.new_password));
        match password::verify_password(&form.current_password, &current.password) {
            Ok(true) => {}
            _ => errors.push("Current password is incorrect".to_string()),
        }
    }

    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &conn, "/admin/account")?;
        return render(AccountTemplate { ctx, errors });
    }

    if !form.display_name.trim().is_empty() {
        user::update_display_name(&conn, user_id, &form.display_name)?;
    }
    if wants_password_change {
        let hashed = password::hash_password(&form.new_password)
            .map_err(|_| AppError::Hash("Password hash error".to_string()))?;
        user::update_password(&conn, user_id, &hashed)?;
    }

    let _ = session.insert("flash", "Account updated");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/account"))
        .finish())
}
