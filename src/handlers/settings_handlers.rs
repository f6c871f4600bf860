use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::session::require_admin;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::setting;
use crate::templates_structs::{PageContext, SettingsTemplate};

pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn, "/admin/settings")?;
    let settings = setting::find_all(&conn)?;
    render(SettingsTemplate { ctx, settings })
}

/// Each setting arrives as `setting_<id>=<value>`, so the whole page saves
/// in one POST regardless of how many settings exist.
pub async fn save(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;

    let params = form.into_inner();
    let submitted_token = params
        .iter()
        .find(|(k, _)| k == "csrf_token")
        .map(|(_, v)| v.as_str())
        .unwrap_or("");
    csrf::validate_csrf(&session, submitted_token)?;

    let conn = pool.get()?;
    for (key, value) in &params {
        if let Some(id_str) = key.strip_prefix("setting_") {
            if let Ok(id) = id_str.parse::<i64>() {
                setting::update_value(&conn, id, value.trim())?;
            }
        }
    }

    let _ = session.insert("flash", "Settings saved");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/settings"))
        .finish())
}
