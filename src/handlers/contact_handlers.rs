use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::session::require_user;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::models::{contact, export};
use crate::templates_structs::{ContactListTemplate, PageContext};

pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn, "/admin/contacts")?;

    let submissions = contact::find_all(&conn)?;
    let unread_count = contact::count_unread(&conn)?;

    render(ContactListTemplate { ctx, submissions, unread_count })
}

pub async fn mark_read(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    if contact::mark_read(&conn, path.into_inner())? == 0 {
        return Err(AppError::NotFound);
    }
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/contacts"))
        .finish())
}

pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    if contact::delete(&conn, path.into_inner())? == 0 {
        return Err(AppError::NotFound);
    }
    let _ = session.insert("flash", "Submission deleted");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/contacts"))
        .finish())
}

/// Download the full inbox as CSV, filename dated for filing.
pub async fn export_csv(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;
    let conn = pool.get()?;

    let submissions = contact::find_all(&conn)?;
    let rows: Vec<Vec<String>> = submissions
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.name.clone(),
                s.email.clone(),
                s.phone.clone(),
                s.company.clone(),
                s.message.clone(),
                if s.is_read { "read" } else { "unread" }.to_string(),
                s.created_at.clone(),
            ]
        })
        .collect();
    let csv = export::build(
        &["id", "name", "email", "phone", "company", "message", "status", "created_at"],
        &rows,
    );

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", export::filename("contact-submissions")),
        ))
        .body(csv))
}
