use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::session::{get_username, is_admin, require_user};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::{activity, booking};
use crate::templates_structs::{BookingDetailTemplate, BookingListTemplate, PageContext};

pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let user_id = require_user(&session)?;
    let scope = if is_admin(&session) { None } else { Some(user_id) };

    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn, "/admin/bookings")?;
    let bookings = booking::find_for_closer(&conn, scope)?;

    render(BookingListTemplate { ctx, bookings })
}

fn status_options(options: &[&str]) -> Vec<String> {
    options.iter().map(|s| s.to_string()).collect()
}

fn load_owned(
    conn: &rusqlite::Connection,
    session: &Session,
    id: i64,
) -> Result<booking::BookingDetail, AppError> {
    let detail = booking::find_detail(conn, id)?.ok_or(AppError::NotFound)?;
    let user_id = require_user(session)?;
    if !is_admin(session) && detail.closer_id != user_id {
        return Err(AppError::Forbidden);
    }
    Ok(detail)
}

pub async fn detail(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let conn = pool.get()?;
    let detail = load_owned(&conn, &session, id)?;

    let ctx = PageContext::build(&session, &conn, "/admin/bookings")?;
    render(BookingDetailTemplate {
        ctx,
        booking: detail,
        call_statuses: status_options(booking::CALL_STATUSES),
        deal_statuses: status_options(booking::DEAL_STATUSES),
        errors: vec![],
    })
}

pub async fn update_outcome(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<booking::OutcomeForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let mut conn = pool.get()?;
    let detail = load_owned(&conn, &session, id)?;

    let errors = booking::validate_outcome_form(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &conn, "/admin/bookings")?;
        return render(BookingDetailTemplate {
            ctx,
            booking: detail,
            call_statuses: status_options(booking::CALL_STATUSES),
            deal_statuses: status_options(booking::DEAL_STATUSES),
            errors,
        });
    }

    booking::update_outcome(&mut conn, id, &form)?;

    let username = get_username(&session).unwrap_or_default();
    let _ = activity::log(
        &conn,
        &username,
        &format!(
            "Updated booking #{id} ({} {}): {} / {}",
            detail.first_name, detail.last_name, form.call_status, form.deal_status
        ),
    );

    let _ = session.insert("flash", "Booking updated");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", format!("/admin/bookings/{id}")))
        .finish())
}
