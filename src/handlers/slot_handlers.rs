use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::session::{is_admin, require_user};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::{activity, slot};
use crate::templates_structs::{PageContext, SlotFormTemplate, SlotListTemplate};

/// A closer may only touch their own slots; admins may touch any.
fn check_owner(session: &Session, owned_by: i64) -> Result<(), AppError> {
    let user_id = require_user(session)?;
    if is_admin(session) || owned_by == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
    query: web::Query<slot::SlotFilter>,
) -> Result<HttpResponse, AppError> {
    let user_id = require_user(&session)?;
    let scope = if is_admin(&session) { None } else { Some(user_id) };

    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn, "/admin/slots")?;

    let slots = slot::find_filtered(&conn, scope, &query)?;
    let stats = slot::stats(&conn, scope)?;

    render(SlotListTemplate {
        ctx,
        slots,
        stats,
        filter_date: query.date.clone().unwrap_or_default(),
        filter_status: query.status.clone().unwrap_or_default(),
    })
}

pub async fn new_form(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn, "/admin/slots")?;

    render(SlotFormTemplate {
        ctx,
        form_action: "/admin/slots".to_string(),
        form_title: "Add Time Slot".to_string(),
        slot: None,
        time_zone_groups: slot::time_zone_options(),
        errors: vec![],
    })
}

pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<slot::SlotForm>,
) -> Result<HttpResponse, AppError> {
    let user_id = require_user(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let errors = slot::validate_slot_form(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &conn, "/admin/slots")?;
        return render(SlotFormTemplate {
            ctx,
            form_action: "/admin/slots".to_string(),
            form_title: "Add Time Slot".to_string(),
            slot: None,
            time_zone_groups: slot::time_zone_options(),
            errors,
        });
    }

    let new = slot::NewSlot {
        closer_id: user_id,
        slot_date: form.slot_date.clone(),
        slot_time: form.slot_time.clone(),
        time_zone: form.time_zone.clone(),
    };

    match slot::create(&conn, &new) {
        Ok(_) => {
            let username = crate::auth::session::get_username(&session).unwrap_or_default();
            let _ = activity::log(
                &conn,
                &username,
                &format!("Added slot {} {}", new.slot_date.trim(), new.slot_time.trim()),
            );
            let _ = session.insert("flash", "Time slot added");
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin/slots"))
                .finish())
        }
        Err(e) => {
            let msg = if e.to_string().contains("UNIQUE") {
                "You already have a slot at that date and time".to_string()
            } else {
                format!("Error adding slot: {e}")
            };
            let ctx = PageContext::build(&session, &conn, "/admin/slots")?;
            render(SlotFormTemplate {
                ctx,
                form_action: "/admin/slots".to_string(),
                form_title: "Add Time Slot".to_string(),
                slot: None,
                time_zone_groups: slot::time_zone_options(),
                errors: vec![msg],
            })
        }
    }
}

pub async fn edit_form(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let conn = pool.get()?;
    let existing = slot::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    check_owner(&session, existing.closer_id)?;

    let ctx = PageContext::build(&session, &conn, "/admin/slots")?;
    render(SlotFormTemplate {
        ctx,
        form_action: format!("/admin/slots/{id}"),
        form_title: "Edit Time Slot".to_string(),
        slot: Some(existing),
        time_zone_groups: slot::time_zone_options(),
        errors: vec![],
    })
}

pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<slot::SlotForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let existing = slot::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    check_owner(&session, existing.closer_id)?;

    let errors = slot::validate_slot_form(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &conn, "/admin/slots")?;
        return render(SlotFormTemplate {
            ctx,
            form_action: format!("/admin/slots/{id}"),
            form_title: "Edit Time Slot".to_string(),
            slot: Some(existing),
            time_zone_groups: slot::time_zone_options(),
            errors,
        });
    }

    match slot::update(&conn, id, &form) {
        Ok(_) => {
            let _ = session.insert("flash", "Time slot updated");
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin/slots"))
                .finish())
        }
        Err(e) => {
            let msg = if e.to_string().contains("UNIQUE") {
                "You already have a slot at that date and time".to_string()
            } else {
                format!("Error updating slot: {e}")
            };
            let ctx = PageContext::build(&session, &conn, "/admin/slots")?;
            render(SlotFormTemplate {
                ctx,
                form_action: format!("/admin/slots/{id}"),
                form_title: "Edit Time Slot".to_string(),
                slot: Some(existing),
                time_zone_groups: slot::time_zone_options(),
                errors: vec![msg],
            })
        }
    }
}

pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<crate::handlers::auth_handlers::CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let existing = slot::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    check_owner(&session, existing.closer_id)?;

    slot::delete(&conn, id)?;
    let username = crate::auth::session::get_username(&session).unwrap_or_default();
    let _ = activity::log(
        &conn,
        &username,
        &format!("Deleted slot {} {}", existing.slot_date, existing.slot_time),
    );
    let _ = session.insert("flash", "Time slot deleted");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/slots"))
        .finish())
}

pub async fn toggle(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<crate::handlers::auth_handlers::CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let existing = slot::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    check_owner(&session, existing.closer_id)?;

    match slot::toggle_availability(&conn, id)? {
        Some(true) => {
            let _ = session.insert("flash", "Slot marked available");
        }
        Some(false) => {
            let _ = session.insert("flash", "Slot marked booked");
        }
        None => return Err(AppError::NotFound),
    }
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/slots"))
        .finish())
}
