use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::session::require_user;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::models::testimonial;
use crate::templates_structs::{PageContext, TestimonialFormTemplate, TestimonialListTemplate};

pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn, "/admin/testimonials")?;
    let testimonials = testimonial::find_all(&conn)?;
    render(TestimonialListTemplate { ctx, testimonials })
}

pub async fn new_form(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn, "/admin/testimonials")?;
    render(TestimonialFormTemplate {
        ctx,
        form_action: "/admin/testimonials".to_string(),
        form_title: "Add Testimonial".to_string(),
        testimonial: None,
        errors: vec![],
    })
}

pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<testimonial::TestimonialForm>,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let errors = testimonial::validate_testimonial_form(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &conn, "/admin/testimonials")?;
        return render(TestimonialFormTemplate {
            ctx,
            form_action: "/admin/testimonials".to_string(),
            form_title: "Add Testimonial".to_string(),
            testimonial: None,
            errors,
        });
    }

    testimonial::create(&conn, &form)?;
    let _ = session.insert("flash", "Testimonial added");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/testimonials"))
        .finish())
}

pub async fn edit_form(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;
    let id = path.into_inner();
    let conn = pool.get()?;
    let existing = testimonial::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &conn, "/admin/testimonials")?;
    render(TestimonialFormTemplate {
        ctx,
        form_action: format!("/admin/testimonials/{id}"),
        form_title: "Edit Testimonial".to_string(),
        testimonial: Some(existing),
        errors: vec![],
    })
}

pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<testimonial::TestimonialForm>,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;
    let id = path.into_inner();
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let existing = testimonial::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    let errors = testimonial::validate_testimonial_form(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &conn, "/admin/testimonials")?;
        return render(TestimonialFormTemplate {
            ctx,
            form_action: format!("/admin/testimonials/{id}"),
            form_title: "Edit Testimonial".to_string(),
            testimonial: Some(existing),
            errors,
        });
    }

    testimonial::update(&conn, id, &form)?;
    let _ = session.insert("flash", "Testimonial updated");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/testimonials"))
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
    if testimonial::delete(&conn, path.into_inner())? == 0 {
        return Err(AppError::NotFound);
    }
    let _ = session.insert("flash", "Testimonial deleted");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/testimonials"))
        .finish())
}

pub async fn toggle_published(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    match testimonial::toggle_published(&conn, path.into_inner())? {
        Some(true) => {
            let _ = session.insert("flash", "Testimonial published");
        }
        Some(false) => {
            let _ = session.insert("flash", "Testimonial unpublished");
        }
        None => return Err(AppError::NotFound),
    }
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/testimonials"))
        .finish())
}
