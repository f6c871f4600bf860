use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::session::{require_admin, require_user};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::models::{export, strategy_call};
use crate::templates_structs::{PageContext, StrategyCallListTemplate};

pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn, "/admin/strategy-calls")?;

    let submissions = strategy_call::find_all(&conn)?;
    let reps = strategy_call::find_reps(&conn)?;

    render(StrategyCallListTemplate { ctx, submissions, reps, rep_errors: vec![] })
}

/// Sales reps receive round-robin assignments, so managing them is admin-only.
pub async fn create_rep(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<strategy_call::SalesRepForm>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let errors = strategy_call::validate_sales_rep_form(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &conn, "/admin/strategy-calls")?;
        let submissions = strategy_call::find_all(&conn)?;
        let reps = strategy_call::find_reps(&conn)?;
        return render(StrategyCallListTemplate { ctx, submissions, reps, rep_errors: errors });
    }

    strategy_call::create_rep(&conn, &form)?;
    let _ = session.insert("flash", "Sales representative added");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/strategy-calls"))
        .finish())
}

pub async fn toggle_rep(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    if strategy_call::toggle_rep_active(&conn, path.into_inner())? == 0 {
        return Err(AppError::NotFound);
    }
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/strategy-calls"))
        .finish())
}

pub async fn delete_rep(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    if strategy_call::delete_rep(&conn, path.into_inner())? == 0 {
        return Err(AppError::NotFound);
    }
    let _ = session.insert("flash", "Sales representative removed");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/strategy-calls"))
        .finish())
}

pub async fn export_csv(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_user(&session)?;
    let conn = pool.get()?;

    let submissions = strategy_call::find_all(&conn)?;
    let rows: Vec<Vec<String>> = submissions
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.first_name.clone(),
                s.last_name.clone(),
                s.email.clone(),
                s.phone.clone(),
                s.company.clone(),
                s.monthly_budget.clone(),
                s.goals.clone(),
                s.rep_name.clone(),
                s.created_at.clone(),
            ]
        })
        .collect();
    let csv = export::build(
        &[
            "id", "first_name", "last_name", "email", "phone", "company",
            "monthly_budget", "goals", "assigned_rep", "created_at",
        ],
        &rows,
    );

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", export::filename("strategy-calls")),
        ))
        .body(csv))
}
