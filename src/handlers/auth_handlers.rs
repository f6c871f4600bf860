use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth::{csrf, password, rate_limit::RateLimiter};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::{setting, user};
use crate::templates_structs::LoginTemplate;

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

pub async fn login_page(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    // If already logged in, redirect to the dashboard
    if session.get::<i64>("user_id").unwrap_or(None).is_some() {
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/admin"))
            .finish());
    }

    let conn = pool.get()?;
    let site_name = setting::get_value(&conn, "site.name", "Brightline Media");
    let csrf_token = csrf::get_or_create_token(&session);
    render(LoginTemplate { error: None, site_name, csrf_token })
}

pub async fn login_submit(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<LoginForm>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let site_name = setting::get_value(&conn, "site.name", "Brightline Media");

    // Rate-limit check BEFORE any credential work
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or_else(|| std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        let csrf_token = csrf::get_or_create_token(&session);
        return render(LoginTemplate {
            error: Some("Too many failed login attempts. Please try again later.".to_string()),
            site_name,
            csrf_token,
        });
    }

    let found = user::find_by_username(&conn, form.username.trim())?;

    if let Some(u) = found {
        if password::verify_password(&form.password, &u.password) == Ok(true) {
            limiter.clear(ip);
            let _ = session.insert("user_id", u.id);
            let _ = session.insert("username", &u.username);
            let _ = session.insert("role", &u.role);
            return Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin"))
                .finish());
        }
    }

    limiter.record_failure(ip);
    let csrf_token = csrf::get_or_create_token(&session);
    render(LoginTemplate {
        error: Some("Invalid username or password".to_string()),
        site_name,
        csrf_token,
    })
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/login"))
        .finish())
}
