use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::session::require_admin;
use crate::auth::{csrf, password};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::models::{activity, user};
use crate::templates_structs::{PageContext, UserFormTemplate, UserListTemplate};

pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn, "/admin/users")?;
    let users = user::find_all(&conn)?;
    render(UserListTemplate { ctx, users })
}

pub async fn new_form(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn, "/admin/users")?;
    render(UserFormTemplate {
        ctx,
        form_action: "/admin/users".to_string(),
        form_title: "Create User".to_string(),
        user: None,
        errors: vec![],
    })
}

pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<user::UserForm>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let errors = user::validate_user_form(&form, true);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &conn, "/admin/users")?;
        return render(UserFormTemplate {
            ctx,
            form_action: "/admin/users".to_string(),
            form_title: "Create User".to_string(),
            user: None,
            errors,
        });
    }

    let hashed = password::hash_password(&form.password)
        .map_err(|_| AppError::Hash("Password hash error".to_string()))?;

    let new = user::NewUser {
        username: form.username.trim().to_string(),
        password: hashed,
        email: form.email.trim().to_string(),
        display_name: form.display_name.trim().to_string(),
        role: form.role.clone(),
    };

    match user::create(&conn, &new) {
        Ok(_) => {
            let admin = crate::auth::session::get_username(&session).unwrap_or_default();
            let _ = activity::log(&conn, &admin, &format!("Created user '{}'", new.username));
            let _ = session.insert("flash", "User created");
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin/users"))
                .finish())
        }
        Err(e) => {
            let msg = if e.to_string().contains("UNIQUE") {
                "Username already exists".to_string()
            } else {
                format!("Error creating user: {e}")
            };
            let ctx = PageContext::build(&session, &conn, "/admin/users")?;
            render(UserFormTemplate {
                ctx,
                form_action: "/admin/users".to_string(),
                form_title: "Create User".to_string(),
                user: None,
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
    require_admin(&session)?;
    let id = path.into_inner();
    let conn = pool.get()?;
    let existing = user::find_display_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &conn, "/admin/users")?;
    render(UserFormTemplate {
        ctx,
        form_action: format!("/admin/users/{id}"),
        form_title: "Edit User".to_string(),
        user: Some(existing),
        errors: vec![],
    })
}

pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<user::UserForm>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;
    let id = path.into_inner();
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let existing = user::find_display_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    let mut errors = user::validate_user_form(&form, false);
    // Demoting the last admin would lock user management entirely.
    if form.role != crate::auth::session::ROLE_ADMIN && user::is_last_admin(&conn, id)? {
        errors.push("Cannot demote the last admin".to_string());
    }

    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &conn, "/admin/users")?;
        return render(UserFormTemplate {
            ctx,
            form_action: format!("/admin/users/{id}"),
            form_title: "Edit User".to_string(),
            user: Some(existing),
            errors,
        });
    }

    user::update(&conn, id, &form)?;
    if !form.password.is_empty() {
        let hashed = password::hash_password(&form.password)
            .map_err(|_| AppError::Hash("Password hash error".to_string()))?;
        user::update_password(&conn, id, &hashed)?;
    }

    let _ = session.insert("flash", "User updated");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/users"))
        .finish())
}

pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let admin_id = require_admin(&session)?;
    let id = path.into_inner();
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let existing = user::find_display_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    if id == admin_id {
        let _ = session.insert("flash", "You cannot delete your own account");
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/admin/users"))
            .finish());
    }
    if user::is_last_admin(&conn, id)? {
        let _ = session.insert("flash", "Cannot delete the last admin");
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/admin/users"))
            .finish());
    }

    user::delete(&conn, id)?;
    let admin = crate::auth::session::get_username(&session).unwrap_or_default();
    let _ = activity::log(&conn, &admin, &format!("Deleted user '{}'", existing.username));
    let _ = session.insert("flash", "User deleted");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/admin/users"))
        .finish())
}
