use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::{contact, strategy_call, testimonial};
use crate::templates_structs::{
    AboutTemplate, ContactPageTemplate, HomeTemplate, ServicesTemplate, SiteChrome,
    StrategyCallPageTemplate, TestimonialsPageTemplate, ThankYouTemplate,
};

pub async fn home(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let chrome = SiteChrome::load(&conn);
    let testimonials = testimonial::find_published(&conn)?;
    render(HomeTemplate { chrome, testimonials })
}

pub async fn services(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    render(ServicesTemplate { chrome: SiteChrome::load(&conn) })
}

pub async fn testimonials(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let chrome = SiteChrome::load(&conn);
    let testimonials = testimonial::find_published(&conn)?;
    render(TestimonialsPageTemplate { chrome, testimonials })
}

pub async fn about(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    render(AboutTemplate { chrome: SiteChrome::load(&conn) })
}

pub async fn thank_you(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    render(ThankYouTemplate { chrome: SiteChrome::load(&conn) })
}

pub async fn contact_page(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    render(ContactPageTemplate {
        chrome: SiteChrome::load(&conn),
        csrf_token: csrf::get_or_create_token(&session),
        form: contact::ContactForm::default(),
        errors: vec![],
    })
}

pub async fn contact_submit(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<contact::ContactForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let errors = contact::validate_contact_form(&form);
    if !errors.is_empty() {
        return render(ContactPageTemplate {
            chrome: SiteChrome::load(&conn),
            csrf_token: csrf::get_or_create_token(&session),
            form: form.into_inner(),
            errors,
        });
    }

    contact::create(&conn, &form)?;
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/thank-you"))
        .finish())
}

pub async fn strategy_call_page(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    render(StrategyCallPageTemplate {
        chrome: SiteChrome::load(&conn),
        csrf_token: csrf::get_or_create_token(&session),
        form: strategy_call::StrategyCallForm::default(),
        errors: vec![],
    })
}

pub async fn strategy_call_submit(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<strategy_call::StrategyCallForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let conn = pool.get()?;
    let errors = strategy_call::validate_strategy_call_form(&form);
    if !errors.is_empty() {
        return render(StrategyCallPageTemplate {
            chrome: SiteChrome::load(&conn),
            csrf_token: csrf::get_or_create_token(&session),
            form: form.into_inner(),
            errors,
        });
    }

    strategy_call::create(&conn, &form)?;
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/thank-you"))
        .finish())
}
