//! Public 3-step booking flow: pick a date and time, leave contact details,
//! get a confirmation. Step state (the chosen date/time) lives in the
//! session; the slot itself is only claimed at the final submit, inside one
//! transaction.

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::{csrf, validate};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::{booking, setting, slot};
use crate::templates_structs::{
    BookConfirmTemplate, BookContactTemplate, BookDateTemplate, SiteChrome,
};

const SESSION_DATE: &str = "book_date";
const SESSION_TIME: &str = "book_time";

#[derive(Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// Step 1: the calendar. Only upcoming dates with at least one open slot are
/// offered; picking one lists that day's open times.
pub async fn date_page(
    pool: web::Data<DbPool>,
    session: Session,
    query: web::Query<DateQuery>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let today = chrono::Local::now().date_naive();
    let dates = slot::available_dates(&conn, &today.format("%Y-%m-%d").to_string())?;

    let selected_date = query
        .date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty() && !slot::is_past(d, today))
        .unwrap_or("")
        .to_string();

    let times = if selected_date.is_empty() {
        vec![]
    } else {
        slot::available_times(&conn, &selected_date)?
    };

    render(BookDateTemplate {
        chrome: SiteChrome::load(&conn),
        csrf_token: csrf::get_or_create_token(&session),
        intro: setting::get_value(&conn, "booking.intro", ""),
        dates,
        selected_date,
        times,
    })
}

#[derive(Deserialize)]
pub struct TimeForm {
    pub slot_date: String,
    pub slot_time: String,
    pub csrf_token: String,
}

/// Step 1 submit: hold the chosen date/time in the session and move on.
pub async fn pick_time(
    session: Session,
    form: web::Form<TimeForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let today = chrono::Local::now().date_naive();
    if slot::is_past(&form.slot_date, today) || form.slot_time.trim().is_empty() {
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/book"))
            .finish());
    }

    let _ = session.insert(SESSION_DATE, form.slot_date.trim());
    let _ = session.insert(SESSION_TIME, form.slot_time.trim());
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/book/contact"))
        .finish())
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub additional_info: String,
    #[serde(default)]
    pub csrf_token: String,
}

fn validate_contact(form: &BookingContactForm) -> Vec<String> {
    let mut errors = vec![];
    errors.extend(validate::validate_required(&form.first_name, "First name", 100));
    errors.extend(validate::validate_required(&form.last_name, "Last name", 100));
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_required(&form.phone, "Phone", 30));
    errors.extend(validate::validate_optional(&form.additional_info, "Additional info", 4000));
    errors
}

fn held_slot(session: &Session) -> Option<(String, String)> {
    let date = session.get::<String>(SESSION_DATE).unwrap_or(None)?;
    let time = session.get::<String>(SESSION_TIME).unwrap_or(None)?;
    Some((date, time))
}

/// Step 2: contact details for the held date/time. Without a held slot the
/// visitor is sent back to step 1.
pub async fn contact_page(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let Some((slot_date, slot_time)) = held_slot(&session) else {
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/book"))
            .finish());
    };

    let conn = pool.get()?;
    render(BookContactTemplate {
        chrome: SiteChrome::load(&conn),
        csrf_token: csrf::get_or_create_token(&session),
        slot_date,
        slot_time,
        form: BookingContactForm::default(),
        errors: vec![],
    })
}

/// "Back" from step 2 to step 1, keeping the chosen date preselected.
pub async fn back_to_dates(session: Session) -> Result<HttpResponse, AppError> {
    let date = session.get::<String>(SESSION_DATE).unwrap_or(None).unwrap_or_default();
    session.remove(SESSION_TIME);
    let location = if date.is_empty() {
        "/book".to_string()
    } else {
        format!("/book?date={date}")
    };
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish())
}

/// Final submit: claim the slot. The transactional create either books the
/// matching open slot and flips it, or reports that it is gone — a racing
/// booker or a double submit cannot produce two live bookings on one slot.
pub async fn submit(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<BookingContactForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let Some((slot_date, slot_time)) = held_slot(&session) else {
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/book"))
            .finish());
    };

    let mut conn = pool.get()?;

    let errors = validate_contact(&form);
    if !errors.is_empty() {
        return render(BookContactTemplate {
            chrome: SiteChrome::load(&conn),
            csrf_token: csrf::get_or_create_token(&session),
            slot_date,
            slot_time,
            form: form.into_inner(),
            errors,
        });
    }

    let new = booking::NewBooking {
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        additional_info: form.additional_info.clone(),
    };

    let created = booking::create_for_slot(&mut conn, &slot_date, &slot_time, &new);
    let confirmation = match created {
        Ok(Some(confirmation)) => confirmation,
        Ok(None) => {
            return render(BookContactTemplate {
                chrome: SiteChrome::load(&conn),
                csrf_token: csrf::get_or_create_token(&session),
                slot_date,
                slot_time,
                form: form.into_inner(),
                errors: vec!["Selected slot is no longer available. Please pick another time.".to_string()],
            });
        }
        Err(e) => {
            // A race that slipped past the availability check lands on the
            // unique index; report it the same way as a lost slot.
            log::warn!("Booking insert failed for {slot_date} {slot_time}: {e}");
            return render(BookContactTemplate {
                chrome: SiteChrome::load(&conn),
                csrf_token: csrf::get_or_create_token(&session),
                slot_date,
                slot_time,
                form: form.into_inner(),
                errors: vec!["Selected slot is no longer available. Please pick another time.".to_string()],
            });
        }
    };

    session.remove(SESSION_DATE);
    session.remove(SESSION_TIME);

    render(BookConfirmTemplate {
        chrome: SiteChrome::load(&conn),
        confirmation,
    })
}
