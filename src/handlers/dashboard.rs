use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{Local, Timelike};

use crate::auth::session::{is_admin, require_user};
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::{activity, booking, contact, slot, strategy_call};
use crate::templates_structs::{DashboardTemplate, PageContext};

fn time_greeting(username: &str) -> String {
    let hour = Local::now().hour();
    let period = match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{}, {}", period, username)
}

pub async fn index(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let user_id = require_user(&session)?;
    // Admin sees the whole pipeline, a closer only their own slots/bookings.
    let scope = if is_admin(&session) { None } else { Some(user_id) };

    let conn = pool.get()?;
    let ctx = PageContext::build(&session, &conn, "/admin")?;

    let greeting = time_greeting(&ctx.username);
    let slot_stats = slot::stats(&conn, scope)?;
    let booking_count = booking::count(&conn, scope)?;
    let won_count = booking::count_by_deal_status(&conn, scope, "Won")?;
    let unread_contacts = contact::count_unread(&conn)?;
    let strategy_call_count = strategy_call::count(&conn)?;
    let recent_activity = activity::find_recent(&conn, 8).unwrap_or_default();

    render(DashboardTemplate {
        ctx,
        greeting,
        slot_stats,
        booking_count,
        won_count,
        unread_contacts,
        strategy_call_count,
        recent_activity,
    })
}
