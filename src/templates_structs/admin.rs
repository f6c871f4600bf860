use askama::Template;

use super::PageContext;
use crate::models::activity::ActivityEntry;
use crate::models::booking::{BookingDetail, BookingListItem};
use crate::models::contact::ContactSubmission;
use crate::models::setting::SettingDisplay;
use crate::models::slot::{Slot, SlotDisplay, SlotStats, TimeZoneGroup};
use crate::models::strategy_call::{SalesRep, StrategyCallSubmission};
use crate::models::testimonial::Testimonial;
use crate::models::user::UserDisplay;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub site_name: String,
    pub csrf_token: String,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    pub slot_stats: SlotStats,
    pub booking_count: i64,
    pub won_count: i64,
    pub unread_contacts: i64,
    pub strategy_call_count: i64,
    pub recent_activity: Vec<ActivityEntry>,
}

#[derive(Template)]
#[template(path = "admin/slots_list.html")]
pub struct SlotListTemplate {
    pub ctx: PageContext,
    pub slots: Vec<SlotDisplay>,
    pub stats: SlotStats,
    pub filter_date: String,
    pub filter_status: String,
}

#[derive(Template)]
#[template(path = "admin/slot_form.html")]
pub struct SlotFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub slot: Option<Slot>,
    pub time_zone_groups: Vec<TimeZoneGroup>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "admin/bookings_list.html")]
pub struct BookingListTemplate {
    pub ctx: PageContext,
    pub bookings: Vec<BookingListItem>,
}

#[derive(Template)]
#[template(path = "admin/booking_detail.html")]
pub struct BookingDetailTemplate {
    pub ctx: PageContext,
    pub booking: BookingDetail,
    pub call_statuses: Vec<String>,
    pub deal_statuses: Vec<String>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "admin/contacts_list.html")]
pub struct ContactListTemplate {
    pub ctx: PageContext,
    pub submissions: Vec<ContactSubmission>,
    pub unread_count: i64,
}

#[derive(Template)]
#[template(path = "admin/testimonials_list.html")]
pub struct TestimonialListTemplate {
    pub ctx: PageContext,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Template)]
#[template(path = "admin/testimonial_form.html")]
pub struct TestimonialFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub testimonial: Option<Testimonial>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "admin/strategy_calls_list.html")]
pub struct StrategyCallListTemplate {
    pub ctx: PageContext,
    pub submissions: Vec<StrategyCallSubmission>,
    pub reps: Vec<SalesRep>,
    pub rep_errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "admin/users_list.html")]
pub struct UserListTemplate {
    pub ctx: PageContext,
    pub users: Vec<UserDisplay>,
}

#[derive(Template)]
#[template(path = "admin/user_form.html")]
pub struct UserFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub user: Option<UserDisplay>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "admin/settings.html")]
pub struct SettingsTemplate {
    pub ctx: PageContext,
    pub settings: Vec<SettingDisplay>,
}

#[derive(Template)]
#[template(path = "admin/account.html")]
pub struct AccountTemplate {
    pub ctx: PageContext,
    pub errors: Vec<String>,
}
