// Template context structures for Askama templates, organized by surface:
// `public` for the marketing site, `admin` for the back-office.

use actix_session::Session;
use rusqlite::Connection;

use crate::auth::csrf;
use crate::auth::session::{get_role, get_username, take_flash};
use crate::errors::AppError;
use crate::models::setting;

/// Common context shared by all authenticated back-office pages.
/// Templates access these as `ctx.username`, `ctx.csrf_token`, etc.
pub struct PageContext {
    pub username: String,
    pub avatar_initial: String,
    pub role: String,
    pub flash: Option<String>,
    pub site_name: String,
    pub csrf_token: String,
    pub current_path: String,
}

impl PageContext {
    pub fn build(session: &Session, conn: &Connection, current_path: &str) -> Result<Self, AppError> {
        let username = get_username(session).map_err(AppError::Session)?;
        let role = get_role(session).map_err(AppError::Session)?;
        let flash = take_flash(session);
        let site_name = setting::get_value(conn, "site.name", "Brightline Media");
        let csrf_token = csrf::get_or_create_token(session);
        let avatar_initial = username.chars().next().unwrap_or('?').to_uppercase().to_string();
        Ok(Self {
            username,
            avatar_initial,
            role,
            flash,
            site_name,
            csrf_token,
            current_path: current_path.to_string(),
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == crate::auth::session::ROLE_ADMIN
    }

    pub fn is_active(&self, path: &str) -> bool {
        self.current_path == path
    }
}

/// Header/footer chrome for the public pages, read from settings.
pub struct SiteChrome {
    pub site_name: String,
    pub tagline: String,
    pub contact_email: String,
    pub contact_phone: String,
}

impl SiteChrome {
    pub fn load(conn: &Connection) -> Self {
        Self {
            site_name: setting::get_value(conn, "site.name", "Brightline Media"),
            tagline: setting::get_value(conn, "site.tagline", ""),
            contact_email: setting::get_value(conn, "contact.email", ""),
            contact_phone: setting::get_value(conn, "contact.phone", ""),
        }
    }
}

mod admin;
mod public;

pub use self::admin::{
    AccountTemplate, BookingDetailTemplate, BookingListTemplate, ContactListTemplate,
    DashboardTemplate, LoginTemplate, SettingsTemplate, SlotFormTemplate, SlotListTemplate,
    StrategyCallListTemplate, TestimonialFormTemplate, TestimonialListTemplate, UserFormTemplate,
    UserListTemplate,
};
pub use self::public::{
    AboutTemplate, BookConfirmTemplate, BookContactTemplate, BookDateTemplate, ContactPageTemplate,
    HomeTemplate, ServicesTemplate, StrategyCallPageTemplate, TestimonialsPageTemplate,
    ThankYouTemplate,
};
