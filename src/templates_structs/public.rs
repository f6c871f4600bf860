use askama::Template;

use super::SiteChrome;
use crate::models::booking::BookingConfirmation;
use crate::models::contact::ContactForm;
use crate::models::slot::AvailableTime;
use crate::models::strategy_call::StrategyCallForm;
use crate::models::testimonial::Testimonial;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: SiteChrome,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Template)]
#[template(path = "services.html")]
pub struct ServicesTemplate {
    pub chrome: SiteChrome,
}

#[derive(Template)]
#[template(path = "testimonials.html")]
pub struct TestimonialsPageTemplate {
    pub chrome: SiteChrome,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub chrome: SiteChrome,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactPageTemplate {
    pub chrome: SiteChrome,
    pub csrf_token: String,
    pub form: ContactForm,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "strategy_call.html")]
pub struct StrategyCallPageTemplate {
    pub chrome: SiteChrome,
    pub csrf_token: String,
    pub form: StrategyCallForm,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "thank_you.html")]
pub struct ThankYouTemplate {
    pub chrome: SiteChrome,
}

/// Booking step 1: date calendar plus the chosen day's open times.
#[derive(Template)]
#[template(path = "book_date.html")]
pub struct BookDateTemplate {
    pub chrome: SiteChrome,
    pub csrf_token: String,
    pub intro: String,
    pub dates: Vec<String>,
    pub selected_date: String,
    pub times: Vec<AvailableTime>,
}

/// Booking step 2: contact details.
#[derive(Template)]
#[template(path = "book_contact.html")]
pub struct BookContactTemplate {
    pub chrome: SiteChrome,
    pub csrf_token: String,
    pub slot_date: String,
    pub slot_time: String,
    pub form: crate::handlers::booking_handlers::BookingContactForm,
    pub errors: Vec<String>,
}

/// Booking step 3: confirmation.
#[derive(Template)]
#[template(path = "book_confirm.html")]
pub struct BookConfirmTemplate {
    pub chrome: SiteChrome,
    pub confirmation: BookingConfirmation,
}
