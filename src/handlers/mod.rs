pub mod account_handlers;
pub mod auth_handlers;
pub mod booking_admin_handlers;
pub mod booking_handlers;
pub mod contact_handlers;
pub mod dashboard;
pub mod public_handlers;
pub mod settings_handlers;
pub mod slot_handlers;
pub mod strategy_call_handlers;
pub mod testimonial_handlers;
pub mod user_handlers;
