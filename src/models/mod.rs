pub mod activity;
pub mod booking;
pub mod contact;
pub mod export;
pub mod setting;
pub mod slot;
pub mod strategy_call;
pub mod testimonial;
pub mod user;
