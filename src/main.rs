use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use brightline::auth::{self, rate_limit::RateLimiter};
use brightline::db;
use brightline::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let database_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/app.db".to_string());
    if let Some(parent) = std::path::Path::new(&database_path).parent() {
        std::fs::create_dir_all(parent).expect("Failed to create data directory");
    }

    let pool = db::init_pool(&database_path);
    db::run_migrations(&pool);

    let admin_hash = auth::password::hash_password("admin123")
        .expect("Failed to hash default password");
    db::seed(&pool, &admin_hash);
    if matches!(std::env::var("SEED_DEMO").as_deref(), Ok("1")) {
        db::seed_demo(&pool, &admin_hash);
    }

    // Session encryption key — load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+) — generating random key", val.len());
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set — generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let limiter = RateLimiter::new();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(limiter.clone()))
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            // Public marketing pages
            .route("/", web::get().to(handlers::public_handlers::home))
            .route("/services", web::get().to(handlers::public_handlers::services))
            .route("/testimonials", web::get().to(handlers::public_handlers::testimonials))
            .route("/about", web::get().to(handlers::public_handlers::about))
            .route("/contact", web::get().to(handlers::public_handlers::contact_page))
            .route("/contact", web::post().to(handlers::public_handlers::contact_submit))
            .route("/strategy-call", web::get().to(handlers::public_handlers::strategy_call_page))
            .route("/strategy-call", web::post().to(handlers::public_handlers::strategy_call_submit))
            .route("/thank-you", web::get().to(handlers::public_handlers::thank_you))
            // Booking flow
            .route("/book", web::get().to(handlers::booking_handlers::date_page))
            .route("/book/time", web::post().to(handlers::booking_handlers::pick_time))
            .route("/book/contact", web::get().to(handlers::booking_handlers::contact_page))
            .route("/book/contact", web::post().to(handlers::booking_handlers::submit))
            .route("/book/back", web::post().to(handlers::booking_handlers::back_to_dates))
            // Auth
            .route("/login", web::get().to(handlers::auth_handlers::login_page))
            .route("/login", web::post().to(handlers::auth_handlers::login_submit))
            .route("/auth", web::get().to(|| async {
                actix_web::HttpResponse::SeeOther()
                    .insert_header(("Location", "/login"))
                    .finish()
            }))
            // Back-office
            .service(
                web::scope("/admin")
                    .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                    .route("", web::get().to(handlers::dashboard::index))
                    .route("/logout", web::post().to(handlers::auth_handlers::logout))
                    // Slot manager — /slots/new BEFORE /slots/{id} to avoid routing conflict
                    .route("/slots", web::get().to(handlers::slot_handlers::list))
                    .route("/slots/new", web::get().to(handlers::slot_handlers::new_form))
                    .route("/slots", web::post().to(handlers::slot_handlers::create))
                    .route("/slots/{id}/edit", web::get().to(handlers::slot_handlers::edit_form))
                    .route("/slots/{id}", web::post().to(handlers::slot_handlers::update))
                    .route("/slots/{id}/delete", web::post().to(handlers::slot_handlers::delete))
                    .route("/slots/{id}/toggle", web::post().to(handlers::slot_handlers::toggle))
                    // Bookings
                    .route("/bookings", web::get().to(handlers::booking_admin_handlers::list))
                    .route("/bookings/{id}", web::get().to(handlers::booking_admin_handlers::detail))
                    .route("/bookings/{id}", web::post().to(handlers::booking_admin_handlers::update_outcome))
                    // Contact inbox
                    .route("/contacts", web::get().to(handlers::contact_handlers::list))
                    .route("/contacts/export.csv", web::get().to(handlers::contact_handlers::export_csv))
                    .route("/contacts/{id}/read", web::post().to(handlers::contact_handlers::mark_read))
                    .route("/contacts/{id}/delete", web::post().to(handlers::contact_handlers::delete))
                    // Testimonials
                    .route("/testimonials", web::get().to(handlers::testimonial_handlers::list))
                    .route("/testimonials/new", web::get().to(handlers::testimonial_handlers::new_form))
                    .route("/testimonials", web::post().to(handlers::testimonial_handlers::create))
                    .route("/testimonials/{id}/edit", web::get().to(handlers::testimonial_handlers::edit_form))
                    .route("/testimonials/{id}", web::post().to(handlers::testimonial_handlers::update))
                    .route("/testimonials/{id}/delete", web::post().to(handlers::testimonial_handlers::delete))
                    .route("/testimonials/{id}/publish", web::post().to(handlers::testimonial_handlers::toggle_published))
                    // Strategy calls + sales reps
                    .route("/strategy-calls", web::get().to(handlers::strategy_call_handlers::list))
                    .route("/strategy-calls/export.csv", web::get().to(handlers::strategy_call_handlers::export_csv))
                    .route("/reps", web::post().to(handlers::strategy_call_handlers::create_rep))
                    .route("/reps/{id}/toggle", web::post().to(handlers::strategy_call_handlers::toggle_rep))
                    .route("/reps/{id}/delete", web::post().to(handlers::strategy_call_handlers::delete_rep))
                    // User management (admin only, enforced in handlers)
                    .route("/users", web::get().to(handlers::user_handlers::list))
                    .route("/users/new", web::get().to(handlers::user_handlers::new_form))
                    .route("/users", web::post().to(handlers::user_handlers::create))
                    .route("/users/{id}/edit", web::get().to(handlers::user_handlers::edit_form))
                    .route("/users/{id}", web::post().to(handlers::user_handlers::update))
                    .route("/users/{id}/delete", web::post().to(handlers::user_handlers::delete))
                    // Settings + account
                    .route("/settings", web::get().to(handlers::settings_handlers::list))
                    .route("/settings", web::post().to(handlers::settings_handlers::save))
                    .route("/account", web::get().to(handlers::account_handlers::form))
                    .route("/account", web::post().to(handlers::account_handlers::submit))
            )
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
