//! In-process handler tests: public pages render, the back office redirects
//! anonymous visitors to the login page, and POSTs without a CSRF token are
//! refused.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, cookie::Key, test, web};
use tempfile::TempDir;

use brightline::db;
use brightline::handlers;

fn test_pool(dir: &TempDir) -> db::DbPool {
    let db_path = dir.path().join("test.db");
    let pool = db::init_pool(db_path.to_str().expect("utf-8 path"));
    db::run_migrations(&pool);
    pool
}

fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_secure(false)
        .build()
}

#[actix_web::test]
async fn test_public_pages_render() {
    let dir = TempDir::new().expect("temp dir");
    let pool = test_pool(&dir);

    let app = test::init_service(
        App::new()
            .wrap(session_middleware())
            .app_data(web::Data::new(pool))
            .route("/", web::get().to(handlers::public_handlers::home))
            .route("/contact", web::get().to(handlers::public_handlers::contact_page))
            .route("/book", web::get().to(handlers::booking_handlers::date_page)),
    )
    .await;

    for uri in ["/", "/contact", "/book"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert!(resp.status().is_success(), "{uri} should render");
    }
}

#[actix_web::test]
async fn test_book_page_renders_times_for_selected_date() {
    let dir = TempDir::new().expect("temp dir");
    let pool = test_pool(&dir);
    {
        let conn = pool.get().expect("pool connection");
        conn.execute(
            "INSERT INTO users (username, password, email, display_name, role) \
             VALUES ('casey', 'not-a-real-hash', 'casey@example.com', 'Casey Morgan', 'closer')",
            [],
        )
        .expect("seed closer");
        let closer_id = conn.last_insert_rowid();
        conn.execute(
            "INSERT INTO time_slots (closer_id, slot_date, slot_time, time_zone) \
             VALUES (?1, '2030-01-15', '10:00 AM', 'America/New_York')",
            [closer_id],
        )
        .expect("seed slot");
    }

    let app = test::init_service(
        App::new()
            .wrap(session_middleware())
            .app_data(web::Data::new(pool))
            .route("/book", web::get().to(handlers::booking_handlers::date_page)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/book?date=2030-01-15")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).expect("utf-8 body");
    assert!(html.contains("date-pill selected"), "chosen date should be highlighted");
    assert!(html.contains("10:00 AM"), "open time should be listed");
    assert!(html.contains("Eastern Time (ET)"), "friendly zone label should be shown");
}

#[actix_web::test]
async fn test_dashboard_redirects_anonymous_to_login() {
    let dir = TempDir::new().expect("temp dir");
    let pool = test_pool(&dir);

    let app = test::init_service(
        App::new()
            .wrap(session_middleware())
            .app_data(web::Data::new(pool))
            .route("/admin", web::get().to(handlers::dashboard::index)),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/admin").to_request()).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER);
    let location = resp
        .headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert_eq!(location, "/login");
}

#[actix_web::test]
async fn test_contact_post_without_csrf_is_refused() {
    let dir = TempDir::new().expect("temp dir");
    let pool = test_pool(&dir);

    let app = test::init_service(
        App::new()
            .wrap(session_middleware())
            .app_data(web::Data::new(pool))
            .route("/contact", web::post().to(handlers::public_handlers::contact_submit)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/contact")
        .set_form([
            ("name", "Avery"),
            ("email", "avery@example.com"),
            ("phone", ""),
            ("company", ""),
            ("message", "Hello"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
}
