use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, params};

pub type DbPool = Pool<SqliteConnectionManager>;

pub const MIGRATIONS: &str = include_str!("schema.sql");

pub fn init_pool(database_url: &str) -> DbPool {
    let manager = SqliteConnectionManager::file(database_url).with_init(|conn| {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Ok(())
    });
    Pool::builder()
        .max_size(8)
        .build(manager)
        .expect("Failed to create DB pool")
}

pub fn run_migrations(pool: &DbPool) {
    let conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");
    log::info!("Database migrations complete");
}

const DEFAULT_SETTINGS: &[(&str, &str, &str, &str, &str, i64)] = &[
    ("site.name", "Site name", "Brightline Media", "Shown in the header and page titles", "text", 10),
    ("site.tagline", "Tagline", "Performance marketing that pays for itself", "Hero line on the home page", "text", 20),
    ("contact.email", "Contact email", "hello@brightline.example", "Shown on the contact page", "text", 30),
    ("contact.phone", "Contact phone", "+1 (555) 010-4477", "Shown on the contact page", "text", 40),
    ("booking.intro", "Booking intro", "Pick a time that works for you and one of our closers will walk you through a growth plan.", "Copy above the booking calendar", "text", 50),
];

/// Seed the default settings and the initial admin account. Idempotent:
/// skips anything that already exists.
pub fn seed(pool: &DbPool, admin_password_hash: &str) {
    let conn = pool.get().expect("Failed to get DB connection for seeding");

    for (name, label, value, description, setting_type, sort_order) in DEFAULT_SETTINGS {
        conn.execute(
            "INSERT INTO settings (name, label, value, description, setting_type, sort_order) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
             ON CONFLICT(name) DO NOTHING",
            params![name, label, value, description, setting_type, sort_order],
        )
        .expect("Failed to seed settings");
    }

    let user_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .unwrap_or(0);
    if user_count > 0 {
        log::info!("Users already present ({user_count}), skipping admin seed");
        return;
    }

    conn.execute(
        "INSERT INTO users (username, password, email, display_name, role) \
         VALUES ('admin', ?1, 'admin@brightline.example', 'Administrator', 'admin')",
        params![admin_password_hash],
    )
    .expect("Failed to seed admin user");
    log::info!("Seeded initial admin user");
}

/// Seed demo data on top of the base seed: a closer with a week of open
/// slots and a couple of published testimonials.
pub fn seed_demo(pool: &DbPool, closer_password_hash: &str) {
    let conn = pool.get().expect("Failed to get DB connection for demo seed");

    let has_demo: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM users WHERE username = 'jordan'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);
    if has_demo {
        log::info!("Demo data already present, skipping");
        return;
    }

    conn.execute(
        "INSERT INTO users (username, password, email, display_name, role) \
         VALUES ('jordan', ?1, 'jordan@brightline.example', 'Jordan Reyes', 'closer')",
        params![closer_password_hash],
    )
    .expect("Failed to seed demo closer");
    let closer_id = conn.last_insert_rowid();

    let today = chrono::Local::now().date_naive();
    for day in 1..=5i64 {
        let date = (today + chrono::Duration::days(day)).format("%Y-%m-%d").to_string();
        for time in ["10:00 AM", "1:00 PM", "3:30 PM"] {
            seed_slot(&conn, closer_id, &date, time);
        }
    }

    let testimonials = [
        ("Maya Lindqvist", "Fernhill Outdoor Co.", "Brightline doubled our return on ad spend in a quarter. The weekly reporting alone is worth it.", 5),
        ("Tomas Oduya", "Archway Legal", "We went from word-of-mouth only to a predictable pipeline of qualified calls.", 5),
    ];
    for (i, (client_name, company, quote, rating)) in testimonials.iter().enumerate() {
        conn.execute(
            "INSERT INTO testimonials (client_name, company, quote, rating, is_published, sort_order) \
             VALUES (?1, ?2, ?3, ?4, 1, ?5)",
            params![client_name, company, quote, rating, (i as i64 + 1) * 10],
        )
        .expect("Failed to seed testimonial");
    }

    log::info!("Demo seed complete");
}

fn seed_slot(conn: &Connection, closer_id: i64, date: &str, time: &str) {
    conn.execute(
        "INSERT INTO time_slots (closer_id, slot_date, slot_time, time_zone) \
         VALUES (?1, ?2, ?3, 'America/New_York') \
         ON CONFLICT(closer_id, slot_date, slot_time) DO NOTHING",
        params![closer_id, date, time],
    )
    .expect("Failed to seed time slot");
}
