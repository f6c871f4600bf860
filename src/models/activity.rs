use rusqlite::{Connection, params};

#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub actor: String,
    pub message: String,
    pub created_at: String,
}

/// Record a back-office action. Best effort: callers ignore the result, a
/// failed log line never fails the request.
pub fn log(conn: &Connection, actor: &str, message: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO activity_log (actor, message) VALUES (?1, ?2)",
        params![actor, message],
    )?;
    Ok(())
}

pub fn find_recent(conn: &Connection, limit: i64) -> rusqlite::Result<Vec<ActivityEntry>> {
    let mut stmt = conn.prepare(
        "SELECT actor, message, created_at FROM activity_log \
         ORDER BY id DESC LIMIT ?1",
    )?;
    let entries = stmt
        .query_map(params![limit], |row| {
            Ok(ActivityEntry {
                actor: row.get(0)?,
                message: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}
