//! Append-only audit trail of account events.

use std::path::Path;

use chrono::Local;
use rusqlite::{Connection, params};
use serde::Serialize;
use tracing::debug;

use crate::ClientResult;
use crate::state::map_sqlite_error;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub const ACTION_LOGIN: &str = "Login";
pub const ACTION_RECOVERY_LOGIN: &str = "Login (recovery mode)";
pub const ACTION_USER_CREATED: &str = "User Created";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: String,
    pub action: String,
    pub username: String,
}

pub fn append(
    connection: &Connection,
    db_path: &Path,
    action: &str,
    username: &str,
) -> ClientResult<()> {
    let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    connection
        .execute(
            "INSERT INTO audit_log (timestamp, action, username) VALUES (?1, ?2, ?3)",
            params![timestamp, action, username],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    debug!(action, username, "appended audit entry");
    Ok(())
}

/// Most recent first. Entries written within the same minute keep insertion
/// order through the id tiebreak.
pub fn list(connection: &Connection, db_path: &Path) -> ClientResult<Vec<AuditEntry>> {
    let mut statement = connection
        .prepare(
            "SELECT id, timestamp, action, username
             FROM audit_log
             ORDER BY timestamp DESC, id DESC",
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    let rows_iter = statement
        .query_map([], |row| {
            Ok(AuditEntry {
                id: row.get(0)?,
                timestamp: row.get(1)?,
                action: row.get(2)?,
                username: row.get(3)?,
            })
        })
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut entries = Vec::new();
    for row in rows_iter {
        entries.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::NaiveDateTime;
    use rusqlite::Connection;

    use super::{ACTION_LOGIN, ACTION_USER_CREATED, TIMESTAMP_FORMAT, append, list};
    use crate::migrations::run_pending;

    #[test]
    fn entries_list_most_recent_first_with_minute_timestamps() {
        let connection = Connection::open_in_memory();
        assert!(connection.is_ok());
        if let Ok(mut conn) = connection {
            assert!(run_pending(&mut conn).is_ok());
            let path = Path::new(":memory:");
            assert!(append(&conn, path, ACTION_USER_CREATED, "ana").is_ok());
            assert!(append(&conn, path, ACTION_LOGIN, "ana").is_ok());

            let entries = list(&conn, path);
            assert!(entries.is_ok());
            if let Ok(rows) = entries {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].action, ACTION_LOGIN);
                assert_eq!(rows[1].action, ACTION_USER_CREATED);
                assert!(
                    NaiveDateTime::parse_from_str(&rows[0].timestamp, TIMESTAMP_FORMAT).is_ok()
                );
            }
        }
    }
}
