use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::auth::{SqliteCredentialStore, seed_admin};
use crate::config::{self, Config};
use crate::ledger::types::Category;
use crate::migrations::{EXPECTED_USER_VERSION, REQUIRED_META_KEYS, run_pending};
use crate::state::{
    ensure_home_directory, ledger_db_path, map_sqlite_error, open_connection, resolve_home,
};
use crate::{ClientError, ClientResult};

const REQUIRED_CORE_TABLES: [(&str, &[&str]); 5] = [
    ("internal_meta", &["key", "value"]),
    (
        "transactions",
        &["id", "date", "category", "description", "amount", "kind"],
    ),
    ("goals", &["category", "limit_amount"]),
    ("audit_log", &["id", "timestamp", "action", "username"]),
    ("users", &["id", "username", "password_hash", "created_at"]),
];

#[derive(Debug, Clone)]
pub struct SetupContext {
    pub home: PathBuf,
    pub db_path: PathBuf,
    pub schema_version: String,
    pub config: Config,
}

impl SetupContext {
    pub fn open(&self) -> ClientResult<Connection> {
        open_connection(&self.db_path)
    }
}

pub fn ensure_initialized() -> ClientResult<SetupContext> {
    ensure_initialized_with_home_override(None)
}

pub fn ensure_initialized_at(home_override: &Path) -> ClientResult<SetupContext> {
    ensure_initialized_with_home_override(Some(home_override))
}

pub(crate) fn ensure_initialized_with_home_override(
    home_override: Option<&Path>,
) -> ClientResult<SetupContext> {
    let home = resolve_home(home_override)?;
    ensure_home_directory(&home)?;
    let config = config::load(&home)?;

    let db_path = ledger_db_path(&home);
    let mut connection = open_connection(&db_path)?;

    run_pending(&mut connection).map_err(|error| map_migration_error(&db_path, &error))?;

    verify_core_tables(&connection, &db_path)?;
    repair_seed_rows(&connection, &db_path)?;
    verify_schema_markers(&connection, &db_path)?;

    let store = SqliteCredentialStore::new(&connection, &db_path, config.auth.hash_cost);
    seed_admin(&store, &config.auth.recovery_password)?;

    let schema_version = read_schema_version(&connection, &db_path)?;
    debug!(db_path = %db_path.display(), %schema_version, "ledger ready");

    Ok(SetupContext {
        home,
        db_path,
        schema_version,
        config,
    })
}

fn map_migration_error(db_path: &Path, error: &rusqlite_migration::Error) -> ClientError {
    match error {
        rusqlite_migration::Error::RusqliteError { query: _, err } => {
            let mapped = map_sqlite_error(db_path, err);
            if matches!(
                mapped.code.as_str(),
                "ledger_locked" | "ledger_corrupt" | "ledger_init_permission_denied"
            ) {
                mapped
            } else {
                ClientError::migration_failed(db_path, &error.to_string())
            }
        }
        _ => ClientError::migration_failed(db_path, &error.to_string()),
    }
}

fn verify_core_tables(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    for (table_name, required_columns) in REQUIRED_CORE_TABLES {
        let columns = table_columns(connection, table_name, db_path)?;
        if columns.is_empty() {
            return Err(ClientError::ledger_corrupt(db_path));
        }
        for required_column in required_columns {
            if !columns.iter().any(|column| column == required_column) {
                return Err(ClientError::ledger_corrupt(db_path));
            }
        }
    }

    Ok(())
}

/// Restores rows other commands rely on: required meta keys and one goal
/// row per category. Existing values are left alone.
fn repair_seed_rows(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    for (meta_key, default_value) in REQUIRED_META_KEYS {
        connection
            .execute(
                "INSERT OR IGNORE INTO internal_meta (key, value) VALUES (?1, ?2)",
                params![meta_key, default_value],
            )
            .map_err(|error| map_sqlite_error(db_path, &error))?;
    }

    for category in Category::ALL {
        connection
            .execute(
                "INSERT OR IGNORE INTO goals (category, limit_amount) VALUES (?1, 0)",
                [category.as_str()],
            )
            .map_err(|error| map_sqlite_error(db_path, &error))?;
    }

    Ok(())
}

fn verify_schema_markers(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    let user_version = connection
        .query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    if user_version != EXPECTED_USER_VERSION {
        return Err(ClientError::ledger_corrupt(db_path));
    }

    for (meta_key, expected_value) in REQUIRED_META_KEYS {
        let value = connection
            .query_row(
                "SELECT value FROM internal_meta WHERE key = ?1 LIMIT 1",
                [meta_key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|error| map_sqlite_error(db_path, &error))?;

        if value.as_deref() != Some(expected_value) {
            return Err(ClientError::ledger_corrupt(db_path));
        }
    }

    Ok(())
}

fn table_columns(
    connection: &Connection,
    table_name: &str,
    db_path: &Path,
) -> ClientResult<Vec<String>> {
    if !REQUIRED_CORE_TABLES
        .iter()
        .any(|(required_name, _)| *required_name == table_name)
    {
        return Err(ClientError::ledger_init_failed(
            db_path,
            "Refused PRAGMA table inspection for non-core table.",
        ));
    }

    // `table_name` comes from REQUIRED_CORE_TABLES only.
    let sql = format!("PRAGMA table_info({table_name})");
    let mut statement = connection
        .prepare(&sql)
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    let column_iter = statement
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut columns = Vec::new();
    for row in column_iter {
        columns.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }
    Ok(columns)
}

fn read_schema_version(connection: &Connection, db_path: &Path) -> ClientResult<String> {
    let value = connection
        .query_row(
            "SELECT value FROM internal_meta WHERE key = 'schema_version' LIMIT 1",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    Ok(value.unwrap_or_else(|| "v1".to_string()))
}
