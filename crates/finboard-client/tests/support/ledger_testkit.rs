use std::fs;
use std::path::{Path, PathBuf};

use finboard_client::commands::expense::{self, ExpenseAddOptions};
use finboard_client::commands::income::{self, IncomeAddOptions};
use finboard_client::{ClientResult, SuccessEnvelope};
use rusqlite::Connection;
use serde_json::Value;
use tempfile::{Builder, TempDir};

/// Low bcrypt cost keeps account tests fast.
pub const TEST_CONFIG: &str = "[auth]\nhash_cost = 4\n";

pub fn temp_home(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    temp_home_with_config(prefix, TEST_CONFIG)
}

pub fn temp_home_with_config(prefix: &str, config: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir()?;
    let home = dir.path().join("finboard-home");
    fs::create_dir_all(&home)?;
    fs::write(home.join("config.toml"), config)?;
    Ok((dir, home))
}

pub fn data_of(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok(), "command failed: {:?}", result.as_ref().err());
    result.map(|envelope| envelope.data).unwrap_or_default()
}

pub fn error_code_of(result: ClientResult<SuccessEnvelope>) -> String {
    assert!(result.is_err());
    result.err().map(|error| error.code).unwrap_or_default()
}

pub fn add_expense(
    home: &Path,
    description: &str,
    amount: f64,
    category: Option<&str>,
    installments: Option<u32>,
    date: &str,
) -> Value {
    data_of(expense::add_with_options(ExpenseAddOptions {
        description: description.to_string(),
        amount,
        category: category.map(str::to_string),
        installments,
        date: Some(date.to_string()),
        home_override: Some(home),
    }))
}

pub fn add_income(home: &Path, source: &str, amount: f64, date: &str) -> Value {
    data_of(income::add_with_options(IncomeAddOptions {
        source: source.to_string(),
        amount,
        date: Some(date.to_string()),
        home_override: Some(home),
    }))
}

pub fn db_path(home: &Path) -> PathBuf {
    home.join("ledger.db")
}

pub fn query_count(home: &Path, sql: &str) -> i64 {
    let connection = Connection::open(db_path(home));
    assert!(connection.is_ok());
    connection
        .ok()
        .and_then(|conn| conn.query_row(sql, [], |row| row.get::<_, i64>(0)).ok())
        .unwrap_or(-1)
}

pub fn approx(value: &Value, expected: f64) -> bool {
    value
        .as_f64()
        .map(|actual| (actual - expected).abs() < 1e-9)
        .unwrap_or(false)
}
