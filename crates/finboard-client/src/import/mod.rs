pub(crate) mod input;
pub(crate) mod parse;
pub(crate) mod validate;

use chrono::NaiveDate;
use tracing::info;

use crate::contracts::types::{ImportData, TransactionRow};
use crate::error::IMPORT_HELP_COMMAND;
use crate::ledger::store;
use crate::setup::SetupContext;
use crate::{ClientError, ClientResult};

pub(crate) fn execute(
    setup: &SetupContext,
    path: &str,
    dry_run: bool,
    stdin_override: Option<String>,
    today: NaiveDate,
) -> ClientResult<ImportData> {
    let source = input::resolve_source(path, stdin_override)?;
    let parsed = parse::parse_source(&source.content)?;
    let validated = validate::validate_rows(parsed.rows, today)?;
    let mut summary = validated.summary;

    if dry_run {
        return Ok(ImportData {
            dry_run: true,
            source: source.kind.label(),
            message: format!(
                "Validation passed for {} rows. No rows were written.",
                summary.rows_valid
            ),
            summary,
            ignored_columns: parsed.ignored_columns,
            rows: Vec::new(),
        });
    }

    let mut connection = setup.open()?;
    let stored = store::insert_drafts(&mut connection, &setup.db_path, &validated.drafts)?;
    summary.inserted = stored.len() as i64;
    info!(source = %source.kind.label(), inserted = summary.inserted, "import committed");

    Ok(ImportData {
        dry_run: false,
        source: source.kind.label(),
        message: format!("{} rows imported.", summary.inserted),
        summary,
        ignored_columns: parsed.ignored_columns,
        rows: stored.iter().map(TransactionRow::from).collect(),
    })
}

pub(crate) fn invalid_input_error(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            "Provide CSV input via a file path, or `-` with piped stdin.".to_string(),
            format!("Run `{IMPORT_HELP_COMMAND}` to review the expected columns."),
        ],
    )
}
