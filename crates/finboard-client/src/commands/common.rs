use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::ledger::aggregate::{available_months, ledger_for_month};
use crate::ledger::date::parse_iso_date_strict;
use crate::ledger::store;
use crate::ledger::types::{Transaction, YearMonth};
use crate::setup::{SetupContext, ensure_initialized_with_home_override};
use crate::{ClientError, ClientResult};

pub const MAX_INSTALLMENTS: u32 = 12;

pub(crate) fn load_setup(home_override: Option<&Path>) -> ClientResult<SetupContext> {
    ensure_initialized_with_home_override(home_override)
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses an optional `YYYY-MM` argument.
pub(crate) fn parse_month_arg(
    value: Option<&str>,
    command: &str,
) -> ClientResult<Option<YearMonth>> {
    let Some(text) = value else {
        return Ok(None);
    };
    text.parse::<YearMonth>().map(Some).map_err(|detail| {
        ClientError::invalid_argument_for_command(&format!("`--month` {detail}."), Some(command))
    })
}

pub(crate) fn parse_date_arg(value: Option<&str>, command: &str) -> ClientResult<NaiveDate> {
    match value {
        Some(text) => parse_iso_date_strict(text.trim(), "--date", command),
        None => Ok(today()),
    }
}

/// Amounts are magnitudes; direction comes from the transaction kind.
pub(crate) fn validate_amount(amount: f64, field: &str, command: &str) -> ClientResult<f64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{field}` must be a finite number greater than or equal to 0."),
            Some(command),
        ));
    }
    Ok(amount)
}

pub(crate) fn require_text(value: &str, field: &str, command: &str) -> ClientResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{field}` must not be empty."),
            Some(command),
        ));
    }
    Ok(trimmed.to_string())
}

pub(crate) struct MonthView {
    pub(crate) month: Option<YearMonth>,
    pub(crate) ledger: Vec<Transaction>,
    pub(crate) month_rows: Vec<Transaction>,
}

/// Loads the ledger and narrows it to the requested month, or to the most
/// recent month on record when none was requested.
pub(crate) fn load_month_view(
    setup: &SetupContext,
    requested: Option<YearMonth>,
) -> ClientResult<MonthView> {
    let connection = setup.open()?;
    let ledger = store::load_ledger(&connection, &setup.db_path)?;
    let month = requested.or_else(|| available_months(&ledger).first().copied());
    let month_rows = month
        .map(|value| ledger_for_month(&ledger, value))
        .unwrap_or_default();

    Ok(MonthView {
        month,
        ledger,
        month_rows,
    })
}
