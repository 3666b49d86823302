use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{load_month_view, load_setup, parse_month_arg};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ForecastData, ForecastState};
use crate::ledger::aggregate::kind_total;
use crate::ledger::forecast::{Forecast, forecast, trend};
use crate::ledger::types::TransactionKind;

const COMMAND: &str = "forecast";

#[derive(Debug, Default)]
pub struct ForecastOptions<'a> {
    pub month: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(month: Option<String>) -> ClientResult<SuccessEnvelope> {
    run_with_options(ForecastOptions {
        month,
        home_override: None,
    })
}

/// Compares the selected month's spending with the mean over every month on
/// record.
#[doc(hidden)]
pub fn run_with_options(options: ForecastOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let requested = parse_month_arg(options.month.as_deref(), COMMAND)?;
    let setup = load_setup(options.home_override)?;
    let view = load_month_view(&setup, requested)?;

    let result = match view.month {
        Some(_) => forecast(
            &view.ledger,
            kind_total(&view.month_rows, TransactionKind::Expense),
        ),
        None => Forecast::InsufficientData,
    };

    let (state, report) = match result {
        Forecast::InsufficientData => (ForecastState::InsufficientData, None),
        Forecast::Computed(report) => (ForecastState::Computed, Some(report)),
    };

    success(
        COMMAND,
        ForecastData {
            month: view.month,
            state,
            report,
            trend: trend(&view.ledger),
        },
    )
}
