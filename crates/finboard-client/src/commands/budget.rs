use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{load_month_view, load_setup, parse_month_arg};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::BudgetData;
use crate::ledger::budget::{BudgetStatus, evaluate};
use crate::ledger::store;

const COMMAND: &str = "budget";

#[derive(Debug, Default)]
pub struct BudgetOptions<'a> {
    pub month: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(month: Option<String>) -> ClientResult<SuccessEnvelope> {
    run_with_options(BudgetOptions {
        month,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: BudgetOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let requested = parse_month_arg(options.month.as_deref(), COMMAND)?;
    let setup = load_setup(options.home_override)?;
    let view = load_month_view(&setup, requested)?;

    let connection = setup.open()?;
    let goals = store::load_goals(&connection, &setup.db_path)?;
    let lines = evaluate(&view.month_rows, &goals);
    let exceeded = lines
        .iter()
        .filter(|line| line.status == BudgetStatus::Exceeded)
        .count();

    success(
        COMMAND,
        BudgetData {
            month: view.month,
            lines,
            exceeded,
        },
    )
}
