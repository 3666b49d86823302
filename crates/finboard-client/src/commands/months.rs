use std::path::Path;

use crate::ClientResult;
use crate::commands::common::load_setup;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::MonthsData;
use crate::ledger::aggregate::available_months;
use crate::ledger::store;

#[derive(Debug, Default)]
pub struct MonthsOptions<'a> {
    pub home_override: Option<&'a Path>,
}

pub fn run() -> ClientResult<SuccessEnvelope> {
    run_with_options(MonthsOptions::default())
}

#[doc(hidden)]
pub fn run_with_options(options: MonthsOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let setup = load_setup(options.home_override)?;
    let connection = setup.open()?;
    let ledger = store::load_ledger(&connection, &setup.db_path)?;
    success(
        "months",
        MonthsData {
            months: available_months(&ledger),
        },
    )
}
