use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{load_setup, require_text};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{SearchData, TransactionRow};
use crate::ledger::store;

#[derive(Debug, Default)]
pub struct SearchOptions<'a> {
    pub term: String,
    pub home_override: Option<&'a Path>,
}

pub fn run(term: String) -> ClientResult<SuccessEnvelope> {
    run_with_options(SearchOptions {
        term,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: SearchOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let term = require_text(&options.term, "term", "search")?;
    let setup = load_setup(options.home_override)?;
    let connection = setup.open()?;
    let matches = store::search(&connection, &setup.db_path, &term)?;

    success(
        "search",
        SearchData {
            count: matches.len(),
            total_amount: matches.iter().map(|row| row.amount).sum(),
            rows: matches.iter().map(TransactionRow::from).collect(),
            term,
        },
    )
}
