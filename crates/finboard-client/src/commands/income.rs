use std::path::Path;

use crate::commands::common::{load_setup, parse_date_arg, require_text, validate_amount};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{IncomeAddData, TransactionRow};
use crate::ledger::store;
use crate::ledger::types::{INCOME_CATEGORY, TransactionDraft, TransactionKind};
use crate::{ClientError, ClientResult};

const COMMAND: &str = "income add";

#[derive(Debug, Default)]
pub struct IncomeAddOptions<'a> {
    /// Where the money came from; stored as the description.
    pub source: String,
    pub amount: f64,
    pub date: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn add(source: String, amount: f64, date: Option<String>) -> ClientResult<SuccessEnvelope> {
    add_with_options(IncomeAddOptions {
        source,
        amount,
        date,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn add_with_options(options: IncomeAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let description = require_text(&options.source, "source", COMMAND)?;
    let amount = validate_amount(options.amount, "amount", COMMAND)?;
    let date = parse_date_arg(options.date.as_deref(), COMMAND)?;

    let draft = TransactionDraft {
        date,
        category: INCOME_CATEGORY.to_string(),
        description,
        amount,
        kind: TransactionKind::Income,
    };

    let setup = load_setup(options.home_override)?;
    let mut connection = setup.open()?;
    let stored = store::insert_drafts(&mut connection, &setup.db_path, &[draft])?;

    let row = stored.first().map(TransactionRow::from).ok_or_else(|| {
        ClientError::ledger_init_failed(&setup.db_path, "Income row was not stored.")
    })?;
    success(COMMAND, IncomeAddData { row })
}
