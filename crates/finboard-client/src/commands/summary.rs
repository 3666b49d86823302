use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{load_month_view, load_setup, parse_month_arg};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CategoryTotal, SummaryData, TransactionRow};
use crate::ledger::aggregate::{category_totals, kind_total};
use crate::ledger::types::TransactionKind;

const COMMAND: &str = "summary";

#[derive(Debug, Default)]
pub struct SummaryOptions<'a> {
    /// `YYYY-MM`. Defaults to the most recent month on record.
    pub month: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(month: Option<String>) -> ClientResult<SuccessEnvelope> {
    run_with_options(SummaryOptions {
        month,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: SummaryOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let requested = parse_month_arg(options.month.as_deref(), COMMAND)?;
    let setup = load_setup(options.home_override)?;
    let view = load_month_view(&setup, requested)?;

    let income_total = kind_total(&view.month_rows, TransactionKind::Income);
    let expense_total = kind_total(&view.month_rows, TransactionKind::Expense);

    let mut expenses_by_category = category_totals(&view.month_rows, TransactionKind::Expense)
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect::<Vec<_>>();
    expenses_by_category.sort_by(|left, right| right.total.total_cmp(&left.total));

    let mut rows = view
        .month_rows
        .iter()
        .map(TransactionRow::from)
        .collect::<Vec<_>>();
    rows.reverse();

    success(
        COMMAND,
        SummaryData {
            month: view.month,
            income_total,
            expense_total,
            balance: income_total - expense_total,
            transaction_count: view.month_rows.len(),
            expenses_by_category,
            rows,
        },
    )
}
