//! Month and category grouping over a ledger snapshot.
//!
//! Every function here is a fold over the slice it is given; none of them
//! reach back into storage.

use std::collections::{BTreeMap, BTreeSet};

use super::types::{Transaction, TransactionKind, YearMonth};

pub type MonthCategoryTotals = BTreeMap<(YearMonth, String), f64>;
pub type MonthTotals = BTreeMap<YearMonth, f64>;

pub fn aggregate_by_month_category(
    ledger: &[Transaction],
    kind_filter: Option<TransactionKind>,
) -> MonthCategoryTotals {
    let mut totals = MonthCategoryTotals::new();
    for transaction in matching(ledger, kind_filter) {
        *totals
            .entry((transaction.month(), transaction.category.clone()))
            .or_insert(0.0) += transaction.amount;
    }
    totals
}

pub fn monthly_totals(ledger: &[Transaction], kind: TransactionKind) -> MonthTotals {
    let mut totals = MonthTotals::new();
    for transaction in matching(ledger, Some(kind)) {
        *totals.entry(transaction.month()).or_insert(0.0) += transaction.amount;
    }
    totals
}

/// Per-category sums, regardless of month.
pub fn category_totals(ledger: &[Transaction], kind: TransactionKind) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for transaction in matching(ledger, Some(kind)) {
        *totals.entry(transaction.category.clone()).or_insert(0.0) += transaction.amount;
    }
    totals
}

pub fn kind_total(ledger: &[Transaction], kind: TransactionKind) -> f64 {
    matching(ledger, Some(kind)).map(|t| t.amount).sum()
}

/// Distinct months present in the ledger, most recent first.
pub fn available_months(ledger: &[Transaction]) -> Vec<YearMonth> {
    let months = ledger
        .iter()
        .map(Transaction::month)
        .collect::<BTreeSet<YearMonth>>();
    months.into_iter().rev().collect()
}

pub fn ledger_for_month(ledger: &[Transaction], month: YearMonth) -> Vec<Transaction> {
    ledger
        .iter()
        .filter(|transaction| transaction.month() == month)
        .cloned()
        .collect()
}

fn matching(
    ledger: &[Transaction],
    kind_filter: Option<TransactionKind>,
) -> impl Iterator<Item = &Transaction> {
    ledger
        .iter()
        .filter(move |transaction| kind_filter.is_none_or(|kind| transaction.kind == kind))
}

#[cfg(test)]
pub(crate) mod testkit {
    use chrono::NaiveDate;

    use crate::ledger::types::{Transaction, TransactionKind};

    pub(crate) fn txn(
        date: &str,
        category: &str,
        amount: f64,
        kind: TransactionKind,
    ) -> Transaction {
        Transaction {
            id: 0,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap_or_default(),
            category: category.to_string(),
            description: format!("{category} on {date}"),
            amount,
            kind,
        }
    }

    pub(crate) fn expense(date: &str, category: &str, amount: f64) -> Transaction {
        txn(date, category, amount, TransactionKind::Expense)
    }

    pub(crate) fn income(date: &str, amount: f64) -> Transaction {
        txn(date, "Income", amount, TransactionKind::Income)
    }
}
