use std::num::NonZeroU32;

use chrono::NaiveDate;

use super::date::add_months_clamped;
use super::types::{Category, TransactionDraft, TransactionKind};

/// Splits one purchase into `count` monthly expense drafts.
///
/// Each share is `total / count`; no remainder is redistributed, so the shares
/// may sum to `total` only within floating-point epsilon. Draft `i` is dated
/// `start + i` calendar months and, when `count > 1`, its description gets an
/// `(i/count)` suffix.
pub fn expand(
    total: f64,
    count: NonZeroU32,
    start: NaiveDate,
    description: &str,
    category: Category,
) -> Vec<TransactionDraft> {
    let count = count.get();
    let share = total / f64::from(count);

    (0..count)
        .map(|index| TransactionDraft {
            date: add_months_clamped(start, index),
            category: category.as_str().to_string(),
            description: if count == 1 {
                description.to_string()
            } else {
                format!("{description} ({}/{count})", index + 1)
            },
            amount: share,
            kind: TransactionKind::Expense,
        })
        .collect()
}
