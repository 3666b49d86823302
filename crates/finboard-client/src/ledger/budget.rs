use serde::Serialize;

use super::aggregate::category_totals;
use super::types::{BudgetGoal, Category, Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Exceeded,
}

impl BudgetStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::Exceeded => "exceeded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetLine {
    pub category: Category,
    pub spent: f64,
    pub limit: f64,
    /// Progress in `[0, 1]`. Over-budget lines saturate at `1.0`; the raw
    /// `spent`/`limit` pair keeps the true magnitude.
    pub percentage: f64,
    pub status: BudgetStatus,
}

/// Compares one month's expenses against the configured goals.
///
/// Goals with a zero limit are skipped before any division happens.
pub fn evaluate(ledger_for_month: &[Transaction], goals: &[BudgetGoal]) -> Vec<BudgetLine> {
    let spent_by_category = category_totals(ledger_for_month, TransactionKind::Expense);

    goals
        .iter()
        .filter(|goal| goal.limit > 0.0)
        .map(|goal| {
            let spent = spent_by_category
                .get(goal.category.as_str())
                .copied()
                .unwrap_or(0.0);
            let status = if spent > goal.limit {
                BudgetStatus::Exceeded
            } else {
                BudgetStatus::OnTrack
            };
            BudgetLine {
                category: goal.category,
                spent,
                limit: goal.limit,
                percentage: (spent / goal.limit).min(1.0),
                status,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{BudgetStatus, evaluate};
    use crate::ledger::aggregate::testkit::{expense, income};
    use crate::ledger::types::{BudgetGoal, Category};

    fn goal(category: Category, limit: f64) -> BudgetGoal {
        BudgetGoal { category, limit }
    }

    #[test]
    fn exceeded_goal_reports_clamped_percentage_and_raw_values() {
        let ledger = vec![
            expense("2024-05-02", "Food", 350.0),
            expense("2024-05-20", "Food", 250.0),
        ];
        let lines = evaluate(&ledger, &[goal(Category::Food, 500.0)]);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].status, BudgetStatus::Exceeded);
        assert_eq!(lines[0].percentage, 1.0);
        assert_eq!(lines[0].spent, 600.0);
        assert_eq!(lines[0].limit, 500.0);
    }

    #[test]
    fn zero_limits_are_excluded() {
        let ledger = vec![expense("2024-05-02", "Transport", 80.0)];
        let lines = evaluate(
            &ledger,
            &[goal(Category::Food, 0.0), goal(Category::Transport, 100.0)],
        );

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].category, Category::Transport);
        assert_eq!(lines[0].status, BudgetStatus::OnTrack);
        assert!((lines[0].percentage - 0.8).abs() < 1e-9);
    }

    #[test]
    fn spending_equal_to_limit_is_on_track() {
        let ledger = vec![expense("2024-05-02", "Leisure", 50.0)];
        let lines = evaluate(&ledger, &[goal(Category::Leisure, 50.0)]);
        assert_eq!(lines[0].status, BudgetStatus::OnTrack);
        assert_eq!(lines[0].percentage, 1.0);
    }

    #[test]
    fn income_and_other_categories_do_not_count() {
        let ledger = vec![
            income("2024-05-01", 3000.0),
            expense("2024-05-03", "Receita", 10.0),
            expense("2024-05-04", "Hardware", 40.0),
        ];
        let lines = evaluate(
            &ledger,
            &[goal(Category::Hardware, 200.0), goal(Category::Education, 100.0)],
        );

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spent, 40.0);
        assert_eq!(lines[1].category, Category::Education);
        assert_eq!(lines[1].spent, 0.0);
        assert_eq!(lines[1].percentage, 0.0);
    }

    #[test]
    fn percentage_stays_within_unit_interval() {
        for spent in [0.0, 1.0, 99.99, 100.0, 100.01, 10_000.0] {
            let ledger = vec![expense("2024-05-02", "Other", spent)];
            let lines = evaluate(&ledger, &[goal(Category::Other, 100.0)]);
            let line = &lines[0];
            assert!((0.0..=1.0).contains(&line.percentage));
            assert_eq!(line.status == BudgetStatus::Exceeded, spent > 100.0);
        }
    }
}
