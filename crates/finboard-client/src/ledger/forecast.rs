//! Spending forecast: the current month against the historical monthly mean.
//!
//! The mean covers every calendar month from the first to the last expense,
//! including the month being evaluated. Months inside that span with no
//! expenses count as zero.

use serde::Serialize;

use super::aggregate::monthly_totals;
use super::types::{Transaction, TransactionKind, YearMonth};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastStatus {
    AboveAverage,
    BelowAverage,
}

impl ForecastStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AboveAverage => "above_average",
            Self::BelowAverage => "below_average",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub historical_mean: f64,
    pub current_month_spend: f64,
    pub status: ForecastStatus,
    /// Absolute distance between the current spend and the mean.
    pub delta: f64,
    /// How far below the mean, in percent. Only set for `BelowAverage`.
    pub delta_percentage: Option<f64>,
    pub months_considered: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Forecast {
    InsufficientData,
    Computed(ForecastReport),
}

impl Forecast {
    pub fn report(&self) -> Option<&ForecastReport> {
        match self {
            Self::InsufficientData => None,
            Self::Computed(report) => Some(report),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: YearMonth,
    pub total: f64,
}

pub fn forecast(expense_ledger: &[Transaction], current_month_spend: f64) -> Forecast {
    let totals = monthly_totals(expense_ledger, TransactionKind::Expense);
    let (Some(&first), Some(&last)) = (totals.keys().next(), totals.keys().next_back()) else {
        return Forecast::InsufficientData;
    };

    let months_considered = month_span(first, last);
    let historical_mean = totals.values().sum::<f64>() / months_considered as f64;
    let delta = (current_month_spend - historical_mean).abs();

    let (status, delta_percentage) = if current_month_spend > historical_mean {
        (ForecastStatus::AboveAverage, None)
    } else if historical_mean > 0.0 {
        (ForecastStatus::BelowAverage, Some(delta / historical_mean * 100.0))
    } else {
        (ForecastStatus::BelowAverage, Some(0.0))
    };

    Forecast::Computed(ForecastReport {
        historical_mean,
        current_month_spend,
        status,
        delta,
        delta_percentage,
        months_considered,
    })
}

/// Number of calendar months from `first` to `last`, both included.
fn month_span(first: YearMonth, last: YearMonth) -> usize {
    let mut count = 1;
    let mut cursor = first;
    while cursor < last {
        cursor = cursor.next();
        count += 1;
    }
    count
}

/// Monthly expense totals in chronological order.
pub fn trend(ledger: &[Transaction]) -> Vec<TrendPoint> {
    monthly_totals(ledger, TransactionKind::Expense)
        .into_iter()
        .map(|(month, total)| TrendPoint { month, total })
        .collect()
}
