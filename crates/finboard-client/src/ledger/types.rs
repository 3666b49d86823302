use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// Category label carried by income entries. It never matches a budget goal.
pub const INCOME_CATEGORY: &str = "Income";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// Accepts the canonical labels in any case, plus the legacy
    /// `Receita`/`Despesa` labels found in older exports.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "receita" => Some(Self::Income),
            "expense" | "despesa" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed expense category set, in display and goal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Food,
    Transport,
    Leisure,
    Education,
    Hardware,
    FixedBills,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Self::Food,
        Self::Transport,
        Self::Leisure,
        Self::Education,
        Self::Hardware,
        Self::FixedBills,
        Self::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Leisure => "Leisure",
            Self::Education => "Education",
            Self::Hardware => "Hardware",
            Self::FixedBills => "Fixed Bills",
            Self::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value
            .trim()
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| normalized == category.as_str().replace(' ', "").to_ascii_lowercase())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// What the user picked at entry time. `Auto` defers to the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryChoice {
    Auto,
    Fixed(Category),
}

impl CategoryChoice {
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case("auto") {
            return Some(Self::Auto);
        }
        Category::parse(value).map(Self::Fixed)
    }

    pub fn resolve(self, description: &str) -> Category {
        match self {
            Self::Auto => super::classify::classify(description),
            Self::Fixed(category) => category,
        }
    }
}

/// Calendar year-month bucket. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            return Some(Self { year, month });
        }
        None
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> u32 {
        self.month
    }

    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || "month must use YYYY-MM format".to_string();
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(|| "month must be between 01 and 12".to_string())
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A persisted ledger entry. `amount` is never negative; `kind` carries the
/// direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }
}

/// A transaction that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetGoal {
    pub category: Category,
    /// `0.0` disables tracking for the category.
    pub limit: f64,
}
