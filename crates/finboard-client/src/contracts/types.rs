use serde::Serialize;

use crate::audit::AuditEntry;
use crate::currency::Conversion;
use crate::ledger::budget::BudgetLine;
use crate::ledger::date::format_iso_date;
use crate::ledger::forecast::{ForecastReport, TrendPoint};
use crate::ledger::types::{BudgetGoal, Category, Transaction, TransactionKind, YearMonth};

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
}

impl From<&Transaction> for TransactionRow {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id,
            date: format_iso_date(&transaction.date),
            category: transaction.category.clone(),
            description: transaction.description.clone(),
            amount: transaction.amount,
            kind: transaction.kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySource {
    Classifier,
    Explicit,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseAddData {
    pub total: f64,
    pub installments: u32,
    pub category: Category,
    pub category_source: CategorySource,
    pub rows: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IncomeAddData {
    pub row: TransactionRow,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_invalid: i64,
    pub inserted: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportIssue {
    pub row: i64,
    pub field: String,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportData {
    pub dry_run: bool,
    pub source: String,
    pub message: String,
    pub summary: ImportSummary,
    /// Columns the file carried that the importer does not read.
    pub ignored_columns: Vec<String>,
    pub rows: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthsData {
    pub months: Vec<YearMonth>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    /// `None` when the ledger is empty and no month was requested.
    pub month: Option<YearMonth>,
    pub income_total: f64,
    pub expense_total: f64,
    pub balance: f64,
    pub transaction_count: usize,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub rows: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchData {
    pub term: String,
    pub count: usize,
    pub total_amount: f64,
    pub rows: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalsData {
    pub goals: Vec<BudgetGoal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalsSetData {
    pub goals: Vec<BudgetGoal>,
    pub changed: Vec<Category>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetData {
    pub month: Option<YearMonth>,
    pub lines: Vec<BudgetLine>,
    pub exceeded: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastState {
    InsufficientData,
    Computed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastData {
    pub month: Option<YearMonth>,
    pub state: ForecastState,
    pub report: Option<ForecastReport>,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditData {
    pub entries: Vec<AuditEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCreateData {
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginData {
    pub username: String,
    pub recovery_mode: bool,
    pub audit_action: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConvertData {
    pub amount: f64,
    pub currency: String,
    pub target: String,
    pub conversion: Conversion,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyData {
    pub description: String,
    pub category: Category,
    /// Keyword that decided the category; `None` means the fallback applied.
    pub matched_keyword: Option<String>,
}
