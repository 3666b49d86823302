use chrono::NaiveDate;

use crate::contracts::types::{ImportIssue, ImportSummary};
use crate::import::parse::{Field, ParsedRow};
use crate::ledger::date::parse_stored_date;
use crate::ledger::types::{
    Category, CategoryChoice, INCOME_CATEGORY, TransactionDraft, TransactionKind,
};
use crate::{ClientError, ClientResult};

pub(crate) const DEFAULT_DESCRIPTION: &str = "Imported CSV";

/// Category labels used by older exports of the ledger.
const LEGACY_CATEGORY_LABELS: [(&str, Category); 11] = [
    ("alimentação", Category::Food),
    ("alimentacao", Category::Food),
    ("transporte", Category::Transport),
    ("lazer", Category::Leisure),
    ("educação", Category::Education),
    ("educacao", Category::Education),
    ("contas fixas", Category::FixedBills),
    ("outros", Category::Other),
    ("fixed bills", Category::FixedBills),
    ("bills", Category::FixedBills),
    ("others", Category::Other),
];

#[derive(Debug, Clone)]
pub(crate) struct ValidatedRows {
    pub(crate) drafts: Vec<TransactionDraft>,
    pub(crate) summary: ImportSummary,
}

/// Applies column defaults and checks every row. A single bad row fails the
/// whole batch; the error lists every issue found.
pub(crate) fn validate_rows(
    parsed_rows: Vec<ParsedRow>,
    today: NaiveDate,
) -> ClientResult<ValidatedRows> {
    let rows_read = parsed_rows.len() as i64;
    let mut drafts = Vec::new();
    let mut issues = Vec::new();
    let mut rows_invalid = 0_i64;

    for raw in parsed_rows {
        let mut row_issues = Vec::new();

        let kind = validate_kind(raw.row, raw.kind, &mut row_issues);
        let amount = validate_amount(raw.row, raw.amount, &mut row_issues);
        let date = validate_date(raw.row, raw.date, today, &mut row_issues);
        let description = non_blank(raw.description).unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
        let category = validate_category(
            raw.row,
            raw.category,
            kind.unwrap_or(TransactionKind::Expense),
            &description,
            &mut row_issues,
        );

        match (kind, amount, date, category) {
            (Some(kind), Some(amount), Some(date), Some(category)) if row_issues.is_empty() => {
                drafts.push(TransactionDraft {
                    date,
                    category,
                    description,
                    amount,
                    kind,
                });
            }
            _ => {
                rows_invalid += 1;
                issues.extend(row_issues);
            }
        }
    }

    let summary = ImportSummary {
        rows_read,
        rows_valid: drafts.len() as i64,
        rows_invalid,
        inserted: 0,
    };

    if !issues.is_empty() {
        return Err(ClientError::import_validation_failed(summary, issues));
    }

    Ok(ValidatedRows { drafts, summary })
}

fn validate_kind(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<ImportIssue>,
) -> Option<TransactionKind> {
    let Some(text) = non_blank(value) else {
        return Some(TransactionKind::Expense);
    };
    let parsed = TransactionKind::parse(&text);
    if parsed.is_none() {
        issues.push(issue(
            row,
            Field::Kind,
            "invalid_kind",
            "Kind must be Income or Expense.",
            Some(text),
        ));
    }
    parsed
}

fn validate_amount(row: i64, value: Option<String>, issues: &mut Vec<ImportIssue>) -> Option<f64> {
    let Some(text) = non_blank(value) else {
        return Some(0.0);
    };
    match parse_amount(&text) {
        Some(amount) if amount >= 0.0 => Some(amount),
        Some(_) => {
            issues.push(issue(
                row,
                Field::Amount,
                "negative_amount",
                "Amount must not be negative; use Kind to mark income.",
                Some(text),
            ));
            None
        }
        None => {
            issues.push(issue(
                row,
                Field::Amount,
                "invalid_amount",
                "Amount must be a decimal number.",
                Some(text),
            ));
            None
        }
    }
}

fn validate_date(
    row: i64,
    value: Option<String>,
    today: NaiveDate,
    issues: &mut Vec<ImportIssue>,
) -> Option<NaiveDate> {
    let Some(text) = non_blank(value) else {
        return Some(today);
    };
    let parsed = parse_stored_date(&text);
    if parsed.is_none() {
        issues.push(issue(
            row,
            Field::Date,
            "invalid_date",
            "Date must use YYYY-MM-DD with a real calendar date.",
            Some(text),
        ));
    }
    parsed
}

fn validate_category(
    row: i64,
    value: Option<String>,
    kind: TransactionKind,
    description: &str,
    issues: &mut Vec<ImportIssue>,
) -> Option<String> {
    let text = non_blank(value);
    if kind == TransactionKind::Income {
        return Some(text.unwrap_or_else(|| INCOME_CATEGORY.to_string()));
    }

    let Some(text) = text else {
        return Some(Category::Other.as_str().to_string());
    };
    let resolved = CategoryChoice::parse(&text)
        .map(|choice| choice.resolve(description))
        .or_else(|| legacy_category(&text));
    if resolved.is_none() {
        issues.push(issue(
            row,
            Field::Category,
            "unknown_category",
            "Category must be one of Food, Transport, Leisure, Education, Hardware, Fixed Bills, Other or Auto.",
            Some(text),
        ));
    }
    resolved.map(|category| category.as_str().to_string())
}

fn legacy_category(value: &str) -> Option<Category> {
    let lowered = value.trim().to_lowercase();
    LEGACY_CATEGORY_LABELS
        .iter()
        .find(|(label, _)| *label == lowered)
        .map(|(_, category)| *category)
}

/// Accepts `12.50` and the comma-decimal `12,50`.
fn parse_amount(text: &str) -> Option<f64> {
    let direct = text.parse::<f64>().ok();
    let parsed = direct.or_else(|| {
        if text.contains(',') && !text.contains('.') {
            text.replace(',', ".").parse::<f64>().ok()
        } else {
            None
        }
    })?;
    parsed.is_finite().then_some(parsed)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn issue(
    row: i64,
    field: Field,
    code: &str,
    message: &str,
    received: Option<String>,
) -> ImportIssue {
    ImportIssue {
        row,
        field: field.name().to_string(),
        code: code.to_string(),
        message: message.to_string(),
        received,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{DEFAULT_DESCRIPTION, parse_amount, validate_rows};
    use crate::import::parse::ParsedRow;
    use crate::ledger::types::TransactionKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap_or_default()
    }

    fn row(index: i64) -> ParsedRow {
        ParsedRow {
            row: index,
            ..ParsedRow::default()
        }
    }

    #[test]
    fn missing_columns_take_defaults() {
        let validated = validate_rows(vec![row(1)], today());
        assert!(validated.is_ok());
        if let Ok(result) = validated {
            let draft = &result.drafts[0];
            assert_eq!(draft.date, today());
            assert_eq!(draft.category, "Other");
            assert_eq!(draft.description, DEFAULT_DESCRIPTION);
            assert_eq!(draft.amount, 0.0);
            assert_eq!(draft.kind, TransactionKind::Expense);
            assert_eq!(result.summary.rows_valid, 1);
        }
    }

    #[test]
    fn legacy_labels_and_auto_category_are_resolved() {
        let rows = vec![
            ParsedRow {
                category: Some("Alimentação".to_string()),
                kind: Some("Despesa".to_string()),
                amount: Some("12,50".to_string()),
                ..row(1)
            },
            ParsedRow {
                category: Some("auto".to_string()),
                description: Some("Uber home".to_string()),
                ..row(2)
            },
            ParsedRow {
                kind: Some("Receita".to_string()),
                description: Some("Salary".to_string()),
                amount: Some("3000".to_string()),
                ..row(3)
            },
        ];
        let validated = validate_rows(rows, today());
        assert!(validated.is_ok());
        if let Ok(result) = validated {
            assert_eq!(result.drafts[0].category, "Food");
            assert_eq!(result.drafts[0].amount, 12.5);
            assert_eq!(result.drafts[1].category, "Transport");
            assert_eq!(result.drafts[2].kind, TransactionKind::Income);
            assert_eq!(result.drafts[2].category, "Income");
        }
    }

    #[test]
    fn one_bad_row_fails_the_batch_with_every_issue() {
        let rows = vec![
            ParsedRow {
                amount: Some("10".to_string()),
                ..row(1)
            },
            ParsedRow {
                amount: Some("ten".to_string()),
                date: Some("2024-13-40".to_string()),
                ..row(2)
            },
            ParsedRow {
                amount: Some("-5".to_string()),
                kind: Some("refund".to_string()),
                ..row(3)
            },
        ];
        let validated = validate_rows(rows, today());
        assert!(validated.is_err());
        if let Err(error) = validated {
            assert_eq!(error.code, "import_validation_failed");
            let data = error.data.unwrap_or_default();
            assert_eq!(data["summary"]["rows_invalid"], 2);
            assert_eq!(data["summary"]["rows_valid"], 1);
            assert_eq!(data["issues"].as_array().map(Vec::len), Some(4));
            assert_eq!(data["issues"][0]["row"], 2);
        }
    }

    #[test]
    fn unknown_expense_category_is_an_issue() {
        let rows = vec![ParsedRow {
            category: Some("Pets".to_string()),
            ..row(1)
        }];
        let validated = validate_rows(rows, today());
        assert_eq!(
            validated.err().map(|e| e.code),
            Some("import_validation_failed".to_string())
        );
    }

    #[test]
    fn amount_parsing() {
        assert_eq!(parse_amount("12.5"), Some(12.5));
        assert_eq!(parse_amount("12,5"), Some(12.5));
        assert_eq!(parse_amount("1,234.5"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
    }
}
