use std::io;

use serde_json::Value;

use super::format;
use super::rows::{get_array, get_f64, get_i64, get_str, transaction_table};

pub fn render_expense_add(data: &Value) -> io::Result<String> {
    let rows = get_array(data, "rows");
    if rows.is_empty() {
        return Err(io::Error::other("expense output requires rows"));
    }

    let installments = get_i64(data, "installments");
    let category = get_str(data, "category");
    let mut lines = vec![if installments > 1 {
        format!(
            "Expense recorded in {installments} installments of {}.",
            format::money(get_f64(&rows[0], "amount"))
        )
    } else {
        "Expense recorded.".to_string()
    }];

    lines.push(String::new());
    let category_label = if get_str(data, "category_source") == "classifier" {
        format!("{category} (auto)")
    } else {
        category.to_string()
    };
    lines.extend(format::key_value_rows(
        &[
            ("Total:", format::money(get_f64(data, "total"))),
            ("Category:", category_label),
        ],
        2,
    ));

    lines.push(String::new());
    lines.extend(transaction_table(rows));
    Ok(lines.join("\n"))
}

pub fn render_income_add(data: &Value) -> io::Result<String> {
    let row = data
        .get("row")
        .ok_or_else(|| io::Error::other("income output requires row"))?;

    let mut lines = vec!["Income recorded.".to_string(), String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Source:", get_str(row, "description").to_string()),
            ("Amount:", format::money(get_f64(row, "amount"))),
            ("Date:", get_str(row, "date").to_string()),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_import(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("import output requires summary"))?;
    let mut lines = vec![get_str(data, "message").to_string(), String::new()];
    lines.push("Summary:".to_string());
    lines.extend(format::key_value_rows(
        &[
            ("Source:", get_str(data, "source").to_string()),
            ("Rows read:", get_i64(summary, "rows_read").to_string()),
            ("Rows valid:", get_i64(summary, "rows_valid").to_string()),
            ("Rows invalid:", get_i64(summary, "rows_invalid").to_string()),
            ("Inserted:", get_i64(summary, "inserted").to_string()),
        ],
        2,
    ));

    let ignored = get_array(data, "ignored_columns")
        .iter()
        .filter_map(Value::as_str)
        .collect::<Vec<_>>();
    if !ignored.is_empty() {
        lines.push(String::new());
        lines.push(format!("Ignored columns: {}", ignored.join(", ")));
    }

    let rows = get_array(data, "rows");
    if !rows.is_empty() {
        lines.push(String::new());
        lines.push("Rows written:".to_string());
        lines.extend(transaction_table(rows));
    }
    Ok(lines.join("\n"))
}
