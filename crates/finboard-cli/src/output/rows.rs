use serde_json::Value;

use super::format::{self, Column};

pub fn get_f64(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

pub fn get_i64(value: &Value, key: &str) -> i64 {
    value.get(key).and_then(Value::as_i64).unwrap_or(0)
}

pub fn get_str<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

pub fn get_array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Transaction rows as serialized by the client, one table line each.
/// Income amounts are shown positive and expenses negative.
pub fn transaction_table(rows: &[Value]) -> Vec<String> {
    let columns = [
        Column::left("Date"),
        Column::left("Kind"),
        Column::left("Category"),
        Column::left("Description"),
        Column::right("Amount"),
    ];
    let cells = rows
        .iter()
        .map(|row| {
            let kind = get_str(row, "kind");
            let amount = get_f64(row, "amount");
            let signed = if kind == "Expense" { -amount } else { amount };
            vec![
                get_str(row, "date").to_string(),
                kind.to_string(),
                get_str(row, "category").to_string(),
                get_str(row, "description").to_string(),
                format::money(signed),
            ]
        })
        .collect::<Vec<_>>();
    format::render_table(&columns, &cells, format::terminal_width(), "Transaction")
}
