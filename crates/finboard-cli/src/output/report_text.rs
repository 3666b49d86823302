use std::io;

use serde_json::Value;

use super::format::{self, Column};
use super::rows::{get_array, get_f64, get_i64, get_str, transaction_table};

const EMPTY_LEDGER: &str = "No transactions yet. Run `finboard expense add` or `finboard import`.";

pub fn render_months(data: &Value) -> io::Result<String> {
    let months = get_array(data, "months")
        .iter()
        .filter_map(Value::as_str)
        .map(|month| format!("  {month}"))
        .collect::<Vec<_>>();
    if months.is_empty() {
        return Ok(EMPTY_LEDGER.to_string());
    }

    let mut lines = vec!["Months on record:".to_string()];
    lines.extend(months);
    Ok(lines.join("\n"))
}

pub fn render_summary(data: &Value) -> io::Result<String> {
    let Some(month) = data.get("month").and_then(Value::as_str) else {
        return Ok(EMPTY_LEDGER.to_string());
    };

    let mut lines = vec![format!("Summary for {month}"), String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Income:", format::money(get_f64(data, "income_total"))),
            ("Expenses:", format::money(get_f64(data, "expense_total"))),
            ("Balance:", format::money(get_f64(data, "balance"))),
            ("Transactions:", get_i64(data, "transaction_count").to_string()),
        ],
        2,
    ));

    let by_category = get_array(data, "expenses_by_category");
    if !by_category.is_empty() {
        let expense_total = get_f64(data, "expense_total");
        let cells = by_category
            .iter()
            .map(|entry| {
                let total = get_f64(entry, "total");
                let share = if expense_total > 0.0 {
                    total / expense_total
                } else {
                    0.0
                };
                vec![
                    get_str(entry, "category").to_string(),
                    format::money(total),
                    format::percent(share),
                ]
            })
            .collect::<Vec<_>>();
        lines.push(String::new());
        lines.push("Expenses by category:".to_string());
        lines.extend(format::render_table(
            &[
                Column::left("Category"),
                Column::right("Total"),
                Column::right("Share"),
            ],
            &cells,
            format::terminal_width(),
            "Category",
        ));
    }

    let rows = get_array(data, "rows");
    if rows.is_empty() {
        lines.push(String::new());
        lines.push("No transactions in this month.".to_string());
    } else {
        lines.push(String::new());
        lines.push("Transactions:".to_string());
        lines.extend(transaction_table(rows));
    }
    Ok(lines.join("\n"))
}

pub fn render_search(data: &Value) -> io::Result<String> {
    let term = get_str(data, "term");
    let rows = get_array(data, "rows");
    if rows.is_empty() {
        return Ok(format!("No transactions match `{term}`."));
    }

    let mut lines = vec![format!(
        "{} transactions match `{term}`, totalling {}.",
        get_i64(data, "count"),
        format::money(get_f64(data, "total_amount"))
    )];
    lines.push(String::new());
    lines.extend(transaction_table(rows));
    Ok(lines.join("\n"))
}

pub fn render_goals(data: &Value) -> io::Result<String> {
    let changed = get_array(data, "changed")
        .iter()
        .filter_map(Value::as_str)
        .collect::<Vec<_>>();
    let cells = get_array(data, "goals")
        .iter()
        .map(|goal| {
            let category = get_str(goal, "category");
            let limit = get_f64(goal, "limit");
            let mut state = if limit > 0.0 { "tracked" } else { "off" }.to_string();
            if changed.contains(&category) {
                state.push_str(" (updated)");
            }
            vec![category.to_string(), format::money(limit), state]
        })
        .collect::<Vec<_>>();

    let mut lines = vec!["Monthly goals:".to_string()];
    lines.extend(format::render_table(
        &[
            Column::left("Category"),
            Column::right("Limit"),
            Column::left("State"),
        ],
        &cells,
        format::terminal_width(),
        "Goal",
    ));
    if data.get("changed").is_some() && changed.is_empty() {
        lines.push(String::new());
        lines.push("No limits changed.".to_string());
    }
    Ok(lines.join("\n"))
}

pub fn render_budget(data: &Value) -> io::Result<String> {
    let Some(month) = data.get("month").and_then(Value::as_str) else {
        return Ok(EMPTY_LEDGER.to_string());
    };
    let budget_lines = get_array(data, "lines");
    if budget_lines.is_empty() {
        return Ok(format!(
            "No goals are set for {month}. Run `finboard goals set <Category>=<limit>`."
        ));
    }

    let cells = budget_lines
        .iter()
        .map(|line| {
            let exceeded = get_str(line, "status") == "exceeded";
            vec![
                get_str(line, "category").to_string(),
                format::progress_bar(get_f64(line, "percentage")),
                format!(
                    "{} / {}",
                    format::money(get_f64(line, "spent")),
                    format::money(get_f64(line, "limit"))
                ),
                if exceeded { "EXCEEDED" } else { "on track" }.to_string(),
            ]
        })
        .collect::<Vec<_>>();

    let mut lines = vec![format!("Budget for {month}"), String::new()];
    lines.extend(format::render_table(
        &[
            Column::left("Category"),
            Column::left("Progress"),
            Column::right("Spent / Limit"),
            Column::left("Status"),
        ],
        &cells,
        format::terminal_width(),
        "Goal",
    ));

    let exceeded = get_i64(data, "exceeded");
    if exceeded > 0 {
        lines.push(String::new());
        lines.push(format!("{exceeded} categories are over their limit."));
    }
    Ok(lines.join("\n"))
}

pub fn render_forecast(data: &Value) -> io::Result<String> {
    let Some(month) = data.get("month").and_then(Value::as_str) else {
        return Ok(EMPTY_LEDGER.to_string());
    };

    let mut lines = vec![format!("Forecast for {month}"), String::new()];
    match data.get("report").filter(|report| !report.is_null()) {
        None => {
            lines.push("Not enough expense history to compare against yet.".to_string());
        }
        Some(report) => {
            let mean = get_f64(report, "historical_mean");
            let delta = get_f64(report, "delta");
            lines.extend(format::key_value_rows(
                &[
                    ("Historical mean:", format::money(mean)),
                    (
                        "This month:",
                        format::money(get_f64(report, "current_month_spend")),
                    ),
                    (
                        "Months considered:",
                        get_i64(report, "months_considered").to_string(),
                    ),
                ],
                2,
            ));
            lines.push(String::new());
            if get_str(report, "status") == "above_average" {
                lines.push(format!(
                    "Above average: {} more than the monthly mean.",
                    format::money(delta)
                ));
            } else {
                let headroom = report
                    .get("delta_percentage")
                    .and_then(Value::as_f64)
                    .map(|pct| format!(" ({pct:.1}% below the mean)"))
                    .unwrap_or_default();
                lines.push(format!(
                    "Within average: about {} left before reaching the mean{headroom}.",
                    format::money(delta)
                ));
            }
        }
    }

    let trend = get_array(data, "trend");
    if !trend.is_empty() {
        let peak = trend
            .iter()
            .map(|point| get_f64(point, "total"))
            .fold(0.0_f64, f64::max);
        let cells = trend
            .iter()
            .map(|point| {
                let total = get_f64(point, "total");
                let fraction = if peak > 0.0 { total / peak } else { 0.0 };
                vec![
                    get_str(point, "month").to_string(),
                    format::money(total),
                    format::progress_bar(fraction),
                ]
            })
            .collect::<Vec<_>>();
        lines.push(String::new());
        lines.push("Monthly expenses:".to_string());
        lines.extend(format::render_table(
            &[
                Column::left("Month"),
                Column::right("Total"),
                Column::left("Trend"),
            ],
            &cells,
            format::terminal_width(),
            "Month",
        ));
    }
    Ok(lines.join("\n"))
}
