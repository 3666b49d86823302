use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

impl<'a> Column<'a> {
    pub const fn left(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Left,
        }
    }

    pub const fn right(name: &'a str) -> Self {
        Self {
            name,
            align: Align::Right,
        }
    }
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const BAR_WIDTH: usize = 20;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(100);
    cmp::max(from_env, 40)
}

/// `R$ 1,234.56`. Negative values keep the sign before the symbol.
pub fn money(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (whole, cents) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && rounded != "0.00" { "-" } else { "" };
    format!("{sign}R$ {grouped}.{cents}")
}

pub fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

/// Fixed-width bar for a fraction in `[0, 1]`.
pub fn progress_bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders an aligned table, or one labelled block per row when the table
/// would not fit in `max_width`.
pub fn render_table(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = column_widths(columns, rows);
    let total = INDENT + widths.iter().sum::<usize>() + COLUMN_GAP * (widths.len() - 1);
    if total > max_width {
        return render_blocks(columns, rows, block_label);
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<_>>();
    let mut output = vec![format_row(columns, &header, &widths)];
    output.extend(rows.iter().map(|row| format_row(columns, row, &widths)));
    output
}

fn column_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths = columns
        .iter()
        .map(|column| column.name.chars().count())
        .collect::<Vec<usize>>();
    for row in rows {
        for (slot, value) in widths.iter_mut().zip(row) {
            *slot = cmp::max(*slot, value.chars().count());
        }
    }
    widths
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, width))| {
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(value.chars().count());
            match column.align {
                Align::Left => format!("{value}{}", " ".repeat(pad)),
                Align::Right => format!("{}{value}", " ".repeat(pad)),
            }
        })
        .collect::<Vec<_>>();

    format!("{}{}", " ".repeat(INDENT), pieces.join(&" ".repeat(COLUMN_GAP)))
        .trim_end()
        .to_string()
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let labels = columns
        .iter()
        .map(|column| format!("{}:", column.name))
        .collect::<Vec<String>>();

    let mut output = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        if row_index > 0 {
            output.push(String::new());
        }
        output.push(format!("  {block_label} {}:", row_index + 1));
        let entries = labels
            .iter()
            .enumerate()
            .map(|(column_index, label)| {
                (label.as_str(), row.get(column_index).cloned().unwrap_or_default())
            })
            .collect::<Vec<_>>();
        output.extend(key_value_rows(&entries, 4));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::{Column, key_value_rows, money, progress_bar, render_table};

    #[test]
    fn money_groups_thousands_and_keeps_two_decimals() {
        assert_eq!(money(0.0), "R$ 0.00");
        assert_eq!(money(12.5), "R$ 12.50");
        assert_eq!(money(1234.567), "R$ 1,234.57");
        assert_eq!(money(1_000_000.0), "R$ 1,000,000.00");
        assert_eq!(money(-42.1), "-R$ 42.10");
        assert_eq!(money(-0.001), "R$ 0.00");
    }

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Income:", "R$ 10.00".to_string()),
                ("Balance:", "R$ 5.00".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Income:   R$ 10.00");
        assert_eq!(rows[1], "  Balance:  R$ 5.00");
    }

    #[test]
    fn progress_bar_saturates() {
        assert_eq!(progress_bar(0.0), format!("[{}]", ".".repeat(20)));
        assert_eq!(progress_bar(0.5), format!("[{}{}]", "#".repeat(10), ".".repeat(10)));
        assert_eq!(progress_bar(3.0), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn table_aligns_columns_when_it_fits() {
        let columns = [Column::left("Category"), Column::right("Total")];
        let rows = vec![
            vec!["Food".to_string(), "R$ 12.00".to_string()],
            vec!["Fixed Bills".to_string(), "R$ 1,500.00".to_string()],
        ];

        let rendered = render_table(&columns, &rows, 80, "Row");
        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[0], "  Category           Total");
        assert_eq!(rendered[1], "  Food            R$ 12.00");
        assert_eq!(rendered[2], "  Fixed Bills  R$ 1,500.00");
    }

    #[test]
    fn narrow_width_falls_back_to_blocks() {
        let columns = [
            Column::left("Date"),
            Column::left("Description"),
            Column::right("Amount"),
        ];
        let rows = vec![vec![
            "2024-03-01".to_string(),
            "A very long description that cannot fit".to_string(),
            "R$ 5.00".to_string(),
        ]];

        let rendered = render_table(&columns, &rows, 40, "Transaction");
        assert_eq!(rendered[0], "  Transaction 1:");
        assert!(rendered.iter().any(|line| line.contains("Amount:")));
        assert!(rendered.iter().any(|line| line.ends_with("R$ 5.00")));
    }
}
