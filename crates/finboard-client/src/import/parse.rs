use std::collections::HashMap;

use crate::import::invalid_input_error;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Field {
    Date,
    Category,
    Description,
    Amount,
    Kind,
}

impl Field {
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Category => "Category",
            Self::Description => "Description",
            Self::Amount => "Amount",
            Self::Kind => "Kind",
        }
    }
}

const HEADER_ALIASES: [(&str, Field); 13] = [
    ("date", Field::Date),
    ("data", Field::Date),
    ("category", Field::Category),
    ("categoria", Field::Category),
    ("description", Field::Description),
    ("descricao", Field::Description),
    ("descrição", Field::Description),
    ("amount", Field::Amount),
    ("value", Field::Amount),
    ("valor", Field::Amount),
    ("kind", Field::Kind),
    ("type", Field::Kind),
    ("tipo", Field::Kind),
];

/// One CSV record. A field is `None` when the file has no column for it and
/// `Some("")` when the column exists but the cell is blank.
#[derive(Debug, Clone, Default)]
pub(crate) struct ParsedRow {
    pub(crate) row: i64,
    pub(crate) date: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) amount: Option<String>,
    pub(crate) kind: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct ParsedSource {
    pub(crate) rows: Vec<ParsedRow>,
    pub(crate) ignored_columns: Vec<String>,
}

pub(crate) fn parse_source(content: &str) -> ClientResult<ParsedSource> {
    let trimmed = content.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Err(invalid_input_error("Import source is empty."));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(trimmed.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| ClientError::invalid_import_format("CSV header row is missing or unreadable."))?
        .iter()
        .map(str::to_string)
        .collect::<Vec<String>>();

    let mut index_by_field = HashMap::new();
    let mut ignored_columns = Vec::new();
    for (index, header) in headers.iter().enumerate() {
        match field_for_header(header) {
            Some(field) => {
                index_by_field.entry(field).or_insert(index);
            }
            None => ignored_columns.push(header.clone()),
        }
    }

    if index_by_field.is_empty() {
        return Err(ClientError::invalid_import_format(&format!(
            "CSV header row has none of the expected columns (found: {}).",
            headers.join(", ")
        )));
    }

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record = result_row.map_err(|error| {
            ClientError::invalid_import_format(&format!("CSV rows are malformed: {error}"))
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let value = |field: Field| -> Option<String> {
            let index = index_by_field.get(&field)?;
            Some(record.get(*index).unwrap_or_default().to_string())
        };
        rows.push(ParsedRow {
            row: (row_index as i64) + 1,
            date: value(Field::Date),
            category: value(Field::Category),
            description: value(Field::Description),
            amount: value(Field::Amount),
            kind: value(Field::Kind),
        });
    }

    Ok(ParsedSource {
        rows,
        ignored_columns,
    })
}

fn field_for_header(header: &str) -> Option<Field> {
    let normalized = header.trim().to_lowercase();
    HEADER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, field)| *field)
}

#[cfg(test)]
mod tests {
    use super::parse_source;

    #[test]
    fn canonical_headers_map_to_fields() {
        let parsed = parse_source(
            "Date,Category,Description,Amount,Kind\n2024-01-05,Food,Pizza,45.5,Expense\n",
        );
        assert!(parsed.is_ok());
        if let Ok(source) = parsed {
            assert_eq!(source.rows.len(), 1);
            let row = &source.rows[0];
            assert_eq!(row.row, 1);
            assert_eq!(row.date.as_deref(), Some("2024-01-05"));
            assert_eq!(row.amount.as_deref(), Some("45.5"));
            assert_eq!(row.kind.as_deref(), Some("Expense"));
            assert!(source.ignored_columns.is_empty());
        }
    }

    #[test]
    fn legacy_headers_and_missing_columns() {
        let parsed = parse_source("\u{feff}Data,Descricao,Valor,Notes\n2024-02-01,Uber,12,late\n");
        assert!(parsed.is_ok());
        if let Ok(source) = parsed {
            let row = &source.rows[0];
            assert_eq!(row.description.as_deref(), Some("Uber"));
            assert_eq!(row.amount.as_deref(), Some("12"));
            assert!(row.category.is_none());
            assert!(row.kind.is_none());
            assert_eq!(source.ignored_columns, vec!["Notes".to_string()]);
        }
    }

    #[test]
    fn unrelated_headers_are_a_format_error() {
        let parsed = parse_source("foo,bar\n1,2\n");
        assert_eq!(parsed.err().map(|e| e.code), Some("invalid_argument".to_string()));
    }

    #[test]
    fn ragged_rows_are_a_format_error() {
        let parsed = parse_source("Date,Amount\n2024-01-01,1,extra\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let parsed = parse_source("Description,Amount\nPizza,10\n,\nUber,5\n");
        assert_eq!(parsed.map(|source| source.rows.len()).ok(), Some(2));
    }
}
