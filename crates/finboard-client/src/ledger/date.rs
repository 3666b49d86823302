use chrono::{Datelike, NaiveDate};

use crate::{ClientError, ClientResult};

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Lenient parse used when reading rows back from storage.
pub fn parse_stored_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Strict parse for user input: exactly `YYYY-MM-DD` with a real calendar date.
pub fn parse_iso_date_strict(
    value: &str,
    field_name: &str,
    command: &str,
) -> ClientResult<NaiveDate> {
    if !looks_like_iso_date(value) {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with a real calendar date."),
            Some(command),
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with valid calendar values."),
            Some(command),
        )
    })
}

/// Adds whole calendar months, keeping the day of month when it exists in the
/// target month and clamping to the month's last day otherwise.
pub fn add_months_clamped(date: NaiveDate, months: u32) -> NaiveDate {
    let zero_based = date.month0() as i64 + i64::from(months);
    let year = date.year() + (zero_based / 12) as i32;
    let month = (zero_based % 12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

fn looks_like_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    [0usize, 1, 2, 3, 5, 6, 8, 9]
        .iter()
        .all(|index| bytes[*index].is_ascii_digit())
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
