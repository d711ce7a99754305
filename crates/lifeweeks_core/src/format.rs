//! en-US display formatting for dates and counts.
//!
//! Display-only helpers; no calendar logic depends on these strings.

use crate::model::life::ISO_DATE_FORMAT;
use chrono::{Datelike, NaiveDate};

/// Groups digits with commas, e.g. `1234567` -> `1,234,567`.
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Unsigned variant of [`format_number`].
pub fn format_count(value: u64) -> String {
    format_number(i64::try_from(value).unwrap_or(i64::MAX))
}

/// `Jan 5`
pub fn format_short(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// `Mon, Jan 15, 2024`
pub fn format_full(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// Storage key form, `2024-01-15`.
pub fn format_date_key(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Tooltip range, `Jan 15 - Jan 21, 2024`; the year is the start date's.
pub fn format_week_range(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{} - {}, {}",
        format_short(start),
        format_short(end),
        start.year()
    )
}
