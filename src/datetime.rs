//! Locale date/time strings (`M/D/YYYY`, `H:MM[:SS] [AM|PM]`) to the ISO 8601 forms
//! the date and time widgets expect.
//!
//! There is no range validation. A field that is not a number is passed through as
//! written instead of failing the conversion.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_TIME_SEPARATOR: Regex = Regex::new(r",?\s+").unwrap();
}

fn parse_field(field: &str) -> Option<u32> {
    field.trim().parse().ok()
}

fn pad2(field: &str) -> String {
    match parse_field(field) {
        Some(n) => format!("{:02}", n),
        None => {
            tracing::debug!(field, "non-numeric date/time field passed through");
            field.trim().to_string()
        }
    }
}

/// `"3:45 PM"` → `"15:45:00"`.
pub fn time_to_iso(time: &str) -> String {
    let mut parts = time.split_whitespace();
    let clock = parts.next().unwrap_or_default();
    let period = parts.next().map(str::to_ascii_lowercase);

    let mut fields = clock.split(':');
    let hours = fields.next().unwrap_or_default();
    let minutes = fields.next().unwrap_or_default();
    let seconds = fields.next().unwrap_or("0");

    let hours = match parse_field(hours) {
        Some(h) => {
            let h = match period.as_deref() {
                Some("pm") if h < 12 => h + 12,
                Some("am") if h == 12 => 0,
                _ => h,
            };
            format!("{:02}", h)
        }
        None => pad2(hours),
    };

    format!("{}:{}:{}", hours, pad2(minutes), pad2(seconds))
}

/// `"1/1/2023"` → `"2023-01-01"`.
pub fn date_to_iso(date: &str) -> String {
    let mut fields = date.trim().split('/');
    let month = fields.next().unwrap_or_default();
    let day = fields.next().unwrap_or_default();
    let year = fields.next().unwrap_or_default();

    let year = match parse_field(year) {
        Some(y) => y.to_string(),
        None => pad2(year),
    };
    format!("{}-{}-{}", year, pad2(month), pad2(day))
}

/// `"12/31/2023, 11:59 PM"` → `"2023-12-31T23:59:00"`.
pub fn date_time_to_iso(date_time: &str) -> String {
    let mut parts = DATE_TIME_SEPARATOR.split(date_time.trim());
    let date = parts.next().unwrap_or_default();
    let time = parts.collect::<Vec<_>>().join(" ");
    format!("{}T{}", date_to_iso(date), time_to_iso(&time))
}
