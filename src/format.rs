//! Display formatters, fixed to the South African locale
//!
//! Currency is the rand (`R`), dates read like `05 Mar 2024` and times are
//! shown in South African Standard Time (UTC+02:00, no daylight saving).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

const SAST_OFFSET_SECS: i32 = 2 * 3600;
const DATE_FORMAT: &str = "%d %b %Y";
const DATE_TIME_FORMAT: &str = "%d %b %Y, %H:%M";

fn sast() -> FixedOffset {
    FixedOffset::east_opt(SAST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// `1234.5` → `R1,234.50`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}R{}.{}", sign, group_thousands(int_part), frac_part)
}

/// Grouped with at most three fraction digits: `1234567.8915` → `1,234,567.892`
pub fn format_number(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = rounded.abs().to_string();
    match text.split_once('.') {
        Some((int_part, frac_part)) => {
            format!("{}{}.{}", sign, group_thousands(int_part), frac_part)
        }
        None => format!("{}{}", sign, group_thousands(&text)),
    }
}

/// ISO date or timestamp → `05 Mar 2024`; `None` when unparseable
pub fn format_date(input: &str) -> Option<String> {
    parse_instant(input).map(|at| at.format(DATE_FORMAT).to_string())
}

/// ISO date or timestamp → `05 Mar 2024, 14:30`; `None` when unparseable
pub fn format_date_time(input: &str) -> Option<String> {
    parse_instant(input).map(|at| at.format(DATE_TIME_FORMAT).to_string())
}

pub fn format_naive_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&sast()).format(DATE_TIME_FORMAT).to_string()
}

/// Date-only input is midnight UTC; timestamps without an offset are local time.
fn parse_instant(input: &str) -> Option<DateTime<FixedOffset>> {
    let input = input.trim();
    let tz = sast();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight).with_timezone(&tz));
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(input) {
        return Some(at.with_timezone(&tz));
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"))
        .ok()
        .and_then(|local| tz.from_local_datetime(&local).single())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
