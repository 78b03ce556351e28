//! Display formatting helpers

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use super::display::ProfitStyle;

/// Collapse `-0.0` to `0.0`, which would otherwise print as `-0.00`
fn unsigned_zero(amount: f64) -> f64 {
    if amount == 0.0 {
        0.0
    } else {
        amount
    }
}

/// `$x.xx`
pub fn currency(amount: f64) -> String {
    format!("${:.2}", unsigned_zero(amount))
}

/// Signed currency: explicit sign, absolute magnitude to 2 decimals
///
/// Zero (of either sign) and positive amounts are profits.
pub fn signed_currency(amount: f64) -> (String, ProfitStyle) {
    if amount >= 0.0 {
        (format!("+${:.2}", unsigned_zero(amount)), ProfitStyle::Profit)
    } else {
        (format!("-${:.2}", amount.abs()), ProfitStyle::Loss)
    }
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// `HH:MM:SS`
pub fn time_of_day(at: &DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Parse an ISO-8601 timestamp into local time
///
/// Offset-carrying timestamps are converted; naive ones are taken as
/// local time (the bot stamps events with its local clock).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

/// Time-of-day of an event timestamp, or of `fallback` when it is absent or unparseable
pub fn event_time_of_day(raw: Option<&str>, fallback: &DateTime<Local>) -> String {
    raw.and_then(parse_timestamp)
        .map(|dt| time_of_day(&dt))
        .unwrap_or_else(|| time_of_day(fallback))
}
