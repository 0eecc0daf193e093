//! Parsing and formatting helpers for the textual inputs a front end
//! collects: dates, times, and recurrence descriptors. Priority and
//! status tokens parse via their `FromStr` impls in [`types`](super::types).

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};

use crate::task::types::{RecurrenceRule, TaskError};

/// Parse a date string into a UTC timestamp at midnight.
/// Accepts `YYYY-MM-DD` (preferred) and `MM/DD/YYYY`.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, TaskError> {
    let input = input.trim();
    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }
    }
    Err(TaskError::validation(
        "date",
        format!("invalid date '{input}', use YYYY-MM-DD or MM/DD/YYYY"),
    ))
}

/// Parse a time string into (hour, minute).
/// Accepts `HH:MM` (24-hour) and `HH:MM AM/PM`.
pub fn parse_time(input: &str) -> Result<(u32, u32), TaskError> {
    let input = input.trim();
    for format in ["%H:%M", "%I:%M %p"] {
        if let Ok(time) = NaiveTime::parse_from_str(input, format) {
            return Ok((time.hour(), time.minute()));
        }
    }
    Err(TaskError::validation(
        "time",
        format!("invalid time '{input}', use HH:MM or HH:MM AM/PM"),
    ))
}

/// Parse a recurrence descriptor. `custom` requires a positive interval.
pub fn parse_recurrence(
    kind: &str,
    interval_days: Option<u32>,
) -> Result<RecurrenceRule, TaskError> {
    match kind.trim().to_lowercase().as_str() {
        "daily" => Ok(RecurrenceRule::Daily),
        "weekly" => Ok(RecurrenceRule::Weekly),
        "custom" => match interval_days {
            Some(days) if days > 0 => Ok(RecurrenceRule::Custom {
                interval_days: days,
            }),
            _ => Err(TaskError::validation(
                "recurrence",
                "custom recurrence requires a positive interval in days",
            )),
        },
        other => Err(TaskError::validation(
            "recurrence",
            format!("unknown recurrence '{other}', allowed values: daily, weekly, custom"),
        )),
    }
}

/// Format a timestamp as `YYYY-MM-DD HH:MM`
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// Format a timestamp as `YYYY-MM-DD`
pub fn format_date(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}
