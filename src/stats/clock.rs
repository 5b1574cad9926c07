use chrono::{NaiveDate, NaiveTime, Timelike};

use super::StatsError;

/// Parses a wall-clock time written as `H:MM`, `HH:MM` or `HH:MM:SS`.
///
/// Single-digit hours are accepted so that `9:05` and `09:05` compare the
/// same. Leap seconds are rejected.
pub fn parse_time(raw: &str) -> Result<NaiveTime, StatsError> {
    let value = raw.trim();

    let parsed = NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| StatsError::InvalidTimeFormat(raw.to_string()))?;

    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(StatsError::InvalidTimeFormat(raw.to_string()));
    }

    Ok(parsed)
}

/// Parses an ISO calendar day (`YYYY-MM-DD`).
pub fn parse_date(raw: &str) -> Result<NaiveDate, StatsError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| StatsError::InvalidDate(raw.to_string()))
}

/// Whole minutes since midnight; seconds are truncated.
pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight() / 60
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
