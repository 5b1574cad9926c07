//! Attendance aggregation: turns raw events plus the configured schedule into
//! per-employee statistics. Pure; callers scope the events to the window.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use derive_more::{Display, Error};

use crate::model::attendance::AttendanceLog;
use crate::model::settings::Settings;
use crate::model::summary::{DailyWindow, EmployeeSummary};

mod clock;

pub use clock::{format_date, format_time, minutes_of_day, parse_date, parse_time};

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum StatsError {
    #[display(fmt = "invalid time of day: {:?}", _0)]
    InvalidTimeFormat(#[error(not(source))] String),
    #[display(fmt = "invalid calendar date: {:?}", _0)]
    InvalidDate(#[error(not(source))] String),
}

/// Reference point for a statistics run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsContext {
    /// Current date in the reference timezone
    pub today: NaiveDate,
    /// Denominator for absence and attendance percentage, at least 1
    pub reference_days: u32,
}

impl StatsContext {
    pub fn new(today: NaiveDate, reference_days: u32) -> Self {
        Self {
            today,
            reference_days: reference_days.max(1),
        }
    }
}

/// Buckets events by date, keeping the earliest and latest time of each day
/// whatever kind the events declare.
pub fn daily_windows<'a, I>(events: I) -> BTreeMap<NaiveDate, DailyWindow>
where
    I: IntoIterator<Item = &'a AttendanceLog>,
{
    let mut windows: BTreeMap<NaiveDate, DailyWindow> = BTreeMap::new();

    for log in events {
        windows
            .entry(log.date)
            .and_modify(|window| {
                window.check_in = window.check_in.min(log.time);
                window.check_out = window.check_out.max(log.time);
                window.events += 1;
            })
            .or_insert(DailyWindow {
                date: log.date,
                check_in: log.time,
                check_out: log.time,
                events: 1,
            });
    }

    windows
}

/// Strictly after the standard check-in; `09:00:59` is late against `09:00`.
fn is_late(window: &DailyWindow, settings: &Settings) -> bool {
    window.check_in > settings.standard_check_in
}

/// Minutes worked past the standard check-out, capped at the overtime threshold.
pub fn overtime_minutes(window: &DailyWindow, settings: &Settings) -> u32 {
    let standard = minutes_of_day(settings.standard_check_out);
    let check_out = minutes_of_day(window.check_out);

    if check_out <= standard {
        return 0;
    }

    check_out
        .min(minutes_of_day(settings.overtime_cap))
        .saturating_sub(standard)
}

/// Statistics for one employee. `events` must already belong to `name`.
pub fn summarize_employee<'a, I>(
    name: &str,
    events: I,
    settings: &Settings,
    ctx: &StatsContext,
) -> EmployeeSummary
where
    I: IntoIterator<Item = &'a AttendanceLog>,
{
    let mut is_present_today = false;
    let mut last_activity_at: Option<DateTime<Utc>> = None;

    let windows = daily_windows(events.into_iter().inspect(|log| {
        is_present_today |= log.date == ctx.today;
        last_activity_at = last_activity_at.max(Some(log.synced_at));
    }));

    let present_days = windows.len() as u32;
    let late_arrival_days = windows.values().filter(|w| is_late(w, settings)).count() as u32;
    let overtime_total: u32 = windows.values().map(|w| overtime_minutes(w, settings)).sum();

    let reference_days = ctx.reference_days.max(1);

    EmployeeSummary {
        name: name.to_string(),
        total_days_present: present_days,
        absent_days: reference_days.saturating_sub(present_days),
        attendance_percentage: (f64::from(present_days) / f64::from(reference_days) * 1000.0)
            .round()
            / 10.0,
        is_present_today,
        last_activity_at,
        overtime_hours: (f64::from(overtime_total) / 60.0 * 10.0).round() / 10.0,
        late_arrival_days,
    }
}

/// Statistics for every employee that appears in `events`, ordered by name.
pub fn summarize(
    events: &[AttendanceLog],
    settings: &Settings,
    ctx: &StatsContext,
) -> Vec<EmployeeSummary> {
    let mut by_name: BTreeMap<&str, Vec<&AttendanceLog>> = BTreeMap::new();
    for log in events {
        by_name.entry(log.name.as_str()).or_default().push(log);
    }

    by_name
        .into_iter()
        .map(|(name, logs)| summarize_employee(name, logs, settings, ctx))
        .collect()
}

/// Number of distinct employees with at least one event dated `today`.
pub fn present_on(events: &[AttendanceLog], today: NaiveDate) -> usize {
    events
        .iter()
        .filter(|log| log.date == today)
        .map(|log| log.name.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}
