use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};

use crate::stats::StatsError;

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    pub fn len_days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1).max(0) as u32
    }
}

/// Calendar date of `now` in the reference timezone.
pub fn today_at(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

pub fn today(offset: FixedOffset) -> NaiveDate {
    today_at(Utc::now(), offset)
}

/// Monday through Sunday of the week containing `day`.
pub fn week_of(day: NaiveDate) -> DateRange {
    let start = day - Duration::days(i64::from(day.weekday().num_days_from_monday()));
    DateRange {
        start,
        end: start + Duration::days(6),
    }
}

/// First through last day of the month containing `day`.
pub fn month_of(day: NaiveDate) -> DateRange {
    let start = day.with_day(1).unwrap_or(day);
    let next_month = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };

    DateRange {
        start,
        end: next_month
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX),
    }
}

/// Parses a `YYYY-MM` month selector.
pub fn parse_month(raw: &str) -> Result<DateRange, StatsError> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|_| StatsError::InvalidDate(raw.to_string()))?;
    Ok(month_of(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn today_follows_reference_offset() {
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        // 20:30 UTC is already the next day at UTC+5
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 20, 30, 0).unwrap();
        assert_eq!(today_at(now, offset), date(2026, 10, 19));

        let now = Utc.with_ymd_and_hms(2026, 10, 18, 18, 59, 0).unwrap();
        assert_eq!(today_at(now, offset), date(2026, 10, 18));
    }

    #[test]
    fn week_runs_monday_to_sunday() {
        // 2026-10-18 is a Sunday
        let week = week_of(date(2026, 10, 18));
        assert_eq!(week.start, date(2026, 10, 12));
        assert_eq!(week.end, date(2026, 10, 18));

        let week = week_of(date(2026, 10, 19));
        assert_eq!(week.start, date(2026, 10, 19));
        assert_eq!(week.len_days(), 7);
    }

    #[test]
    fn month_bounds() {
        assert_eq!(
            month_of(date(2024, 2, 14)),
            DateRange {
                start: date(2024, 2, 1),
                end: date(2024, 2, 29)
            }
        );
        assert_eq!(month_of(date(2026, 12, 31)).end, date(2026, 12, 31));
        assert_eq!(parse_month("2026-04").unwrap().len_days(), 30);
        assert!(parse_month("2026-13").is_err());
        assert!(parse_month("April").is_err());
    }

    #[test]
    fn range_contains_is_inclusive() {
        let range = DateRange {
            start: date(2026, 1, 1),
            end: date(2026, 1, 3),
        };
        assert!(range.contains(date(2026, 1, 1)));
        assert!(range.contains(date(2026, 1, 3)));
        assert!(!range.contains(date(2026, 1, 4)));
        assert_eq!(DateRange::single(date(2026, 1, 1)).len_days(), 1);
    }
}
