use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::stats::{StatsError, parse_date, parse_time};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    CheckIn,
    CheckOut,
}

/// A stored check-in/check-out event as reported by the recognition client.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "id": "5f0c1c4e-8d1e-4a43-9a55-1f6d2c1e7a10",
    "name": "Ana",
    "date": "2026-01-05",
    "time": "09:10:00",
    "type": "check_in",
    "synced_at": "2026-01-05T04:10:03Z"
}))]
pub struct AttendanceLog {
    pub id: String,
    pub name: String,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "09:10:00")]
    pub time: NaiveTime,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
    /// Ingestion time, independent of the event's own date/time
    #[schema(value_type = String, format = "date-time")]
    pub synced_at: DateTime<Utc>,
}

/// Validated event awaiting insertion.
#[derive(Debug, Clone)]
pub struct NewAttendanceLog {
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub kind: Option<EventKind>,
}

impl NewAttendanceLog {
    pub fn into_log(self, synced_at: DateTime<Utc>) -> AttendanceLog {
        AttendanceLog {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            date: self.date,
            time: self.time,
            kind: self.kind,
            synced_at,
        }
    }
}

/// Raw `attendance_logs` row. Dates and times are stored as zero-padded text.
#[derive(Debug, sqlx::FromRow)]
pub struct AttendanceRow {
    pub id: String,
    pub name: String,
    pub date: String,
    pub time: String,
    pub kind: Option<String>,
    pub synced_at: DateTime<Utc>,
}

impl TryFrom<AttendanceRow> for AttendanceLog {
    type Error = StatsError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        Ok(AttendanceLog {
            date: parse_date(&row.date)?,
            time: parse_time(&row.time)?,
            // kind is advisory only; unknown values are dropped
            kind: row.kind.and_then(|k| k.parse().ok()),
            id: row.id,
            name: row.name,
            synced_at: row.synced_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(time: &str, kind: Option<&str>) -> AttendanceRow {
        AttendanceRow {
            id: "row-1".into(),
            name: "Ana".into(),
            date: "2026-01-05".into(),
            time: time.into(),
            kind: kind.map(str::to_string),
            synced_at: Utc::now(),
        }
    }

    #[test]
    fn event_kind_uses_snake_case() {
        assert_eq!(EventKind::CheckOut.as_ref(), "check_out");
        assert_eq!("check_in".parse::<EventKind>().unwrap(), EventKind::CheckIn);
        assert!("checkin".parse::<EventKind>().is_err());
    }

    #[test]
    fn row_conversion_parses_text_columns() {
        let log = AttendanceLog::try_from(row("18:30:00", Some("check_out"))).unwrap();
        assert_eq!(log.time, NaiveTime::from_hms_opt(18, 30, 0).unwrap());
        assert_eq!(log.date, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!(log.kind, Some(EventKind::CheckOut));
    }

    #[test]
    fn unknown_kind_is_dropped() {
        let log = AttendanceLog::try_from(row("08:00:00", Some("lunch"))).unwrap();
        assert_eq!(log.kind, None);
    }

    #[test]
    fn corrupt_time_fails_fast() {
        let err = AttendanceLog::try_from(row("8 o'clock", None)).unwrap_err();
        assert_eq!(err, StatsError::InvalidTimeFormat("8 o'clock".into()));
    }

    #[test]
    fn serializes_kind_as_type() {
        let log = AttendanceLog::try_from(row("08:00:00", Some("check_in"))).unwrap();
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["type"], "check_in");
        assert_eq!(json["time"], "08:00:00");
        assert_eq!(json["date"], "2026-01-05");
    }
}
