use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::attendance::AttendanceLog;

/// Per-employee statistics for a query window. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "name": "Ana",
    "total_days_present": 5,
    "absent_days": 5,
    "attendance_percentage": 50.0,
    "is_present_today": true,
    "last_activity_at": "2026-01-10T13:31:02Z",
    "overtime_hours": 1.5,
    "late_arrival_days": 1
}))]
pub struct EmployeeSummary {
    pub name: String,
    pub total_days_present: u32,
    pub absent_days: u32,
    pub attendance_percentage: f64,
    pub is_present_today: bool,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub last_activity_at: Option<DateTime<Utc>>,
    pub overtime_hours: f64,
    pub late_arrival_days: u32,
}

/// Earliest and latest event time seen for one employee on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DailyWindow {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(value_type = String, example = "09:10:00")]
    pub check_in: NaiveTime,
    #[schema(value_type = String, example = "18:30:00")]
    pub check_out: NaiveTime,
    pub events: u32,
}

/// Statistics plus history for a single employee.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeDetail {
    pub summary: EmployeeSummary,
    /// Daily windows inside the statistics window, newest first
    pub days: Vec<DailyWindow>,
    /// Every stored event for the employee, newest first
    pub logs: Vec<AttendanceLog>,
}
