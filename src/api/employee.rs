use actix_web::{HttpResponse, web};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

use crate::config::Config;
use crate::error::ApiError;
use crate::model::attendance::AttendanceLog;
use crate::model::summary::EmployeeDetail;
use crate::stats::{self, StatsContext};
use crate::store::{LogFilter, Repository};
use crate::utils::period::{self, DateRange};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// Month to summarize as `YYYY-MM`; defaults to the current month
    pub month: Option<String>,
}

/// Statistics window and its absence denominator.
///
/// The current month runs up to today and is measured against today's day of
/// month. A past month is measured against its full length.
fn stats_window(month: Option<&str>, today: NaiveDate) -> Result<(DateRange, u32), ApiError> {
    let range = match month {
        Some(raw) => period::parse_month(raw)?,
        None => period::month_of(today),
    };

    if range.contains(today) {
        return Ok((
            DateRange {
                start: range.start,
                end: today,
            },
            today.day(),
        ));
    }

    if range.start > today {
        return Err(ApiError::Validation("month is in the future".into()));
    }

    Ok((range, range.len_days()))
}

/// Month-to-date summaries for every employee seen this month
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "Summaries ordered by name", body = [crate::model::summary::EmployeeSummary]),
        (status = 500, description = "Database error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    repo: web::Data<Repository>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let today = period::today(config.reference_offset());
    let (window, reference_days) = stats_window(None, today)?;

    let settings = repo.settings.get().await?;
    let logs = repo
        .events
        .query(&LogFilter::between(window.start, window.end))
        .await?;

    let summaries = stats::summarize(&logs, &settings, &StatsContext::new(today, reference_days));
    debug!(employees = summaries.len(), events = logs.len(), "Computed employee summaries");

    Ok(HttpResponse::Ok().json(summaries))
}

/// Statistics, daily windows and full history for one employee
#[utoipa::path(
    get,
    path = "/api/employees/{name}",
    params(
        ("name", Path, description = "Employee name as reported by the recognition client"),
        EmployeeQuery
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeDetail),
        (status = 400, description = "Malformed or future month"),
        (status = 404, description = "No events recorded for this name", body = Object, example = json!({
            "error": "Not found"
        })),
        (status = 500, description = "Database error")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    repo: web::Data<Repository>,
    config: web::Data<Config>,
    path: web::Path<String>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, ApiError> {
    let name = path.into_inner();
    let today = period::today(config.reference_offset());
    let (window, reference_days) = stats_window(query.month.as_deref(), today)?;

    let settings = repo.settings.get().await?;
    let logs = repo
        .events
        .query(&LogFilter::all().employee(name.clone()))
        .await?;

    if logs.is_empty() {
        return Err(ApiError::NotFound);
    }

    let in_window: Vec<&AttendanceLog> = logs.iter().filter(|l| window.contains(l.date)).collect();
    let ctx = StatsContext::new(today, reference_days);

    let summary = stats::summarize_employee(&name, in_window.iter().copied(), &settings, &ctx);
    let days = stats::daily_windows(in_window.iter().copied())
        .into_values()
        .rev()
        .collect();

    Ok(HttpResponse::Ok().json(EmployeeDetail {
        summary,
        days,
        logs,
    }))
}
