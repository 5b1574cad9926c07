use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::Config;
use crate::error::ApiError;
use crate::model::attendance::AttendanceLog;
use crate::stats::{self, parse_date};
use crate::store::{LogFilter, Repository};
use crate::utils::period;

const RECENT_LIMIT: u32 = 20;

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    /// Distinct employees with an event today
    #[schema(example = 12)]
    pub present_today: usize,
    #[schema(example = 348)]
    pub total_entries: u64,
    /// Latest events, newest first
    pub recent: Vec<AttendanceLog>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct LogsQuery {
    /// Earliest day, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Latest day, `YYYY-MM-DD`
    pub end_date: Option<String>,
}

/// Today's headcount and recent activity
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard figures", body = DashboardResponse),
        (status = 500, description = "Database error")
    ),
    tag = "Attendance"
)]
pub async fn dashboard(
    repo: web::Data<Repository>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let today = period::today(config.reference_offset());

    let todays = repo.events.query(&LogFilter::between(today, today)).await?;
    let total_entries = repo.events.count().await?;
    let recent = repo
        .events
        .query(&LogFilter::all().limit(RECENT_LIMIT))
        .await?;

    Ok(HttpResponse::Ok().json(DashboardResponse {
        present_today: stats::present_on(&todays, today),
        total_entries,
        recent,
    }))
}

/// Raw attendance events, newest first
#[utoipa::path(
    get,
    path = "/api/logs",
    params(LogsQuery),
    responses(
        (status = 200, description = "Matching events", body = [AttendanceLog]),
        (status = 400, description = "Malformed date"),
        (status = 500, description = "Database error")
    ),
    tag = "Attendance"
)]
pub async fn list_logs(
    repo: web::Data<Repository>,
    query: web::Query<LogsQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = LogFilter {
        start: query.start_date.as_deref().map(parse_date).transpose()?,
        end: query.end_date.as_deref().map(parse_date).transpose()?,
        ..LogFilter::default()
    };

    let logs = repo.events.query(&filter).await?;
    Ok(HttpResponse::Ok().json(logs))
}
