use actix_web::{HttpResponse, http::header, web};
use chrono::NaiveDate;
use serde::Deserialize;
use strum_macros::EnumString;
use tracing::{error, info};
use utoipa::IntoParams;

use crate::config::Config;
use crate::error::ApiError;
use crate::stats::parse_date;
use crate::store::{LogFilter, Repository};
use crate::utils::period::{self, DateRange};
use crate::utils::spreadsheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ExportKind {
    Today,
    Week,
    Month,
    Custom,
    All,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    /// today | week | month | custom | all (default: today)
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// First day for `custom`, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Last day for `custom`, `YYYY-MM-DD`
    pub end_date: Option<String>,
}

/// Date range to export and the download file name.
#[derive(Debug, PartialEq, Eq)]
pub struct ExportPlan {
    pub range: Option<DateRange>,
    pub filename: String,
}

impl ExportQuery {
    /// Unknown types, and `custom` without both dates, export everything.
    pub fn plan(&self, today: NaiveDate) -> Result<ExportPlan, ApiError> {
        let kind = self
            .kind
            .as_deref()
            .unwrap_or("today")
            .parse()
            .unwrap_or(ExportKind::All);

        let plan = match kind {
            ExportKind::Custom => match (self.start_date.as_deref(), self.end_date.as_deref()) {
                (Some(start), Some(end)) => {
                    let range = DateRange {
                        start: parse_date(start)?,
                        end: parse_date(end)?,
                    };
                    if range.start > range.end {
                        return Err(ApiError::Validation(
                            "startDate cannot be after endDate".into(),
                        ));
                    }
                    ExportPlan {
                        filename: format!("attendance_{}_to_{}.xlsx", range.start, range.end),
                        range: Some(range),
                    }
                }
                _ => all(),
            },
            ExportKind::Today => ExportPlan {
                range: Some(DateRange::single(today)),
                filename: format!("attendance_{today}.xlsx"),
            },
            ExportKind::Week => {
                let range = period::week_of(today);
                ExportPlan {
                    filename: format!("attendance_week_{}_to_{}.xlsx", range.start, range.end),
                    range: Some(range),
                }
            }
            ExportKind::Month => {
                let range = period::month_of(today);
                ExportPlan {
                    filename: format!("attendance_month_{}_to_{}.xlsx", range.start, range.end),
                    range: Some(range),
                }
            }
            ExportKind::All => all(),
        };

        Ok(plan)
    }
}

fn all() -> ExportPlan {
    ExportPlan {
        range: None,
        filename: "attendance_all.xlsx".to_string(),
    }
}

/// Download attendance events as an Excel workbook
#[utoipa::path(
    get,
    path = "/api/export",
    params(ExportQuery),
    responses(
        (status = 200, description = "Spreadsheet with columns Name, Date, Time, Synced At",
         content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 400, description = "Malformed custom range"),
        (status = 500, description = "Export failed", body = Object, example = json!({
            "error": "Internal Server Error"
        }))
    ),
    tag = "Reports"
)]
pub async fn export(
    repo: web::Data<Repository>,
    config: web::Data<Config>,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse, ApiError> {
    let offset = config.reference_offset();
    let plan = query.plan(period::today(offset))?;

    let filter = match plan.range {
        Some(range) => LogFilter::between(range.start, range.end),
        None => LogFilter::all(),
    };
    let logs = repo.events.query(&filter).await?;

    let bytes = spreadsheet::render(&logs, offset).map_err(|e| {
        error!(error = %e, filename = %plan.filename, "Export failed");
        ApiError::Internal
    })?;

    info!(rows = logs.len(), filename = %plan.filename, "Exported attendance");

    Ok(HttpResponse::Ok()
        .content_type(spreadsheet::CONTENT_TYPE)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", plan.filename),
        ))
        .body(bytes))
}
