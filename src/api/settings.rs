use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::auth::api_key::ApiKey;
use crate::error::ApiError;
use crate::model::settings::{KEY_OVERTIME_THRESHOLD, KEY_STANDARD_CHECK_IN, KEY_STANDARD_CHECK_OUT};
use crate::store::Repository;

/// Partial update; omitted fields keep their current value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSettings {
    #[schema(example = "08:30")]
    pub standard_check_in: Option<String>,
    #[schema(example = "17:30")]
    pub standard_check_out: Option<String>,
    #[schema(example = "21:00")]
    pub overtime_threshold: Option<String>,
}

impl UpdateSettings {
    fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (KEY_STANDARD_CHECK_IN, &self.standard_check_in),
            (KEY_STANDARD_CHECK_OUT, &self.standard_check_out),
            (KEY_OVERTIME_THRESHOLD, &self.overtime_threshold),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
    }
}

/// Current attendance rules
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Stored settings merged over defaults", body = crate::model::settings::Settings),
        (status = 500, description = "Database error")
    ),
    tag = "Settings"
)]
pub async fn get_settings(repo: web::Data<Repository>) -> Result<HttpResponse, ApiError> {
    let settings = repo.settings.get().await?;
    Ok(HttpResponse::Ok().json(settings))
}

/// Update attendance rules
#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpdateSettings,
    responses(
        (status = 200, description = "Settings updated", body = crate::model::settings::Settings),
        (status = 400, description = "Malformed time of day", body = Object, example = json!({
            "error": "invalid time of day: \"25:00\""
        })),
        (status = 401, description = "Missing or wrong x-api-key"),
        (status = 500, description = "Database error")
    ),
    security(
        ("api_key" = [])
    ),
    tag = "Settings"
)]
pub async fn update_settings(
    _key: ApiKey,
    repo: web::Data<Repository>,
    payload: web::Json<UpdateSettings>,
) -> Result<HttpResponse, ApiError> {
    let mut settings = repo.settings.get().await?;
    settings.merge(payload.pairs())?;

    repo.settings.put(&settings).await?;
    info!(?settings, "Settings updated");

    Ok(HttpResponse::Ok().json(settings))
}
