use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::auth::api_key::ApiKey;
use crate::error::ApiError;
use crate::model::attendance::{EventKind, NewAttendanceLog};
use crate::stats::{format_time, parse_date, parse_time};
use crate::store::Repository;

/// Event pushed by the recognition client.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SyncRequest {
    #[schema(example = "Ana")]
    pub name: Option<String>,
    #[schema(example = "2026-01-05", format = "date")]
    pub date: Option<String>,
    #[schema(example = "09:10:00")]
    pub time: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "check_in")]
    pub kind: Option<String>,
}

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SyncRequest {
    fn validate(&self) -> Result<NewAttendanceLog, ApiError> {
        let (Some(name), Some(date), Some(time)) =
            (required(&self.name), required(&self.date), required(&self.time))
        else {
            return Err(ApiError::Validation("Missing required fields".into()));
        };

        let kind = match required(&self.kind) {
            Some(raw) => Some(raw.parse::<EventKind>().map_err(|_| {
                ApiError::Validation("Invalid type. Allowed: check_in, check_out".into())
            })?),
            None => None,
        };

        Ok(NewAttendanceLog {
            name: name.to_string(),
            date: parse_date(date)?,
            time: parse_time(time)?,
            kind,
        })
    }
}

/// Record one attendance event
#[utoipa::path(
    post,
    path = "/api/sync",
    request_body = SyncRequest,
    responses(
        (status = 200, description = "Event stored", body = Object, example = json!({
            "success": true,
            "mock": false
        })),
        (status = 400, description = "Missing or malformed fields", body = Object, example = json!({
            "error": "Missing required fields"
        })),
        (status = 401, description = "Missing or wrong x-api-key"),
        (status = 500, description = "Database error")
    ),
    security(
        ("api_key" = [])
    ),
    tag = "Attendance"
)]
pub async fn sync_event(
    _key: ApiKey,
    repo: web::Data<Repository>,
    payload: web::Json<SyncRequest>,
) -> Result<HttpResponse, ApiError> {
    let new = payload.validate()?;

    let log = repo.events.insert(new).await?;

    info!(
        id = %log.id,
        name = %log.name,
        date = %log.date,
        time = %format_time(log.time),
        mock = repo.is_mock(),
        "Attendance recorded"
    );

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "mock": repo.is_mock()
    })))
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{self, API_KEY};
    use crate::store::LogFilter;
    use actix_web::{http::StatusCode, test as http_test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn rejects_missing_or_wrong_key() {
        let (repo, config) = testing::fixtures();
        let app = crate::test_app!(repo, config);

        let body = json!({ "name": "Ana", "date": "2026-01-05", "time": "09:00" });

        let req = testing::post("/api/sync").set_json(&body).to_request();
        assert_eq!(http_test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = testing::post("/api/sync")
            .insert_header(("x-api-key", "nope"))
            .set_json(&body)
            .to_request();
        assert_eq!(http_test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        assert_eq!(repo.events.count().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn unconfigured_secret_rejects_everything() {
        let (repo, mut config) = testing::fixtures();
        config.api_secret_key = None;
        let app = crate::test_app!(repo, config);

        let req = testing::post("/api/sync")
            .insert_header(("x-api-key", ""))
            .set_json(json!({ "name": "Ana", "date": "2026-01-05", "time": "09:00" }))
            .to_request();
        assert_eq!(http_test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn validates_fields() {
        let (repo, config) = testing::fixtures();
        let app = crate::test_app!(repo, config);

        let cases = [
            json!({ "name": "Ana", "date": "2026-01-05" }),
            json!({ "name": "  ", "date": "2026-01-05", "time": "09:00" }),
            json!({ "name": "Ana", "date": "05/01/2026", "time": "09:00" }),
            json!({ "name": "Ana", "date": "2026-01-05", "time": "9am" }),
            json!({ "name": "Ana", "date": "2026-01-05", "time": "09:00", "type": "lunch" }),
        ];

        for body in cases {
            let req = testing::post("/api/sync")
                .insert_header(("x-api-key", API_KEY))
                .set_json(&body)
                .to_request();
            let resp = http_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
        }

        assert_eq!(repo.events.count().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn stores_normalized_event() {
        let (repo, config) = testing::fixtures();
        let app = crate::test_app!(repo, config);

        let req = testing::post("/api/sync")
            .insert_header(("x-api-key", API_KEY))
            .set_json(json!({ "name": "Ana", "date": "2026-01-05", "time": "9:05", "type": "check_out" }))
            .to_request();
        let body: Value = http_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "success": true, "mock": true }));

        let stored = repo.events.query(&LogFilter::all()).await.unwrap();
        assert_eq!(stored.len(), 1);
        let json = serde_json::to_value(&stored[0]).unwrap();
        assert_eq!(json["time"], "09:05:00");
        assert_eq!(json["type"], "check_out");
    }

    #[actix_web::test]
    async fn malformed_body_gets_json_error() {
        let (repo, config) = testing::fixtures();
        let app = crate::test_app!(repo, config);

        let req = testing::post("/api/sync")
            .insert_header(("x-api-key", API_KEY))
            .insert_header(("content-type", "application/json"))
            .set_payload("{name: Ana}")
            .to_request();
        let resp = http_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = http_test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn accepts_body_without_content_type() {
        let (repo, config) = testing::fixtures();
        let app = crate::test_app!(repo, config);

        let req = testing::post("/api/sync")
            .insert_header(("x-api-key", API_KEY))
            .set_payload(r#"{"name":"Ana","date":"2026-01-05","time":"09:00"}"#)
            .to_request();
        let resp = http_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(repo.events.count().await.unwrap(), 1);
    }
}
