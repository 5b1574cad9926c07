use actix_web::{HttpResponse, http::StatusCode, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::auth::api_key::ApiKey;
use crate::error::ApiError;
use crate::registration::{RegistrationClient, RegistrationError, RegistrationReply};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterEmployee {
    #[schema(example = "Ana Maria")]
    pub name: Option<String>,
}

/// Enroll a new employee with the face-registration service
#[utoipa::path(
    post,
    path = "/api/register-employee",
    request_body = RegisterEmployee,
    responses(
        (status = 200, description = "Registration accepted, upstream body forwarded", body = crate::registration::RegistrationOutcome),
        (status = 400, description = "Name missing", body = Object, example = json!({
            "error": "Name is required"
        })),
        (status = 401, description = "Missing or wrong x-api-key"),
        (status = 500, description = "Registration server unreachable", body = Object, example = json!({
            "success": false,
            "message": "Failed to connect to registration server. Make sure it is running."
        })),
        (status = 502, description = "Registration server answered with something other than JSON")
    ),
    security(
        ("api_key" = [])
    ),
    tag = "Registration"
)]
pub async fn register_employee(
    _key: ApiKey,
    client: web::Data<RegistrationClient>,
    payload: web::Json<RegisterEmployee>,
) -> Result<HttpResponse, ApiError> {
    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::Validation("Name is required".into()))?;

    match client.register(name).await {
        Ok(RegistrationReply::Accepted(body)) => {
            info!(name, "Registration forwarded");
            Ok(HttpResponse::Ok().json(body))
        }
        Ok(RegistrationReply::Rejected { status, body }) => {
            warn!(name, status, "Registration server rejected request");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            Ok(HttpResponse::build(status).json(body))
        }
        Err(e @ RegistrationError::Decode(_)) => {
            error!(name, error = %e, url = %client.endpoint(), "Registration reply unreadable");
            Ok(HttpResponse::BadGateway().json(json!({
                "success": false,
                "message": "Registration server returned an unreadable response."
            })))
        }
        Err(e @ RegistrationError::Transport(_)) => {
            error!(name, error = %e, url = %client.endpoint(), "Registration failed");
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Failed to connect to registration server. Make sure it is running."
            })))
        }
    }
}
