use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

use crate::stats::StatsError;
use crate::store::StoreError;

/// Request-terminating failures. Server-side variants carry no detail; the
/// cause is logged where it happens.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "Unauthorized")]
    Unauthorized,

    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "Not found")]
    NotFound,

    #[display(fmt = "Database error")]
    Db,

    #[display(fmt = "Internal Server Error")]
    Internal,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Db | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        error!(error = %e, "Store operation failed");
        ApiError::Db
    }
}

/// Bad times or dates in request input.
impl From<StatsError> for ApiError {
    fn from(e: StatsError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_status_codes() {
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Validation("Missing required fields".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Db.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_detail_is_not_exposed() {
        let err = ApiError::from(StoreError::Corrupt {
            what: "attendance row 7".into(),
            source: StatsError::InvalidTimeFormat("25:99".into()),
        });
        assert_eq!(err.to_string(), "Database error");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_input_time_is_a_validation_error() {
        let err = ApiError::from(StatsError::InvalidTimeFormat("7pm".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "invalid time of day: \"7pm\"");
    }
}
