use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};
use tracing::{error, warn};

use crate::config::Config;
use crate::error::ApiError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Proof that the request carried the shared secret. Add it as a handler
/// argument to protect an endpoint.
pub struct ApiKey;

impl FromRequest for ApiKey {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                error!("App config missing");
                return ready(Err(ApiError::Internal));
            }
        };

        let Some(expected) = config.api_secret_key.as_deref() else {
            warn!(path = %req.path(), "API_SECRET_KEY not configured, rejecting request");
            return ready(Err(ApiError::Unauthorized));
        };

        let presented = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|h| h.to_str().ok());

        match presented {
            Some(key) if key == expected => ready(Ok(ApiKey)),
            _ => {
                warn!(path = %req.path(), "Rejected request with missing or bad API key");
                ready(Err(ApiError::Unauthorized))
            }
        }
    }
}
