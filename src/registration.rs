//! Client for the face-registration service that enrolls new employees.

use std::time::Duration;

use derive_more::{Display, Error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;
use utoipa::ToSchema;

use crate::auth::api_key::API_KEY_HEADER;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegistrationOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    /// Captured face image, when the service returns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Upstream answer. Both variants carry the body untouched so it can be
/// forwarded; [`RegistrationOutcome`] documents the usual 2xx shape.
#[derive(Debug)]
pub enum RegistrationReply {
    Accepted(Value),
    Rejected { status: u16, body: Value },
}

#[derive(Debug, Display, Error)]
pub enum RegistrationError {
    #[display(fmt = "registration server unreachable: {}", _0)]
    Transport(#[error(source)] reqwest::Error),
    #[display(fmt = "unreadable registration response: {}", _0)]
    Decode(#[error(source)] reqwest::Error),
}

#[derive(Clone)]
pub struct RegistrationClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RegistrationClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/register-employee", self.base_url)
    }

    pub async fn register(&self, name: &str) -> Result<RegistrationReply, RegistrationError> {
        let url = self.endpoint();
        debug!(url = %url, name, "Forwarding employee registration");

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.as_deref().unwrap_or_default())
            .json(&json!({ "name": name }))
            .send()
            .await
            .map_err(RegistrationError::Transport)?;

        let status = response.status();
        let body = response
            .json::<Value>()
            .await
            .map_err(RegistrationError::Decode)?;

        if status.is_success() {
            return Ok(RegistrationReply::Accepted(body));
        }

        Ok(RegistrationReply::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let client =
            RegistrationClient::new("http://faces.local:5000/", None, Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.endpoint(), "http://faces.local:5000/register-employee");
    }

    #[test]
    fn outcome_tolerates_missing_optional_fields() {
        let outcome: RegistrationOutcome =
            serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(outcome.success);
        assert!(outcome.message.is_empty());
        assert_eq!(outcome.image, None);
    }
}
