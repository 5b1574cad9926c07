//! Shared fixtures for handler tests.

use std::time::Duration;

use actix_web::test::TestRequest;
use chrono::NaiveDate;

use crate::config::Config;
use crate::model::attendance::NewAttendanceLog;
use crate::stats::{parse_date, parse_time};
use crate::store::Repository;

pub const API_KEY: &str = "test-secret";

pub fn fixtures() -> (Repository, Config) {
    let config = Config {
        api_secret_key: Some(API_KEY.to_string()),
        // nothing listens on the discard port
        registration_server_url: "http://127.0.0.1:9".to_string(),
        registration_timeout: Duration::from_secs(2),
        ..Config::default()
    };
    (Repository::in_memory(), config)
}

/// Rate-limited routes key on the peer address, so every request gets one.
pub fn get(uri: &str) -> TestRequest {
    TestRequest::get()
        .uri(uri)
        .peer_addr("127.0.0.1:40000".parse().unwrap())
}

pub fn post(uri: &str) -> TestRequest {
    TestRequest::post()
        .uri(uri)
        .peer_addr("127.0.0.1:40000".parse().unwrap())
}

pub fn put(uri: &str) -> TestRequest {
    TestRequest::put()
        .uri(uri)
        .peer_addr("127.0.0.1:40000".parse().unwrap())
}

pub async fn seed(repo: &Repository, name: &str, date: NaiveDate, time: &str) {
    repo.events
        .insert(NewAttendanceLog {
            name: name.to_string(),
            date,
            time: parse_time(time).unwrap(),
            kind: None,
        })
        .await
        .unwrap();
}

pub fn date(raw: &str) -> NaiveDate {
    parse_date(raw).unwrap()
}

/// Builds the full routed app over the given repository and config.
#[macro_export]
macro_rules! test_app {
    ($repo:expr, $config:expr) => {{
        let config: $crate::config::Config = $config.clone();
        let registration = $crate::registration::RegistrationClient::new(
            &config.registration_server_url,
            config.api_secret_key.clone(),
            config.registration_timeout,
        )
        .unwrap();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($repo.clone()))
                .app_data(actix_web::web::Data::new(config.clone()))
                .app_data(actix_web::web::Data::new(registration))
                .configure(|cfg| $crate::routes::configure(cfg, config.clone())),
        )
        .await
    }};
}
