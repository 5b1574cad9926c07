use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use chrono::{FixedOffset, Offset, Utc};
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    /// Unset means mock mode: events and settings live in memory
    pub database_url: Option<String>,
    /// Shared secret expected in `x-api-key`; unset rejects every protected call
    pub api_secret_key: Option<String>,
    pub registration_server_url: String,
    pub registration_timeout: Duration,

    /// Offset of the timezone used for "today" (UTC+5 by default)
    pub utc_offset_minutes: i32,

    // Rate limiting
    pub rate_sync_per_min: u32,
    pub rate_register_per_min: u32,

    pub api_prefix: String,
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8080".to_string(),
            database_url: None,
            api_secret_key: None,
            registration_server_url: "http://localhost:5000".to_string(),
            registration_timeout: Duration::from_secs(30),
            utc_offset_minutes: 5 * 60,
            rate_sync_per_min: 600,
            rate_register_per_min: 30,
            api_prefix: "/api".to_string(),
            log_dir: "logs".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        let defaults = Config::default();

        let config = Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or(defaults.server_addr),
            database_url: optional("DATABASE_URL"),
            api_secret_key: optional("API_SECRET_KEY"),
            registration_server_url: env::var("REGISTRATION_SERVER_URL")
                .unwrap_or(defaults.registration_server_url),
            registration_timeout: Duration::from_secs(parse_or(
                "REGISTRATION_TIMEOUT_SECS",
                defaults.registration_timeout.as_secs(),
            )?),
            utc_offset_minutes: parse_or("UTC_OFFSET_MINUTES", defaults.utc_offset_minutes)?,
            rate_sync_per_min: parse_or("RATE_SYNC_PER_MIN", defaults.rate_sync_per_min)?,
            rate_register_per_min: parse_or(
                "RATE_REGISTER_PER_MIN",
                defaults.rate_register_per_min,
            )?,
            api_prefix: env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
        };

        // fail at startup rather than on the first request
        config.reference_offset_checked()?;

        Ok(config)
    }

    fn reference_offset_checked(&self) -> anyhow::Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .ok_or_else(|| anyhow!("UTC_OFFSET_MINUTES out of range: {}", self.utc_offset_minutes))
    }

    /// Timezone in which "today" is evaluated.
    pub fn reference_offset(&self) -> FixedOffset {
        self.reference_offset_checked()
            .unwrap_or_else(|_| Utc.fix())
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        Err(_) => Ok(default),
    }
}
