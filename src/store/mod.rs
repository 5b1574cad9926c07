use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use derive_more::{Display, Error};
use sqlx::MySqlPool;

use crate::model::attendance::{AttendanceLog, NewAttendanceLog};
use crate::model::settings::Settings;
use crate::stats::StatsError;

mod memory;
mod mysql;

pub use memory::{MemoryAttendanceStore, MemorySettingsStore};
pub use mysql::{MySqlAttendanceStore, MySqlSettingsStore};

#[derive(Debug, Display, Error)]
pub enum StoreError {
    #[display(fmt = "database error: {}", _0)]
    Database(#[error(source)] sqlx::Error),
    #[display(fmt = "corrupt {}: {}", what, source)]
    Corrupt {
        what: String,
        #[error(source)]
        source: StatsError,
    },
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e)
    }
}

/// Event query. Every bound is optional; dates are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub name: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub limit: Option<u32>,
}

impl LogFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn employee(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, log: &AttendanceLog) -> bool {
        self.name.as_deref().is_none_or(|name| log.name == name)
            && self.start.is_none_or(|start| log.date >= start)
            && self.end.is_none_or(|end| log.date <= end)
    }
}

/// Append-only attendance log.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn insert(&self, new: NewAttendanceLog) -> Result<AttendanceLog, StoreError>;

    /// Matching events ordered by `(date desc, time desc)`.
    async fn query(&self, filter: &LogFilter) -> Result<Vec<AttendanceLog>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Stored settings merged over the defaults.
    async fn get(&self) -> Result<Settings, StoreError>;

    async fn put(&self, settings: &Settings) -> Result<(), StoreError>;
}

/// Storage handles shared by every request. Built once at startup.
#[derive(Clone)]
pub struct Repository {
    pub events: Arc<dyn AttendanceStore>,
    pub settings: Arc<dyn SettingsStore>,
    mock: bool,
}

impl Repository {
    pub fn mysql(pool: MySqlPool) -> Self {
        Self {
            events: Arc::new(MySqlAttendanceStore::new(pool.clone())),
            settings: Arc::new(MySqlSettingsStore::new(pool)),
            mock: false,
        }
    }

    /// True when running on the in-memory fallback.
    pub fn is_mock(&self) -> bool {
        self.mock
    }

    pub fn in_memory() -> Self {
        Self {
            events: Arc::new(MemoryAttendanceStore::default()),
            settings: Arc::new(MemorySettingsStore::default()),
            mock: true,
        }
    }
}
