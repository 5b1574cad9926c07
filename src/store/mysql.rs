use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use tracing::debug;

use super::{AttendanceStore, LogFilter, SettingsStore, StoreError};
use crate::model::attendance::{AttendanceLog, AttendanceRow, NewAttendanceLog};
use crate::model::settings::Settings;
use crate::stats::{format_date, format_time};

pub struct MySqlAttendanceStore {
    pool: MySqlPool,
}

impl MySqlAttendanceStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for MySqlAttendanceStore {
    async fn insert(&self, new: NewAttendanceLog) -> Result<AttendanceLog, StoreError> {
        let log = new.into_log(Utc::now());

        sqlx::query(
            r#"
            INSERT INTO attendance_logs (id, name, date, time, kind, synced_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&log.id)
        .bind(&log.name)
        .bind(format_date(log.date))
        .bind(format_time(log.time))
        .bind(log.kind.map(|kind| kind.as_ref().to_string()))
        .bind(log.synced_at)
        .execute(&self.pool)
        .await?;

        Ok(log)
    }

    async fn query(&self, filter: &LogFilter) -> Result<Vec<AttendanceLog>, StoreError> {
        // -------------------------
        // WHERE clause
        // -------------------------
        let mut where_sql = String::from(" WHERE 1=1");
        let mut args: Vec<String> = Vec::new();

        if let Some(name) = &filter.name {
            where_sql.push_str(" AND name = ?");
            args.push(name.clone());
        }

        // date is zero-padded text, so string bounds are date bounds
        if let Some(start) = filter.start {
            where_sql.push_str(" AND date >= ?");
            args.push(format_date(start));
        }

        if let Some(end) = filter.end {
            where_sql.push_str(" AND date <= ?");
            args.push(format_date(end));
        }

        let mut sql = format!(
            "SELECT id, name, date, time, kind, synced_at FROM attendance_logs{} ORDER BY date DESC, time DESC",
            where_sql
        );
        if filter.limit.is_some() {
            sql.push_str(" LIMIT ?");
        }

        debug!(sql = %sql, args = ?args, "Fetching attendance logs");

        let mut query = sqlx::query_as::<_, AttendanceRow>(&sql);
        for arg in &args {
            query = query.bind(arg);
        }
        if let Some(limit) = filter.limit {
            query = query.bind(limit);
        }

        let rows = query.fetch_all(&self.pool).await?;

        rows.into_iter()
            .map(|row| {
                let what = format!("attendance row {}", row.id);
                AttendanceLog::try_from(row).map_err(|source| StoreError::Corrupt { what, source })
            })
            .collect()
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance_logs")
            .fetch_one(&self.pool)
            .await?;

        Ok(total.max(0) as u64)
    }
}

pub struct MySqlSettingsStore {
    pool: MySqlPool,
}

impl MySqlSettingsStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for MySqlSettingsStore {
    async fn get(&self) -> Result<Settings, StoreError> {
        let rows = sqlx::query_as::<_, (String, String)>("SELECT `key`, value FROM system_settings")
            .fetch_all(&self.pool)
            .await?;

        Settings::load_with_defaults(rows).map_err(|source| StoreError::Corrupt {
            what: "system_settings".to_string(),
            source,
        })
    }

    async fn put(&self, settings: &Settings) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        for (key, value) in settings.to_pairs() {
            sqlx::query(
                r#"
                INSERT INTO system_settings (`key`, value)
                VALUES (?, ?)
                ON DUPLICATE KEY UPDATE value = VALUES(value)
                "#,
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
