use anyhow::Context;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;

pub async fn init_db(database_url: &str) -> anyhow::Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    init_schema(&pool)
        .await
        .context("Failed to create tables")?;

    Ok(pool)
}

/// Creates the attendance and settings tables when missing.
pub async fn init_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_logs (
            id CHAR(36) NOT NULL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            date VARCHAR(10) NOT NULL,
            time VARCHAR(8) NOT NULL,
            kind VARCHAR(16) NULL,
            synced_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
            INDEX idx_attendance_date_time (date, time),
            INDEX idx_attendance_name_date (name, date)
        )
        "#,
    )
    .execute(pool)
    .await?;
    info!("Table \"attendance_logs\" ready");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS system_settings (
            `key` VARCHAR(64) NOT NULL PRIMARY KEY,
            value VARCHAR(32) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    info!("Table \"system_settings\" ready");

    Ok(())
}
