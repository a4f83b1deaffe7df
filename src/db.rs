use crate::config::Config;
use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

pub type DbPool = Pool<Sqlite>;

pub async fn create_pool(config: &Config) -> Result<DbPool> {
    let options = SqliteConnectOptions::new()
        .filename(&config.database.path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Pool backed by an in-memory database, used by the test suites.
pub async fn create_memory_pool() -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    // A single connection so every query sees the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Creates tables and indexes if they do not exist. Safe to run on every
/// startup; never drops or rewrites existing data.
pub async fn init_schema(pool: &DbPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS app_config (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS devices (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            device_code TEXT NOT NULL UNIQUE,
            name TEXT,
            latitude REAL,
            longitude REAL,
            registered_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS readings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            device_id INTEGER NOT NULL REFERENCES devices(id),
            ts TEXT NOT NULL,
            temperature REAL NOT NULL,
            pressure REAL NOT NULL,
            humidity REAL NOT NULL,
            rain_chance REAL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Keeps `latest` at O(log n) per device as reading volume grows.
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_readings_device_ts
         ON readings (device_id, ts DESC, id DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
