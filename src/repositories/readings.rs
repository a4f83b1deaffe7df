use crate::db::DbPool;
use crate::error::Result;
use crate::models::Reading;
use chrono::{DateTime, Utc};

#[derive(Clone)]
pub struct ReadingRepository {
    pool: DbPool,
}

impl ReadingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Appends one reading in a single statement, so a reading is either
    /// fully stored or not stored at all.
    pub async fn insert(
        &self,
        device_id: i64,
        ts: DateTime<Utc>,
        temperature: f64,
        pressure: f64,
        humidity: f64,
        rain_chance: Option<f64>,
    ) -> Result<Reading> {
        let reading = sqlx::query_as::<_, Reading>(
            "INSERT INTO readings (device_id, ts, temperature, pressure, humidity, rain_chance)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, device_id, ts, temperature, pressure, humidity, rain_chance",
        )
        .bind(device_id)
        .bind(ts)
        .bind(temperature)
        .bind(pressure)
        .bind(humidity)
        .bind(rain_chance)
        .fetch_one(&self.pool)
        .await?;

        Ok(reading)
    }

    /// Greatest timestamp wins; equal timestamps fall back to insertion
    /// order. Served by the (device_id, ts, id) index.
    pub async fn find_latest(&self, device_id: i64) -> Result<Option<Reading>> {
        let reading = sqlx::query_as::<_, Reading>(
            "SELECT id, device_id, ts, temperature, pressure, humidity, rain_chance
             FROM readings WHERE device_id = $1
             ORDER BY ts DESC, id DESC LIMIT 1",
        )
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reading)
    }
}
