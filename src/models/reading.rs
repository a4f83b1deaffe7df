use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One stored sensor reading. Immutable once written; the readings table is
/// append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reading {
    pub id: i64,
    pub device_id: i64,
    pub ts: DateTime<Utc>,
    pub temperature: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub rain_chance: Option<f64>,
}

/// Inbound sensor payload from a device. The timestamp is optional; the
/// server assigns its own clock when it is omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorPayload {
    pub temperature: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub rain_chance: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Summary returned to the device after a committed ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredReadingResponse {
    pub id: i64,
    pub device_id: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestReadingResponse {
    pub device_id: i64,
    pub device_name: Option<String>,
    pub temperature: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub rain_chance: Option<f64>,
    pub timestamp: DateTime<Utc>,
}
