use crate::db::DbPool;
use crate::error::Result;
use crate::models::Device;
use chrono::Utc;

#[derive(Clone)]
pub struct DeviceRepository {
    pool: DbPool,
}

impl DeviceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_code(&self, device_code: &str) -> Result<Option<Device>> {
        let device = sqlx::query_as::<_, Device>(
            "SELECT id, device_code, name, latitude, longitude, registered_at
             FROM devices WHERE device_code = $1",
        )
        .bind(device_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(device)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Device>> {
        let device = sqlx::query_as::<_, Device>(
            "SELECT id, device_code, name, latitude, longitude, registered_at
             FROM devices WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(device)
    }

    /// Inserts the device unless its code is already registered. Returns the
    /// stored row either way, plus whether this call created it. An existing
    /// registration is never modified.
    pub async fn insert_or_get(
        &self,
        device_code: &str,
        name: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<(Device, bool)> {
        let result = sqlx::query(
            "INSERT INTO devices (device_code, name, latitude, longitude, registered_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT(device_code) DO NOTHING",
        )
        .bind(device_code)
        .bind(name)
        .bind(latitude)
        .bind(longitude)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let created = result.rows_affected() > 0;

        let device = self.find_by_code(device_code).await?.ok_or_else(|| {
            crate::error::AppError::Internal(format!(
                "Device {} missing immediately after upsert",
                device_code
            ))
        })?;

        Ok((device, created))
    }

    /// All registered devices, ordered by id so the listing is stable within
    /// a snapshot.
    pub async fn list(&self) -> Result<Vec<Device>> {
        let devices = sqlx::query_as::<_, Device>(
            "SELECT id, device_code, name, latitude, longitude, registered_at
             FROM devices ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(devices)
    }
}
