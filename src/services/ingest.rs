use crate::error::{AppError, Result};
use crate::models::{Device, LatestReadingResponse, Reading, SensorPayload};
use crate::repositories::ReadingRepository;
use crate::services::DeviceRegistry;
use chrono::Utc;

// Physical bounds for accepted payloads. Values outside these are sensor
// faults, not weather.
const TEMPERATURE_RANGE: (f64, f64) = (-90.0, 60.0);
const PRESSURE_RANGE: (f64, f64) = (300.0, 1100.0);
const HUMIDITY_RANGE: (f64, f64) = (0.0, 100.0);
const RAIN_CHANCE_RANGE: (f64, f64) = (0.0, 1.0);

/// The authenticated write path: each call runs one reading through the
/// authenticate, validate, commit gates and rejects at the first failing
/// gate. Nothing is stored unless all gates pass.
#[derive(Clone)]
pub struct IngestionService {
    registry: DeviceRegistry,
    readings: ReadingRepository,
}

impl IngestionService {
    pub fn new(registry: DeviceRegistry, readings: ReadingRepository) -> Self {
        Self { registry, readings }
    }

    /// Raw write path for the HTTP endpoint: authentication runs before the
    /// body is even parsed, so an unknown device code is always an auth
    /// failure no matter what shape the payload is. Parse failures count as
    /// validation errors, like out-of-range values.
    pub async fn ingest_raw(&self, device_code: &str, body: &[u8]) -> Result<Reading> {
        let device = self.registry.authenticate(device_code).await?;

        let payload: SensorPayload = serde_json::from_slice(body)
            .map_err(|e| AppError::Validation(format!("Malformed sensor payload: {}", e)))?;

        self.commit(device, payload).await
    }

    /// Typed write path for callers that already hold a payload.
    pub async fn ingest(&self, device_code: &str, payload: SensorPayload) -> Result<Reading> {
        let device = self.registry.authenticate(device_code).await?;

        self.commit(device, payload).await
    }

    async fn commit(&self, device: Device, payload: SensorPayload) -> Result<Reading> {
        validate_payload(&payload)?;

        let ts = payload.timestamp.unwrap_or_else(Utc::now);

        let reading = self
            .readings
            .insert(
                device.id,
                ts,
                payload.temperature,
                payload.pressure,
                payload.humidity,
                payload.rain_chance,
            )
            .await?;

        tracing::info!(
            device_id = device.id,
            reading_id = reading.id,
            "Reading committed"
        );

        Ok(reading)
    }

    /// Latest reading for a device, or NotFound when it has none yet.
    pub async fn latest(&self, device_id: i64) -> Result<LatestReadingResponse> {
        let device = self.registry.get(device_id).await?;

        let reading = self
            .readings
            .find_latest(device_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No readings for device {}", device_id))
            })?;

        Ok(LatestReadingResponse {
            device_id: device.id,
            device_name: device.name,
            temperature: reading.temperature,
            pressure: reading.pressure,
            humidity: reading.humidity,
            rain_chance: reading.rain_chance,
            timestamp: reading.ts,
        })
    }
}

fn validate_payload(payload: &SensorPayload) -> Result<()> {
    check_range("temperature", payload.temperature, TEMPERATURE_RANGE)?;
    check_range("pressure", payload.pressure, PRESSURE_RANGE)?;
    check_range("humidity", payload.humidity, HUMIDITY_RANGE)?;

    if let Some(rain_chance) = payload.rain_chance {
        check_range("rain_chance", rain_chance, RAIN_CHANCE_RANGE)?;
    }

    Ok(())
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    if !value.is_finite() {
        return Err(AppError::Validation(format!("{} must be a finite number", field)));
    }

    if value < min || value > max {
        return Err(AppError::Validation(format!(
            "{} must be between {} and {}, got {}",
            field, min, max, value
        )));
    }

    Ok(())
}
