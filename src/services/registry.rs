use crate::error::{AppError, Result};
use crate::models::Device;
use crate::repositories::DeviceRepository;

/// Maps opaque device codes to device identities. Pure lookups and
/// registry mutation only; no network calls.
#[derive(Clone)]
pub struct DeviceRegistry {
    devices: DeviceRepository,
}

impl DeviceRegistry {
    pub fn new(devices: DeviceRepository) -> Self {
        Self { devices }
    }

    /// Resolves a presented device code. Unknown codes fail authentication;
    /// a device is never created here.
    pub async fn authenticate(&self, device_code: &str) -> Result<Device> {
        self.devices
            .find_by_code(device_code)
            .await?
            .ok_or_else(|| AppError::Auth(format!("Unknown device code: {}", device_code)))
    }

    /// Idempotent: registering an existing code returns the existing device
    /// unchanged. The bool reports whether this call created the device.
    pub async fn register(
        &self,
        device_code: &str,
        name: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<(Device, bool)> {
        if device_code.trim().is_empty() {
            return Err(AppError::Validation("device_code must not be empty".to_string()));
        }

        self.devices
            .insert_or_get(device_code, name, latitude, longitude)
            .await
    }

    pub async fn get(&self, device_id: i64) -> Result<Device> {
        self.devices
            .find_by_id(device_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Device {} not found", device_id)))
    }

    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        self.devices.list().await
    }
}
