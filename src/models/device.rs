use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered weather station, identified by its opaque device code.
/// Devices are flat records: sensor-kind differences live in the payload,
/// not in a type hierarchy. Devices are never deleted because historical
/// readings reference them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Device {
    pub id: i64,
    pub device_code: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub registered_at: DateTime<Utc>,
}

/// Public device listing entry, without the credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub id: i64,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<Device> for DeviceInfo {
    fn from(device: Device) -> Self {
        DeviceInfo {
            id: device.id,
            name: device.name,
            latitude: device.latitude,
            longitude: device.longitude,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterDeviceRequest {
    pub device_code: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
