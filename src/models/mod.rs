pub mod device;
pub mod reading;

pub use device::{Device, DeviceInfo, RegisterDeviceRequest};
pub use reading::{LatestReadingResponse, Reading, SensorPayload, StoredReadingResponse};
