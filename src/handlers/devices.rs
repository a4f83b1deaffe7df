use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};

use crate::auth;
use crate::error::Result;
use crate::models::{Device, DeviceInfo, LatestReadingResponse, RegisterDeviceRequest};
use crate::routes::AppState;

/// GET /api/devices
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<DeviceInfo>>> {
    let devices = state.registry.list_devices().await?;

    Ok(Json(devices.into_iter().map(DeviceInfo::from).collect()))
}

/// GET /api/devices/{device_id}/latest
pub async fn latest(
    State(state): State<AppState>,
    Path(device_id): Path<i64>,
) -> Result<Json<LatestReadingResponse>> {
    let reading = state.ingestion.latest(device_id).await?;

    Ok(Json(reading))
}

/// POST /api/devices
/// Provisioning endpoint, gated on the process secret. Registering an
/// already-known code returns the existing device with 200 instead of 201.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RegisterDeviceRequest>,
) -> Result<(StatusCode, Json<Device>)> {
    auth::require_provisioning(&headers, &state.secret)?;

    let (device, created) = state
        .registry
        .register(
            &request.device_code,
            request.name.as_deref(),
            request.latitude,
            request.longitude,
        )
        .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(device)))
}
