use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};

use crate::error::{AppError, Result};
use crate::models::StoredReadingResponse;
use crate::routes::AppState;

pub const DEVICE_CODE_HEADER: &str = "deviceCode";

/// POST /api/sensor-data
/// Authenticated device write path. Returns 201 with the stored reading's
/// identifier and timestamp once the append has committed. The body is taken
/// as raw bytes so the auth gate fires before any payload parsing; an
/// ill-shaped body from an unknown device is still a 401, not a 422.
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<StoredReadingResponse>)> {
    let device_code = headers
        .get(DEVICE_CODE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Auth("Missing deviceCode header".to_string()))?;

    let reading = state.ingestion.ingest_raw(device_code, &body).await?;

    Ok((
        StatusCode::CREATED,
        Json(StoredReadingResponse {
            id: reading.id,
            device_id: reading.device_id,
            timestamp: reading.ts,
        }),
    ))
}

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}
