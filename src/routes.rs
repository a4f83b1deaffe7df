use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::devices;
use crate::handlers::sensor_data;
use crate::services::{DeviceRegistry, IngestionService};

#[derive(Clone)]
pub struct AppState {
    pub registry: DeviceRegistry,
    pub ingestion: IngestionService,
    pub secret: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(sensor_data::health))
        .route("/api/sensor-data", post(sensor_data::submit))
        .route("/api/devices", get(devices::list).post(devices::register))
        .route("/api/devices/{device_id}/latest", get(devices::latest))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
