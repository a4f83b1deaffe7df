use rainwatch_api::db::{create_memory_pool, init_schema, DbPool};
use rainwatch_api::models::SensorPayload;
use rainwatch_api::repositories::{DeviceRepository, ReadingRepository};
use rainwatch_api::routes::AppState;
use rainwatch_api::services::{DeviceRegistry, IngestionService};

/// In-memory database with the full schema applied. Each call returns an
/// isolated database.
pub async fn setup_test_pool() -> DbPool {
    let pool = create_memory_pool().await.expect("Failed to create test pool");
    init_schema(&pool).await.expect("Failed to init schema");
    pool
}

pub fn build_services(pool: DbPool) -> (DeviceRegistry, IngestionService) {
    let registry = DeviceRegistry::new(DeviceRepository::new(pool.clone()));
    let ingestion = IngestionService::new(registry.clone(), ReadingRepository::new(pool));
    (registry, ingestion)
}

pub const TEST_SECRET: &str = "test-provisioning-secret";

pub async fn setup_test_state() -> AppState {
    let pool = setup_test_pool().await;
    let (registry, ingestion) = build_services(pool);
    AppState {
        registry,
        ingestion,
        secret: TEST_SECRET.to_string(),
    }
}

pub fn sensor_payload(temperature: f64, humidity: f64, rain_chance: f64) -> SensorPayload {
    SensorPayload {
        temperature,
        pressure: 1012.0,
        humidity,
        rain_chance: Some(rain_chance),
        timestamp: None,
    }
}
