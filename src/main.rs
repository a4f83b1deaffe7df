use rainwatch_api::repositories::{DeviceRepository, ReadingRepository};
use rainwatch_api::services::{DeviceRegistry, IngestionService};
use rainwatch_api::{auth, create_pool, init_schema, routes, AppState, Config};

use anyhow::Result;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rainwatch_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting rainwatch-api");

    // Load configuration
    let config = Config::from_env();

    // Create database pool and schema
    tracing::info!("Opening database at {}", config.database.path);
    let pool = create_pool(&config).await?;
    init_schema(&pool).await?;

    // Resolve the process auth secret (generated and persisted on first run)
    let secret = auth::bootstrap_secret(&pool, config.auth.secret.as_deref()).await?;

    // Initialize repositories and services
    let registry = DeviceRegistry::new(DeviceRepository::new(pool.clone()));
    let ingestion = IngestionService::new(registry.clone(), ReadingRepository::new(pool));

    let state = AppState {
        registry,
        ingestion,
        secret,
    };
    let app = routes::create_router(state);

    // Start server
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting API server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Application shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
