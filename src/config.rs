use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file, created on first run.
    pub path: String,
    pub max_connections: u32,
    /// Per-device reading count below which an unindexed `latest` scan would
    /// still be acceptable. The (device_id, ts) index is always created, so
    /// this is a documented bound rather than a switch.
    pub full_scan_threshold: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Overrides the persisted secret when set. When absent the secret is
    /// loaded from the database, generated on first run.
    pub secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let path = env::var("DATABASE_PATH").unwrap_or_else(|_| "rainwatch.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        let full_scan_threshold = env::var("FULL_SCAN_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1000);

        let host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("SERVER_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);

        let secret = env::var("APP_SECRET").ok().filter(|s| !s.is_empty());

        Config {
            database: DatabaseConfig {
                path,
                max_connections,
                full_scan_threshold,
            },
            server: ServerConfig { host, port },
            auth: AuthConfig { secret },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_round_trip() {
        env::remove_var("DATABASE_PATH");
        env::remove_var("SERVER_PORT");
        env::remove_var("APP_SECRET");

        let config = Config::from_env();
        assert_eq!(config.database.path, "rainwatch.db");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.full_scan_threshold, 1000);
        assert!(config.auth.secret.is_none());

        env::set_var("APP_SECRET", "fixed-secret");
        let config = Config::from_env();
        assert_eq!(config.auth.secret.as_deref(), Some("fixed-secret"));
        env::remove_var("APP_SECRET");
    }
}
