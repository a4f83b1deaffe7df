use axum::http::HeaderMap;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use tracing::{info, warn};

use crate::db::DbPool;
use crate::error::{AppError, Result};

const SECRET_KEY: &str = "auth_secret";

/// Resolves the process-wide auth secret, in order of precedence: the
/// APP_SECRET environment override, the value persisted in app_config, or a
/// freshly generated one stored for future restarts. A persisted secret is
/// never regenerated, so credentials issued against it survive restarts.
pub async fn bootstrap_secret(pool: &DbPool, override_secret: Option<&str>) -> Result<String> {
    if let Some(secret) = override_secret {
        info!("Using auth secret from environment");
        return Ok(secret.to_string());
    }

    if let Some(secret) = load_secret(pool).await? {
        return Ok(secret);
    }

    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    let secret = URL_SAFE_NO_PAD.encode(bytes);

    // ON CONFLICT DO NOTHING so two racing startups settle on one value;
    // whichever insert wins is re-read below.
    sqlx::query("INSERT INTO app_config (key, value) VALUES ($1, $2) ON CONFLICT(key) DO NOTHING")
        .bind(SECRET_KEY)
        .bind(&secret)
        .execute(pool)
        .await?;

    let stored = load_secret(pool)
        .await?
        .ok_or_else(|| AppError::Internal("Auth secret missing after bootstrap".to_string()))?;

    if stored == secret {
        info!("Generated new auth secret");
    }

    Ok(stored)
}

async fn load_secret(pool: &DbPool) -> Result<Option<String>> {
    let secret = sqlx::query_scalar::<_, String>("SELECT value FROM app_config WHERE key = $1")
        .bind(SECRET_KEY)
        .fetch_optional(pool)
        .await?;

    Ok(secret)
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(auth_header: Option<&str>) -> Option<&str> {
    match auth_header {
        Some(header) if header.starts_with("Bearer ") => Some(&header[7..]),
        _ => None,
    }
}

/// Gate for device provisioning: callers must present the process secret as
/// a bearer token. Device ingestion does not pass through here; it
/// authenticates with its device code instead.
pub fn require_provisioning(headers: &HeaderMap, secret: &str) -> Result<()> {
    let auth_header = headers.get("Authorization").and_then(|h| h.to_str().ok());

    match extract_bearer_token(auth_header) {
        Some(token) if token == secret => Ok(()),
        Some(_) => {
            warn!("Provisioning request with wrong secret");
            Err(AppError::Auth("Invalid provisioning token".to_string()))
        }
        None => {
            warn!("Provisioning request without Authorization header");
            Err(AppError::Auth("Missing Authorization header".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token_valid() {
        let token = extract_bearer_token(Some("Bearer abc123xyz"));
        assert_eq!(token, Some("abc123xyz"));
    }

    #[test]
    fn test_extract_bearer_token_missing_header() {
        let token = extract_bearer_token(None);
        assert_eq!(token, None);
    }

    #[test]
    fn test_extract_bearer_token_wrong_scheme() {
        let token = extract_bearer_token(Some("Basic dXNlcjpwYXNz"));
        assert_eq!(token, None);
    }

    #[test]
    fn test_require_provisioning_accepts_matching_secret() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", "Bearer s3cret".parse().unwrap());
        assert!(require_provisioning(&headers, "s3cret").is_ok());
    }

    #[test]
    fn test_require_provisioning_rejects_wrong_secret() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", "Bearer nope".parse().unwrap());
        assert!(matches!(
            require_provisioning(&headers, "s3cret"),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn test_require_provisioning_rejects_missing_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            require_provisioning(&headers, "s3cret"),
            Err(AppError::Auth(_))
        ));
    }
}
