//! Application configuration loaded from environment variables.
//!
//! The identity provider API key and the session signing key are injected
//! as environment variables by the deployment (Cloud Run secret bindings),
//! so no Secret Manager round trips are needed at runtime.

use std::env;
use std::time::Duration;

/// How long the session gate waits for the profile lookup before treating
/// the visitor as unauthenticated.
const DEFAULT_AUTH_WAIT_SECS: u64 = 6;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identity provider (Firebase Auth REST) API key
    pub identity_api_key: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Bounded wait for the session/profile gate
    pub auth_wait: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            identity_api_key: env::var("IDENTITY_API_KEY")
                .map_err(|_| ConfigError::Missing("IDENTITY_API_KEY"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            auth_wait: Duration::from_secs(
                env::var("AUTH_WAIT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_AUTH_WAIT_SECS),
            ),
        })
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            identity_api_key: "test_api_key".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
            auth_wait: Duration::from_secs(DEFAULT_AUTH_WAIT_SECS),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
