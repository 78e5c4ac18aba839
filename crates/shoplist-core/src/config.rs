//! Configuration for the shoplist server
//!
//! All settings come from the environment, matching the deployment contract
//! of the external token verifier (audience/issuer/signing algorithm) and the
//! identity-info endpoint used to resolve the caller's email.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Default listening port when `PORT` is unset
pub const DEFAULT_PORT: u16 = 8000;

/// Server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Expected token audience (consumed by the external verifier)
    pub audience: Option<String>,
    /// Token issuer base URL (consumed by the external verifier)
    pub issuer_base_url: Option<String>,
    /// Token signing algorithm (consumed by the external verifier)
    pub token_signing_alg: Option<String>,
    /// Identity-info endpoint resolving a bearer token to an email
    pub user_info_url: String,
    /// Path to the SQLite database file
    pub database_path: String,
    /// Listening port
    pub port: u16,
    /// Allowed CORS origin; permissive when unset
    pub cors_origin: Option<String>,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// `GET_USER_INFO_URL` is required; every request depends on it to
    /// resolve the caller's identity. `DATABASE_PATH` defaults to
    /// `shoplist.db` and `PORT` to 8000.
    pub fn from_env() -> Result<Self, StoreError> {
        let user_info_url = std::env::var("GET_USER_INFO_URL")
            .map_err(|_| StoreError::Config("GET_USER_INFO_URL is not set".to_string()))?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| StoreError::Config(format!("Invalid PORT value: {}", raw)))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            audience: std::env::var("AUDIENCE").ok(),
            issuer_base_url: std::env::var("ISSUER_BASE_URL").ok(),
            token_signing_alg: std::env::var("TOKEN_SIGNING_ALG").ok(),
            user_info_url,
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "shoplist.db".to_string()),
            port,
            cors_origin: std::env::var("CORS_ORIGIN").ok(),
        })
    }

    /// Socket address string for the listener
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ServerConfig {
        ServerConfig {
            audience: None,
            issuer_base_url: None,
            token_signing_alg: None,
            user_info_url: "http://localhost/userinfo".to_string(),
            database_path: "shoplist.db".to_string(),
            port: DEFAULT_PORT,
            cors_origin: None,
        }
    }

    #[test]
    fn test_listen_addr_uses_port() {
        let mut config = test_config();
        assert_eq!(config.listen_addr(), "0.0.0.0:8000");
        config.port = 3000;
        assert_eq!(config.listen_addr(), "0.0.0.0:3000");
    }
}
