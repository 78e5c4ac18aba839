//! Shoplist Server Binary
//!
//! Standalone server for the shoplist item API.

use std::sync::Arc;

use shoplist_core::ServerConfig;
use shoplist_server::{serve, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        audience = ?config.audience,
        issuer = ?config.issuer_base_url,
        alg = ?config.token_signing_alg,
        "Token verification delegated to the external verifier"
    );

    let addr = config.listen_addr();
    let state = Arc::new(AppState::new(config)?);

    serve(&addr, state).await
}
