//! Shoplist Server - shopping-list HTTP API
//!
//! axum server exposing the item endpoints, with identity resolution running
//! ahead of every route.

pub mod auth;
pub mod error;
pub mod http;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use shoplist_core::{Repository, ServerConfig, StoreError};

use crate::error::ApiError;

/// Shared application state
pub struct AppState {
    /// Injected persistence handle, opened at startup
    pub repository: Mutex<Repository>,
    /// Shared client for the identity-info lookup
    pub http: reqwest::Client,
    pub config: ServerConfig,
}

impl AppState {
    /// Open the repository and build the shared HTTP client.
    ///
    /// Fails when the database cannot be opened; the process should not
    /// serve requests without its store.
    pub fn new(config: ServerConfig) -> Result<Self, StoreError> {
        let repository = Repository::new(&config.database_path)?;
        tracing::info!("Opened item store at {}", config.database_path);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            repository: Mutex::new(repository),
            http: client,
            config,
        })
    }

    /// Lock the repository for one operation
    pub fn repo(&self) -> Result<MutexGuard<'_, Repository>, ApiError> {
        self.repository.lock().map_err(|e| {
            tracing::error!("Repository mutex poisoned: {}", e);
            ApiError::Store("Database unavailable".to_string())
        })
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = match state.config.cors_origin.as_deref() {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                tracing::warn!("Invalid CORS_ORIGIN {:?}, allowing any origin", origin);
                CorsLayer::permissive()
            }
        },
        None => CorsLayer::permissive(),
    };

    Router::new()
        // Item endpoints
        .route("/item", post(http::create_item))
        .route("/all-unpurchased-items", get(http::unpurchased_items))
        .route("/all-purchased-items", get(http::purchased_items))
        .route("/items-count-by-category", get(http::items_count_by_category))
        .route(
            "/item/{id}",
            get(http::get_item)
                .put(http::update_item)
                .delete(http::delete_item),
        )
        .route("/item-purchased/{id}", put(http::mark_item_purchased))
        // Middleware
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::resolve_identity,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Shoplist server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState {
            repository: Mutex::new(Repository::in_memory().unwrap()),
            http: reqwest::Client::new(),
            config: ServerConfig {
                audience: None,
                issuer_base_url: None,
                token_signing_alg: None,
                user_info_url: "http://localhost/userinfo".to_string(),
                database_path: ":memory:".to_string(),
                port: 8000,
                cors_origin: None,
            },
        })
    }

    #[tokio::test]
    async fn test_requests_without_bearer_token_are_rejected() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/all-unpurchased-items")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_app_state_opens_without_panicking() {
        let state = AppState::new(ServerConfig {
            audience: None,
            issuer_base_url: None,
            token_signing_alg: None,
            user_info_url: "http://localhost/userinfo".to_string(),
            database_path: ":memory:".to_string(),
            port: 8000,
            cors_origin: None,
        });
        assert!(state.is_ok());
    }

    #[tokio::test]
    async fn test_malformed_auth_header_is_rejected() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/item")
                    .method("POST")
                    .header("Authorization", "Basic dXNlcg==")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"name":"Milk","category":"Dairy"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
