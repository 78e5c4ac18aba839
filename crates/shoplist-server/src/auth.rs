//! Identity resolution middleware
//!
//! Token signature/issuer/audience verification happens in an external
//! verifier ahead of this service; here the bearer token is exchanged for
//! the caller's email via the configured identity-info endpoint. The email
//! travels to handlers as a request extension.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::AppState;

/// The resolved email of the authenticated caller
#[derive(Debug, Clone)]
pub struct CallerEmail(pub String);

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: String,
}

/// Resolve the caller's identity before any route handler runs.
///
/// 401 when the bearer token is missing, 500 when the remote lookup fails
/// for any reason. The lookup is performed on every request; nothing is
/// cached or retried.
pub async fn resolve_identity(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .ok_or(ApiError::Unauthorized)?
        .to_string();

    let email = fetch_user_email(&state, &token).await?;

    request.extensions_mut().insert(CallerEmail(email));
    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}

async fn fetch_user_email(state: &AppState, token: &str) -> Result<String, ApiError> {
    let response = state
        .http
        .get(&state.config.user_info_url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| {
            tracing::error!("Error fetching user email: {}", e);
            ApiError::Identity
        })?;

    if !response.status().is_success() {
        tracing::error!(
            "Error fetching user email: identity endpoint returned {}",
            response.status()
        );
        return Err(ApiError::Identity);
    }

    let info: UserInfo = response.json().await.map_err(|e| {
        tracing::error!("Error fetching user email: malformed payload: {}", e);
        ApiError::Identity
    })?;

    Ok(info.email)
}
