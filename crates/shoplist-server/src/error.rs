//! API error taxonomy
//!
//! Every handler failure converges on [`ApiError`]; the response body is
//! always a JSON object with a human-readable `message`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use shoplist_core::StoreError;

/// Errors surfaced to API clients
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or empty required field
    #[error("{0}")]
    Validation(String),

    /// No bearer token on the request
    #[error("Missing bearer token")]
    Unauthorized,

    /// Record exists but the caller is not its owner
    #[error("Unauthorized action")]
    Forbidden,

    /// No matching record
    #[error("{0}")]
    NotFound(String),

    /// Remote identity lookup failed
    #[error("Error fetching user email")]
    Identity,

    /// Persistence failure, reported with a generic per-operation message
    #[error("{0}")]
    Store(String),
}

impl ApiError {
    /// Wrap a storage failure: log the cause, keep the client message generic
    pub fn store(context: &str, err: StoreError) -> Self {
        tracing::error!("{}: {}", context, err);
        Self::Store(context.to_string())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Identity | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("All fields are required".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::NotFound("Item not found".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::Identity.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_forbidden_message_does_not_leak() {
        assert_eq!(ApiError::Forbidden.to_string(), "Unauthorized action");
    }
}
