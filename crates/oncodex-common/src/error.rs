use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OncodexError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Security error: {0}")]
    Security(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, OncodexError>;

/// HTTP-facing error type. Implements `IntoResponse` so Axum handlers can
/// return `Result<T, ApiError>` and get a JSON error body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            ApiError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to query CIViC database".to_string(),
                    Some(msg.clone()),
                )
            }
            ApiError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to generate response".to_string(),
                    Some(msg.clone()),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(msg.clone()),
                )
            }
        };

        let body = match details {
            Some(details) => Json(json!({ "error": error, "details": details })),
            None => Json(json!({ "error": error })),
        };

        (status, body).into_response()
    }
}

impl From<OncodexError> for ApiError {
    fn from(err: OncodexError) -> Self {
        match err {
            OncodexError::Validation(msg) => ApiError::BadRequest(msg),
            OncodexError::Upstream(msg) => ApiError::Upstream(msg),
            OncodexError::Generation(msg) => ApiError::Generation(msg),
            OncodexError::Http(e) => ApiError::Upstream(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let api: ApiError = OncodexError::Validation("Gene name is required".into()).into();
        assert!(matches!(api, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_upstream_message_preserved() {
        let api: ApiError = OncodexError::Upstream("gene not found".into()).into();
        match api {
            ApiError::Upstream(msg) => assert_eq!(msg, "gene not found"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
