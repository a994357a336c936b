use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use service_core::error::ErrorBody;
use thiserror::Error;

use crate::services::{ApiKeyError, UpstreamError};

/// Failures of the session proxy that are answered locally.
///
/// Upstream error statuses are not represented here; they are relayed as-is.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Unable to load API key: {0}")]
    ApiKey(#[from] ApiKeyError),

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ProxyError::ApiKey(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Unable to load API key"),
            ProxyError::Upstream(_) => (StatusCode::BAD_GATEWAY, "Upstream request failed"),
        };

        let details = match self {
            ProxyError::ApiKey(err) => err.to_string(),
            ProxyError::Upstream(err) => err.to_string(),
        };

        ErrorBody::new(error, Some(details)).into_response_with(status)
    }
}
