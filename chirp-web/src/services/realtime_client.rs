//! Client for the upstream realtime session-creation endpoint.

use crate::config::RealtimeSettings;
use crate::models::SessionRequest;
use async_trait::async_trait;
use axum::http::StatusCode;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use service_core::observability::TracedClientExt;
use thiserror::Error;

/// Header opting in to the realtime beta.
const BETA_HEADER: &str = "OpenAI-Beta";

/// Error type for upstream calls that did not produce a usable reply.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request never completed: timeout, DNS, refused connection, ...
    #[error("{0}")]
    Transport(String),

    /// The upstream answered but the body was not JSON.
    #[error("invalid JSON in upstream response: {0}")]
    InvalidBody(String),
}

/// A completed upstream exchange, relayed to the caller unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

/// Creates realtime sessions on behalf of browser clients.
#[async_trait]
pub trait RealtimeSessions: Send + Sync {
    async fn create_session(
        &self,
        api_key: &Secret<String>,
        request: &SessionRequest,
    ) -> Result<UpstreamReply, UpstreamError>;
}

/// `reqwest`-backed client for `POST /v1/realtime/sessions`.
pub struct OpenAiRealtimeClient {
    client: Client,
    sessions_url: String,
    beta_header: String,
}

impl OpenAiRealtimeClient {
    pub fn new(settings: &RealtimeSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            client,
            sessions_url: settings.sessions_url.clone(),
            beta_header: settings.beta_header.clone(),
        })
    }

    pub fn sessions_url(&self) -> &str {
        &self.sessions_url
    }
}

#[async_trait]
impl RealtimeSessions for OpenAiRealtimeClient {
    async fn create_session(
        &self,
        api_key: &Secret<String>,
        request: &SessionRequest,
    ) -> Result<UpstreamReply, UpstreamError> {
        tracing::debug!(
            url = %self.sessions_url,
            model = %request.model,
            voice = %request.voice,
            modalities = ?request.modalities,
            has_instructions = request.instructions.is_some(),
            "Requesting realtime session"
        );

        let response = self
            .client
            .traced_post(&self.sessions_url)
            .bearer_auth(api_key.expose_secret())
            .header(BETA_HEADER, &self.beta_header)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send POST request to {}: {}", self.sessions_url, e);
                UpstreamError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| {
                tracing::error!(status = %status, error = %e, "Failed to read upstream body");
                if e.is_decode() {
                    UpstreamError::InvalidBody(e.to_string())
                } else {
                    UpstreamError::Transport(e.to_string())
                }
            })?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Upstream rejected session request");
        }

        Ok(UpstreamReply { status, body })
    }
}
