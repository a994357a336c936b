#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use chirp_web::config::{AssetSettings, RealtimeSettings};
use chirp_web::models::{SessionDefaults, SessionRequest};
use chirp_web::services::{ApiKeyCache, RealtimeSessions, UpstreamError, UpstreamReply};
use chirp_web::startup::build_router;
use chirp_web::AppState;
use secrecy::{ExposeSecret, Secret};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

pub const TEST_KEY: &str = "sk-test-123";

/// Assets shipped with the crate.
pub fn asset_settings() -> AssetSettings {
    AssetSettings {
        root: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
        index: "realtime.html".to_string(),
    }
}

pub fn session_defaults() -> SessionDefaults {
    SessionDefaults::from(&RealtimeSettings::default())
}

#[derive(Clone)]
enum Outcome {
    Reply(UpstreamReply),
    Transport(String),
}

/// Upstream double that records every call it receives.
pub struct RecordingUpstream {
    outcome: Outcome,
    calls: Mutex<Vec<(String, SessionRequest)>>,
}

impl RecordingUpstream {
    pub fn replying(status: StatusCode, body: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            outcome: Outcome::Reply(UpstreamReply { status, body }),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Outcome::Transport(reason.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Recorded `(api key, request)` pairs.
    pub fn calls(&self) -> Vec<(String, SessionRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RealtimeSessions for RecordingUpstream {
    async fn create_session(
        &self,
        api_key: &Secret<String>,
        request: &SessionRequest,
    ) -> Result<UpstreamReply, UpstreamError> {
        self.calls
            .lock()
            .unwrap()
            .push((api_key.expose_secret().clone(), request.clone()));

        match &self.outcome {
            Outcome::Reply(reply) => Ok(reply.clone()),
            Outcome::Transport(reason) => Err(UpstreamError::Transport(reason.clone())),
        }
    }
}

pub fn fixed_key(key: Option<&str>) -> Arc<ApiKeyCache> {
    let key = key.map(str::to_string);
    Arc::new(ApiKeyCache::with_source("OPENAI_API_KEY", move || key.clone()))
}

pub fn app_with(api_key: Arc<ApiKeyCache>, upstream: Arc<dyn RealtimeSessions>) -> Router {
    let state = AppState::new(api_key, upstream, session_defaults());
    build_router(state, &asset_settings())
}

/// Router with a configured key and an upstream that answers 200 `{}`.
pub fn default_app() -> Router {
    app_with(
        fixed_key(Some(TEST_KEY)),
        RecordingUpstream::replying(StatusCode::OK, serde_json::json!({})),
    )
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, body)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, _, body) = get(app, uri).await;
    let json = serde_json::from_slice(&body).expect("response body is not JSON");
    (status, json)
}
