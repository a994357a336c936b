//! Router assembly and server lifecycle.

use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::config::{AssetSettings, Settings};
use crate::handlers::{app::health_check, assets, metrics::metrics, session};
use crate::models::SessionDefaults;
use crate::services::{ApiKeyCache, OpenAiRealtimeClient};
use crate::AppState;

pub fn build_router(state: AppState, asset_settings: &AssetSettings) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/metrics", get(metrics))
        .merge(session::routes())
        .merge(assets::routes(asset_settings))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri().path(),
                    version = ?request.version(),
                )
            }),
        )
        // Outermost, so the trace span sees the request id.
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Wire the production upstream client and bind the listener.
    ///
    /// Port 0 binds a random port, which tests rely on.
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let realtime = OpenAiRealtimeClient::new(&settings.realtime).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("Failed to build HTTP client: {}", e))
        })?;
        tracing::info!(
            url = %realtime.sessions_url(),
            timeout_secs = settings.realtime.timeout_secs,
            "Initialized realtime session client"
        );

        let state = AppState::new(
            Arc::new(ApiKeyCache::from_env(settings.realtime.api_key_env.clone())),
            Arc::new(realtime),
            SessionDefaults::from(&settings.realtime),
        );

        Self::build_with_state(&settings, state).await
    }

    /// Bind the listener for an already assembled state.
    pub async fn build_with_state(settings: &Settings, state: AppState) -> Result<Self, AppError> {
        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router: build_router(state, &settings.assets),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
