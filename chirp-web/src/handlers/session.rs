use axum::{
    extract::{RawQuery, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::error::ProxyError;
use crate::models::SessionRequest;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/session", get(create_session))
}

/// Mint a realtime session upstream on behalf of the browser.
///
/// The upstream status and JSON body are relayed unchanged. Local failures
/// map to 500 (no API key) and 502 (upstream unreachable).
pub async fn create_session(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, ProxyError> {
    let api_key = state.api_key.get().map_err(|e| {
        tracing::error!(error = %e, "Cannot create realtime session without an API key");
        e
    })?;

    let request = SessionRequest::from_query(query.as_deref(), &state.session_defaults);

    tracing::info!(
        model = %request.model,
        voice = %request.voice,
        "Creating realtime session"
    );

    let reply = state
        .realtime
        .create_session(api_key, &request)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Realtime session request failed");
            e
        })?;

    tracing::info!(status = %reply.status, "Relaying realtime session response");

    Ok((reply.status, Json(reply.body)).into_response())
}
