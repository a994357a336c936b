use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Liveness check. Independent of upstream configuration.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}
