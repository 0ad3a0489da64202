use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::json;

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "time": Utc::now().to_rfc3339(),
    }))
}

pub async fn ping() -> &'static str {
    "pong"
}
