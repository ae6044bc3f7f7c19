use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe. Fixed body, no database round-trip.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}
