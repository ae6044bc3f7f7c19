use crate::dtos::SubmitRunResponse;
use crate::models::{normalize_payload, run_document};
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;
use service_core::error::AppError;

pub async fn submit_run(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let fields = normalize_payload(payload)?;
    let run = run_document(fields)?;

    // Insert failures are logged with their detail when the error is
    // rendered; the wire response stays generic.
    let id = state.store.insert_run(run).await?;

    tracing::info!(run_id = %id, "Run submission accepted");
    Ok((StatusCode::CREATED, Json(SubmitRunResponse { ok: true, id })))
}
