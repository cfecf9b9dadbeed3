use axum::extract::State;
use axum::Json;

use super::AppState;
use crate::error::AppError;

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({"message": "Success"}))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready once the store answers a round-trip.
pub async fn ready(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    state.repo.ping().await?;
    Ok(Json(serde_json::json!({"status": "ready"})))
}
