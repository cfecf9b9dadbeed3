use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use super::AppState;
use crate::domain::{Item, ItemPayload};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, AppError> {
    let items = state.repo.list_items().await?;
    Ok(Json(items))
}

/// Echoes the payload back with `id` left at zero; the assigned id is not
/// read back from the store.
pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Item>, AppError> {
    let payload = parse_payload(body)?;

    state.repo.create_item(&payload).await?;

    Ok(Json(payload.into_item(0)))
}

pub async fn update_item(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Item>, AppError> {
    let payload = parse_payload(body)?;
    let Path(id) = id.map_err(path_error)?;

    state.repo.update_item(id, &payload).await?;

    Ok(Json(payload.into_item(id)))
}

pub async fn delete_item(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id.map_err(path_error)?;

    state.repo.delete_item(id).await?;

    Ok(Json(MessageResponse {
        message: "Item deleted",
    }))
}

/// Decode the body as JSON whatever `Content-Type` the client sent.
fn parse_payload(body: Result<Bytes, BytesRejection>) -> Result<ItemPayload, AppError> {
    let body = body.map_err(|e| AppError::Bind(e.body_text()))?;
    ItemPayload::from_json(&body).map_err(|e| AppError::Bind(e.to_string()))
}

fn path_error(rejection: PathRejection) -> AppError {
    AppError::Bind(rejection.body_text())
}
