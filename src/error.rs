use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures raised by the store layer, tagged by the path that produced them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("schema initialization failed: {0}")]
    Init(String),
    #[error("query failed: {0}")]
    Query(String),
    #[error("failed to decode row: {0}")]
    Decode(String),
    #[error("write failed: {0}")]
    Write(String),
}

impl StoreError {
    /// Classify a read-path error, separating row decoding from statement failure.
    pub fn from_read(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => StoreError::Decode(err.to_string()),
            other => StoreError::Query(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    Bind(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Bind(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
