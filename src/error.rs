use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::Invalid;

/// Every failure the JSON API reports. Bodies always have the shape
/// `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Update or delete aimed at an id the store does not have.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Body or path that could not be parsed, or failed validation.
    #[error("{0}")]
    BadRequest(String),

    /// Anything the store reported, constraint violations included.
    #[error("store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

impl From<Invalid> for ApiError {
    fn from(err: Invalid) -> Self {
        Self::BadRequest(err.0)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::Store(err) => {
                tracing::error!("schedule store failure: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
