use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Failure raised by any record store backing the service.
///
/// Every variant is retryable from the caller's point of view; none of them
/// implies that a partial write became visible.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("{collection} store lock poisoned")]
    Poisoned { collection: &'static str },
}

impl StorageError {
    pub(crate) fn poisoned(collection: &'static str) -> Self {
        Self::Poisoned { collection }
    }
}

impl IntoResponse for StorageError {
    fn into_response(self) -> Response {
        let payload = json!({ "error": self.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
    }
}
