//! Raw scan history, independent of baskets.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::storage::StorageError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEntry {
    pub barcode: String,
    pub time: DateTime<Utc>,
}

pub trait HistoryStore: Send + Sync {
    fn record(&self, entry: ScanEntry) -> Result<(), StorageError>;
    /// Entries in scan order.
    fn list(&self) -> Result<Vec<ScanEntry>, StorageError>;
    /// Removes every entry, returning how many were dropped.
    fn clear(&self) -> Result<usize, StorageError>;
}

#[derive(Debug, Deserialize)]
pub struct ScanQuery {
    #[serde(default)]
    pub barcode: Option<String>,
}

pub fn history_router(store: Arc<dyn HistoryStore>) -> Router {
    Router::new()
        .route("/history", get(list_handler))
        .route("/history/add", post(add_handler))
        .route("/history/clear", delete(clear_handler))
        .with_state(store)
}

pub(crate) async fn add_handler(
    State(store): State<Arc<dyn HistoryStore>>,
    Query(query): Query<ScanQuery>,
) -> Response {
    let barcode = query
        .barcode
        .map(|code| code.trim().to_string())
        .unwrap_or_default();
    if barcode.is_empty() {
        let payload = json!({ "error": "barcode query parameter is required" });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    let entry = ScanEntry {
        barcode,
        time: Utc::now(),
    };
    match store.record(entry.clone()) {
        Ok(()) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn list_handler(State(store): State<Arc<dyn HistoryStore>>) -> Response {
    match store.list() {
        Ok(history) => Json(json!({ "success": true, "history": history })).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn clear_handler(State(store): State<Arc<dyn HistoryStore>>) -> Response {
    match store.clear() {
        Ok(removed) => {
            info!(removed, "scan history cleared");
            Json(json!({ "success": true })).into_response()
        }
        Err(err) => err.into_response(),
    }
}
