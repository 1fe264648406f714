use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use super::domain::{ProductRecord, ProductSubmission};
use super::repository::ProductCatalog;

/// Router exposing catalog listing, lookup, and upsert.
pub fn catalog_router(catalog: Arc<dyn ProductCatalog>) -> Router {
    Router::new()
        .route("/api/products", get(list_handler))
        .route("/api/products/add", post(upsert_handler))
        .route("/api/product/:barcode", get(product_handler))
        .with_state(catalog)
}

pub(crate) async fn list_handler(State(catalog): State<Arc<dyn ProductCatalog>>) -> Response {
    match catalog.list() {
        Ok(products) => Json(json!({ "success": true, "products": products })).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn product_handler(
    State(catalog): State<Arc<dyn ProductCatalog>>,
    Path(barcode): Path<String>,
) -> Response {
    match catalog.fetch(barcode.trim()) {
        Ok(Some(product)) => Json(json!({ "success": true, "product": product })).into_response(),
        Ok(None) => Json(json!({ "success": false })).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn upsert_handler(
    State(catalog): State<Arc<dyn ProductCatalog>>,
    payload: Result<Json<ProductSubmission>, JsonRejection>,
) -> Response {
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let record = match ProductRecord::from_submission(submission, Utc::now()) {
        Ok(record) => record,
        Err(err) => return bad_request(err.to_string()),
    };

    let barcode = record.barcode.clone();
    match catalog.upsert(record) {
        Ok(()) => {
            info!(%barcode, "product upserted");
            Json(json!({ "success": true })).into_response()
        }
        Err(err) => {
            warn!(%barcode, error = %err, "product upsert failed");
            err.into_response()
        }
    }
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}
