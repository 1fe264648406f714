use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Deserializer};
use serde_json::json;

use super::service::{BasketService, BasketServiceError, ValidationError};

/// Body accepted by both the preview and the save endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BasketRequest {
    /// Missing or `null` reads as an empty basket.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub barcodes: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Router builder exposing basket preview, save, and history endpoints.
pub fn basket_router(service: Arc<BasketService>) -> Router {
    Router::new()
        .route("/api/basket", post(analyze_handler))
        .route("/api/basket/save", post(save_handler))
        .route("/api/baskets", get(list_handler))
        .with_state(service)
}

impl IntoResponse for BasketServiceError {
    fn into_response(self) -> Response {
        match self {
            BasketServiceError::Validation(err) => {
                let payload = json!({ "error": err.to_string() });
                (StatusCode::BAD_REQUEST, Json(payload)).into_response()
            }
            BasketServiceError::Storage(err) => err.into_response(),
        }
    }
}

fn barcodes_from(
    payload: Result<Json<BasketRequest>, JsonRejection>,
) -> Result<Vec<String>, BasketServiceError> {
    match payload {
        Ok(Json(request)) => Ok(request.barcodes),
        Err(rejection) => Err(ValidationError::MalformedPayload(rejection.body_text()).into()),
    }
}

pub(crate) async fn analyze_handler(
    State(service): State<Arc<BasketService>>,
    payload: Result<Json<BasketRequest>, JsonRejection>,
) -> Response {
    let result = barcodes_from(payload).map(|barcodes| service.analyze(&barcodes));
    match result {
        Ok(basket) => Json(json!({ "success": true, "basket": basket })).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn save_handler(
    State(service): State<Arc<BasketService>>,
    payload: Result<Json<BasketRequest>, JsonRejection>,
) -> Response {
    let result = barcodes_from(payload).and_then(|barcodes| service.save(barcodes, Utc::now()));
    match result {
        Ok(outcome) => Json(json!({
            "success": true,
            "basket": outcome.basket,
            "badges_awarded": outcome.badges_awarded,
            "warnings": outcome.warnings,
        }))
        .into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn list_handler(State(service): State<Arc<BasketService>>) -> Response {
    match service.list() {
        Ok(baskets) => Json(json!({ "success": true, "baskets": baskets })).into_response(),
        Err(err) => err.into_response(),
    }
}
