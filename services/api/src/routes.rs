use crate::infra::{AppState, Backend};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use green_basket::basket::basket_router;
use green_basket::catalog::catalog_router;
use green_basket::goals::goals_router;
use green_basket::history::history_router;
use green_basket::impact::impact_router;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_api_routes(backend: &Backend) -> Router {
    Router::new()
        .merge(basket_router(Arc::new(backend.basket_service())))
        .merge(impact_router(Arc::new(backend.impact_reporter())))
        .merge(catalog_router(backend.catalog.clone()))
        .merge(goals_router(backend.goals.clone()))
        .merge(history_router(backend.history.clone()))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
