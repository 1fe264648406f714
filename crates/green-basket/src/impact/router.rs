use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use super::report::ImpactReporter;

/// Router exposing the read-side impact views.
pub fn impact_router(reporter: Arc<ImpactReporter>) -> Router {
    Router::new()
        .route("/api/impact/stats", get(stats_handler))
        .route("/api/badges", get(badges_handler))
        .with_state(reporter)
}

pub(crate) async fn stats_handler(State(reporter): State<Arc<ImpactReporter>>) -> Response {
    match reporter.stats(Utc::now()) {
        Ok(stats) => Json(json!({ "success": true, "stats": stats })).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn badges_handler(State(reporter): State<Arc<ImpactReporter>>) -> Response {
    match reporter.badges() {
        Ok(badges) => Json(json!({ "success": true, "badges": badges })).into_response(),
        Err(err) => err.into_response(),
    }
}
