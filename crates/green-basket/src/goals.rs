//! User-defined sustainability goals. Create and list only; progress is
//! recorded as submitted and never recomputed.

use std::fmt;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::storage::StorageError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(pub String);

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    #[serde(rename = "type")]
    pub goal_type: String,
    pub description: String,
    pub target_value: f64,
    pub progress: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewGoal {
    #[serde(default, rename = "type")]
    pub goal_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_value: f64,
    #[serde(default)]
    pub progress: f64,
}

pub trait GoalStore: Send + Sync {
    fn create(&self, goal: NewGoal, now: DateTime<Utc>) -> Result<Goal, StorageError>;
    /// Goals in creation order.
    fn list(&self) -> Result<Vec<Goal>, StorageError>;
}

pub fn goals_router(store: Arc<dyn GoalStore>) -> Router {
    Router::new()
        .route("/api/goals", get(list_handler).post(create_handler))
        .with_state(store)
}

pub(crate) async fn list_handler(State(store): State<Arc<dyn GoalStore>>) -> Response {
    match store.list() {
        Ok(goals) => Json(json!({ "success": true, "goals": goals })).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn create_handler(
    State(store): State<Arc<dyn GoalStore>>,
    payload: Result<Json<NewGoal>, JsonRejection>,
) -> Response {
    let new_goal = match payload {
        Ok(Json(goal)) => goal,
        Err(rejection) => {
            let payload = json!({ "error": rejection.body_text() });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    match store.create(new_goal, Utc::now()) {
        Ok(goal) => {
            info!(goal_id = %goal.id, goal_type = %goal.goal_type, "goal created");
            Json(json!({ "success": true, "goal": goal })).into_response()
        }
        Err(err) => err.into_response(),
    }
}
