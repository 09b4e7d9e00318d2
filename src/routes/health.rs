use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::error;

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.announcements.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "store": "connected" })),
        ),
        Err(e) => {
            error!(error = %e, "store health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "error", "store": e.detail() })),
            )
        }
    }
}
