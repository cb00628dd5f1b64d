//! Health check endpoint

use axum::Json;
use axum::extract::State;

use crate::state::AppState;

/// Liveness check. No database access.
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "uptime": state.started_at.elapsed().as_secs_f64(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
