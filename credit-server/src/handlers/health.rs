//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    model_loaded: bool,
    feature_count: usize,
    schema_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_error: Option<String>,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let engine = state.engine.status();

    Json(HealthResponse {
        status: if engine.model_loaded { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model_loaded: engine.model_loaded,
        feature_count: engine.feature_count,
        schema_hash: engine.schema_hash,
        // Load errors carry filesystem paths
        model_error: if state.config.is_production() { None } else { engine.error },
    })
}
