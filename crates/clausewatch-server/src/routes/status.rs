//! Health and status routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::state::AppState;

pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/status", get(get_status))
}

/// GET /health — liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/v1/status — pipeline configuration and LLM availability.
async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let pipeline = &state.config.pipeline;
    let uptime = Utc::now()
        .signed_duration_since(state.started_at)
        .num_seconds()
        .max(0);

    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "llm": state.llm_status,
        "llmBackend": state.coordinator.llm().backend_name(),
        "cacheEntries": state.cache.len(),
        "cacheCapacity": state.config.cache_capacity,
        "cacheTtlSecs": pipeline.cache_ttl.map(|t| t.as_secs()),
        "maxTokensPerChunk": pipeline.max_tokens_per_chunk,
        "llmTimeoutSecs": pipeline.llm_timeout.as_secs(),
        "startedAt": state.started_at.to_rfc3339(),
        "uptimeSecs": uptime,
    }))
}
