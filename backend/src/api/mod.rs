//! API module
//!
//! Contains HTTP request handlers for agent registry endpoints and the
//! router that wires them together.

pub mod agents;

use agents::SharedState;
use axum::{
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall health indicator
    pub status: String,
    /// Backend version
    pub version: String,
    /// Human-readable message
    pub message: String,
}

/// GET /api/health - Liveness check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "EntropyOPStack backend is healthy".to_string(),
    })
}

/// Build the API router without middleware layers
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route(
            "/api/agents",
            get(agents::list_agents).post(agents::create_agent),
        )
        .route(
            "/api/agents/:id",
            get(agents::get_agent)
                .put(agents::update_agent)
                .delete(agents::delete_agent),
        )
        .route("/api/agents/:id/config", put(agents::update_agent_config))
        .with_state(state)
}
