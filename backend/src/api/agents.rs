//! Agent management API handlers
//!
//! Contains HTTP request handlers for agent listing and CRUD operations.

use crate::error::AppError;
use crate::state::{Agent, AgentConfig, AgentId, AgentPage, AgentRole, AppState, ListQuery};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Shared state handle used by every handler
pub type SharedState = Arc<RwLock<AppState>>;

/// Query string of `GET /api/agents`
#[derive(Debug, Default, Deserialize)]
pub struct ListAgentsParams {
    /// 1-based page number
    pub page: Option<usize>,
    /// Agents per page
    pub size: Option<usize>,
    /// Single role to filter by
    pub role: Option<String>,
    /// Text matched against name and specialty
    pub keyword: Option<String>,
}

impl ListAgentsParams {
    /// Convert the raw query string into a validated listing query
    pub fn into_query(self) -> Result<ListQuery, AppError> {
        let role = match self.role.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) if raw.contains(',') => {
                return Err(AppError::InvalidQuery(
                    "Only one role may be given per request".to_string(),
                ))
            }
            Some(raw) => Some(raw.parse::<AgentRole>().map_err(AppError::InvalidQuery)?),
        };
        let defaults = ListQuery::default();
        Ok(ListQuery {
            page: self.page.unwrap_or(defaults.page),
            size: self.size.unwrap_or(defaults.size),
            role,
            keyword: self.keyword,
        })
    }
}

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
    /// Status indicator (e.g., "ok", "error")
    pub status: String,
}

/// Create agent request
#[derive(Debug, Deserialize)]
pub struct CreateAgentRequest {
    /// Name for the new agent
    pub name: String,
    /// Area of expertise
    #[serde(default)]
    pub specialty: String,
}

/// Update agent request
#[derive(Debug, Deserialize)]
pub struct UpdateAgentRequest {
    /// New name for the agent
    pub name: String,
    /// New specialty for the agent
    #[serde(default)]
    pub specialty: String,
}

/// GET /api/agents - List agents, paginated and filtered
pub async fn list_agents(
    State(state): State<SharedState>,
    Query(params): Query<ListAgentsParams>,
) -> Result<Json<AgentPage>, AppError> {
    let query = params.into_query()?;
    let state = state.read().await;
    Ok(Json(state.list_page(&query)))
}

/// GET /api/agents/:id - Get a specific agent
pub async fn get_agent(
    State(state): State<SharedState>,
    Path(id): Path<AgentId>,
) -> Result<Json<Agent>, AppError> {
    let state = state.read().await;
    let agent = state
        .agents
        .get(&id)
        .ok_or_else(|| AppError::AgentNotFound(id.clone()))?;

    Ok(Json(agent.clone()))
}

/// POST /api/agents - Create a new worker agent
pub async fn create_agent(
    State(state): State<SharedState>,
    Json(request): Json<CreateAgentRequest>,
) -> Result<(StatusCode, Json<Agent>), AppError> {
    let id = Agent::generate_id();
    let agent = Agent::new(
        id.clone(),
        request.name.trim().to_string(),
        AgentRole::Worker,
        request.specialty.trim().to_string(),
    );

    agent.validate().map_err(AppError::InvalidAgentConfig)?;

    let mut state = state.write().await;
    if state.agents.contains_key(&id) {
        return Err(AppError::Internal(anyhow::anyhow!(
            "Failed to add agent (ID already exists)"
        )));
    }
    state.commit(|agents| agents.insert(id.clone(), agent.clone()))?;

    info!(agent_id = %id, name = %agent.name, "Agent created");
    Ok((StatusCode::CREATED, Json(agent)))
}

/// PUT /api/agents/:id - Rename an agent or change its specialty
pub async fn update_agent(
    State(state): State<SharedState>,
    Path(id): Path<AgentId>,
    Json(request): Json<UpdateAgentRequest>,
) -> Result<Json<Agent>, AppError> {
    let mut state = state.write().await;
    let mut updated = state
        .agents
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::AgentNotFound(id.clone()))?;

    updated.name = request.name.trim().to_string();
    updated.specialty = request.specialty.trim().to_string();
    updated.validate().map_err(AppError::InvalidAgentConfig)?;
    updated.updated_at = Utc::now();

    state.commit(|agents| agents.insert(id.clone(), updated.clone()))?;
    info!(agent_id = %id, "Agent updated");
    Ok(Json(updated))
}

/// PUT /api/agents/:id/config - Replace an agent's model configuration
pub async fn update_agent_config(
    State(state): State<SharedState>,
    Path(id): Path<AgentId>,
    Json(config): Json<AgentConfig>,
) -> Result<Json<Agent>, AppError> {
    config.validate().map_err(AppError::InvalidAgentConfig)?;

    let mut state = state.write().await;
    let mut updated = state
        .agents
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::AgentNotFound(id.clone()))?;
    updated.config = config;
    updated.updated_at = Utc::now();

    state.commit(|agents| agents.insert(id.clone(), updated.clone()))?;
    info!(agent_id = %id, model = %updated.config.model, "Agent configuration updated");
    Ok(Json(updated))
}

/// DELETE /api/agents/:id - Delete an agent
///
/// Supervisors cannot be deleted.
pub async fn delete_agent(
    State(state): State<SharedState>,
    Path(id): Path<AgentId>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut state = state.write().await;
    let role = state
        .agents
        .get(&id)
        .map(|agent| agent.role)
        .ok_or_else(|| AppError::AgentNotFound(id.clone()))?;

    if role.is_supervisor() {
        return Err(AppError::Forbidden(format!(
            "{} agents cannot be deleted",
            role.as_str()
        )));
    }

    state.commit(|agents| agents.remove(&id))?;

    info!(agent_id = %id, "Agent deleted");
    Ok(Json(MessageResponse {
        message: "Agent deleted successfully".to_string(),
        status: "ok".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::seed::seed_demo_agents;

    fn create_test_state() -> SharedState {
        Arc::new(RwLock::new(AppState::new()))
    }

    fn seeded_state() -> SharedState {
        let mut state = AppState::new();
        seed_demo_agents(&mut state);
        Arc::new(RwLock::new(state))
    }

    #[tokio::test]
    async fn test_list_agents_empty() {
        let state = create_test_state();
        let response = list_agents(State(state), Query(ListAgentsParams::default()))
            .await
            .unwrap();
        assert_eq!(response.total, 0);
        assert_eq!(response.total_pages, 1);
        assert!(response.agents.is_empty());
    }

    #[tokio::test]
    async fn test_list_agents_worker_filter() {
        let state = seeded_state();
        let params = ListAgentsParams {
            role: Some("WORKER".to_string()),
            size: Some(100),
            ..Default::default()
        };
        let response = list_agents(State(state), Query(params)).await.unwrap();
        assert!(!response.agents.is_empty());
        assert!(response
            .agents
            .iter()
            .all(|agent| agent.role == AgentRole::Worker));
    }

    #[tokio::test]
    async fn test_list_agents_rejects_multiple_roles() {
        let state = seeded_state();
        let params = ListAgentsParams {
            role: Some("GLOBAL_SUPERVISOR,TEAM_SUPERVISOR".to_string()),
            ..Default::default()
        };
        let result = list_agents(State(state), Query(params)).await;
        assert!(matches!(result, Err(AppError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn test_create_agent() {
        let state = create_test_state();
        let request = CreateAgentRequest {
            name: "  Disk Worker ".to_string(),
            specialty: "disk usage".to_string(),
        };

        let (status, agent) = create_agent(State(state.clone()), Json(request))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(agent.name, "Disk Worker");
        assert_eq!(agent.role, AgentRole::Worker);
        assert_eq!(state.read().await.agent_count(), 1);
    }

    #[tokio::test]
    async fn test_create_agent_rejects_blank_name() {
        let state = create_test_state();
        let request = CreateAgentRequest {
            name: "   ".to_string(),
            specialty: String::new(),
        };
        let result = create_agent(State(state.clone()), Json(request)).await;
        assert!(matches!(result, Err(AppError::InvalidAgentConfig(_))));
        assert_eq!(state.read().await.agent_count(), 0);
    }

    #[tokio::test]
    async fn test_update_agent() {
        let state = seeded_state();
        let request = UpdateAgentRequest {
            name: "DNS Watcher".to_string(),
            specialty: "resolver health".to_string(),
        };
        let agent = update_agent(State(state), Path("agent-w-dns".to_string()), Json(request))
            .await
            .unwrap();
        assert_eq!(agent.name, "DNS Watcher");
        assert_eq!(agent.specialty, "resolver health");
        assert!(agent.updated_at >= agent.created_at);
    }

    #[tokio::test]
    async fn test_update_agent_invalid_keeps_original() {
        let state = seeded_state();
        let request = UpdateAgentRequest {
            name: String::new(),
            specialty: "anything".to_string(),
        };
        let result = update_agent(
            State(state.clone()),
            Path("agent-w-dns".to_string()),
            Json(request),
        )
        .await;
        assert!(result.is_err());
        let state = state.read().await;
        assert_eq!(state.agents["agent-w-dns"].name, "DNS Resolution Worker");
    }

    #[tokio::test]
    async fn test_update_agent_config() {
        let state = seeded_state();
        let config = AgentConfig {
            model: "gemini-1.5-pro".to_string(),
            temperature: 0.9,
            system_instruction: "Be terse.".to_string(),
        };
        let agent = update_agent_config(
            State(state),
            Path("agent-w-kafka".to_string()),
            Json(config.clone()),
        )
        .await
        .unwrap();
        assert_eq!(agent.config, config);
    }

    #[tokio::test]
    async fn test_delete_worker() {
        let state = seeded_state();
        let before = state.read().await.agent_count();
        delete_agent(State(state.clone()), Path("agent-w-dns".to_string()))
            .await
            .unwrap();
        assert_eq!(state.read().await.agent_count(), before - 1);
    }

    #[tokio::test]
    async fn test_delete_supervisor_forbidden() {
        let state = seeded_state();
        let result = delete_agent(State(state.clone()), Path("agent-global".to_string())).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert!(state.read().await.agents.contains_key("agent-global"));
    }

    #[tokio::test]
    async fn test_get_agent_not_found() {
        let state = create_test_state();
        let result = get_agent(State(state), Path("nonexistent".to_string())).await;
        match result {
            Err(AppError::AgentNotFound(id)) => assert_eq!(id, "nonexistent"),
            other => panic!("Expected AgentNotFound error, got: {:?}", other.map(|j| j.0)),
        }
    }
}
