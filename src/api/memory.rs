// In-process agent registry used in offline mode and by tests
// Mirrors the backend's listing rules and error messages.

use super::client::{AgentApi, AgentQuery};
use super::error::ApiError;
use crate::state::{Agent, AgentConfig, AgentPage, AgentRole};
use chrono::Utc;
use parking_lot::Mutex;

const MAX_NAME_LENGTH: usize = 64;

/// [`AgentApi`] backed by a vector in memory
#[derive(Default)]
pub struct InMemoryAgentApi {
    agents: Mutex<Vec<Agent>>,
    /// Error returned by the next call, whatever it is
    injected_failure: Mutex<Option<ApiError>>,
}

impl InMemoryAgentApi {
    pub fn new(agents: Vec<Agent>) -> Self {
        Self {
            agents: Mutex::new(agents),
            injected_failure: Mutex::new(None),
        }
    }

    /// Make the next call fail with `error`
    #[cfg(test)]
    pub fn fail_next(&self, error: ApiError) {
        *self.injected_failure.lock() = Some(error);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.agents.lock().len()
    }

    fn take_failure(&self) -> Result<(), ApiError> {
        match self.injected_failure.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn validate_name(name: &str) -> Result<String, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::server(
                400,
                "Invalid agent configuration: Agent name cannot be empty",
            ));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(ApiError::server(
                400,
                format!(
                    "Invalid agent configuration: Agent name exceeds maximum length of {} characters",
                    MAX_NAME_LENGTH
                ),
            ));
        }
        Ok(name.to_string())
    }

    fn not_found(id: &str) -> ApiError {
        ApiError::server(404, format!("Agent not found: {}", id))
    }
}

fn role_rank(role: AgentRole) -> u8 {
    match role {
        AgentRole::GlobalSupervisor => 0,
        AgentRole::TeamSupervisor => 1,
        AgentRole::Worker => 2,
        AgentRole::Scouter => 3,
    }
}

impl AgentApi for InMemoryAgentApi {
    fn list_agents(&self, query: &AgentQuery) -> Result<AgentPage, ApiError> {
        self.take_failure()?;
        let size = query.size.clamp(1, 100);
        let page = query.page.max(1);
        let keyword = query
            .keyword
            .as_deref()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty());

        let mut matching: Vec<Agent> = self
            .agents
            .lock()
            .iter()
            .filter(|agent| query.role.map_or(true, |role| agent.role == role))
            .filter(|agent| {
                keyword.as_deref().map_or(true, |k| {
                    agent.name.to_lowercase().contains(k)
                        || agent.specialty.to_lowercase().contains(k)
                })
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            role_rank(a.role)
                .cmp(&role_rank(b.role))
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });

        let total = matching.len();
        let agents = matching
            .into_iter()
            .skip(page.saturating_sub(1).saturating_mul(size))
            .take(size)
            .collect();
        Ok(AgentPage {
            agents,
            page,
            size,
            total,
            total_pages: total.div_ceil(size).max(1),
        })
    }

    fn get_agent(&self, id: &str) -> Result<Agent, ApiError> {
        self.take_failure()?;
        self.agents
            .lock()
            .iter()
            .find(|agent| agent.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    fn create_agent(&self, name: &str, specialty: &str) -> Result<Agent, ApiError> {
        self.take_failure()?;
        let name = Self::validate_name(name)?;
        let agent = Agent::new(
            uuid::Uuid::new_v4().to_string(),
            name,
            AgentRole::Worker,
            specialty.trim().to_string(),
        );
        self.agents.lock().push(agent.clone());
        Ok(agent)
    }

    fn update_agent(&self, id: &str, name: &str, specialty: &str) -> Result<Agent, ApiError> {
        self.take_failure()?;
        let name = Self::validate_name(name)?;
        let mut agents = self.agents.lock();
        let agent = agents
            .iter_mut()
            .find(|agent| agent.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        agent.name = name;
        agent.specialty = specialty.trim().to_string();
        agent.updated_at = Utc::now();
        Ok(agent.clone())
    }

    fn update_agent_config(&self, id: &str, config: &AgentConfig) -> Result<Agent, ApiError> {
        self.take_failure()?;
        if config.model.trim().is_empty() {
            return Err(ApiError::server(
                400,
                "Invalid agent configuration: Model cannot be empty",
            ));
        }
        if !(0.0..=2.0).contains(&config.temperature) {
            return Err(ApiError::server(
                400,
                "Invalid agent configuration: Temperature must be between 0.0 and 2",
            ));
        }
        let mut agents = self.agents.lock();
        let agent = agents
            .iter_mut()
            .find(|agent| agent.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        agent.config = config.clone();
        agent.updated_at = Utc::now();
        Ok(agent.clone())
    }

    fn delete_agent(&self, id: &str) -> Result<(), ApiError> {
        self.take_failure()?;
        let mut agents = self.agents.lock();
        let index = agents
            .iter()
            .position(|agent| agent.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        let role = agents[index].role;
        if role.is_supervisor() {
            return Err(ApiError::server(
                403,
                format!("Forbidden: {} agents cannot be deleted", role.as_str()),
            ));
        }
        agents.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    fn api() -> InMemoryAgentApi {
        InMemoryAgentApi::new(mock::seed_agents())
    }

    #[test]
    fn test_list_matches_backend_ordering() {
        let page = api().list_agents(&AgentQuery::default()).unwrap();
        assert_eq!(page.agents.len(), 8);
        assert_eq!(page.agents[0].role, AgentRole::GlobalSupervisor);
        assert!(page.total_pages >= 2);
    }

    #[test]
    fn test_list_far_past_the_end_is_empty() {
        let query = AgentQuery {
            page: usize::MAX / 50,
            size: 100,
            ..AgentQuery::default()
        };
        let page = api().list_agents(&query).unwrap();
        assert!(page.agents.is_empty());
        assert_eq!(page.total, mock::seed_agents().len());
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let api = api();
        let before = api.len();
        let err = api.create_agent("  ", "x").unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(api.len(), before);
    }

    #[test]
    fn test_delete_supervisor_forbidden() {
        let api = api();
        let supervisor = api
            .list_agents(&AgentQuery::default())
            .unwrap()
            .agents
            .into_iter()
            .find(|a| a.role.is_supervisor())
            .unwrap();
        let err = api.delete_agent(&supervisor.id).unwrap_err();
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_injected_failure_applies_once() {
        let api = api();
        api.fail_next(ApiError::Transport("connection refused".to_string()));
        assert!(api.list_agents(&AgentQuery::default()).is_err());
        assert!(api.list_agents(&AgentQuery::default()).is_ok());
    }
}
