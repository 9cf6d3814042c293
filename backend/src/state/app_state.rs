// Application state management
// Contains the agent registry and its paginated query logic

use crate::state::config::{AgentConfig, AgentRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

/// Unique identifier for an agent
pub type AgentId = String;

/// Default number of agents per listing page
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Largest page size a client may request
pub const MAX_PAGE_SIZE: usize = 100;

/// Longest accepted agent name, in characters
pub const MAX_NAME_LENGTH: usize = 64;

/// Agent status enumeration
/// Represents what the agent is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentStatus {
    /// Agent has nothing to do
    Idle,
    /// Agent is reasoning about its next step
    Thinking,
    /// Agent is executing a tool call
    Working,
    /// Agent hit an unrecoverable error
    Error,
    /// Agent is blocked on another agent or on input
    Waiting,
}

/// Counters of findings reported by an agent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFindings {
    /// Number of warning-level findings
    pub warnings: u32,
    /// Number of critical findings
    pub critical: u32,
}

/// Agent structure
/// A registered agent with its role, status and model configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    /// Unique identifier for the agent
    pub id: AgentId,
    /// Display name of the agent
    pub name: String,
    /// Position in the supervision hierarchy
    pub role: AgentRole,
    /// Current status of the agent
    pub status: AgentStatus,
    /// Free-text area of expertise
    pub specialty: String,
    /// Teams the agent belongs to
    #[serde(default)]
    pub team_ids: Vec<String>,
    /// Findings reported so far
    #[serde(default)]
    pub findings: AgentFindings,
    /// Model configuration
    pub config: AgentConfig,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Agent {
    /// Create a new idle agent with the default configuration for its role
    pub fn new(id: AgentId, name: String, role: AgentRole, specialty: String) -> Self {
        let now = Utc::now();
        Self {
            config: AgentConfig::for_role(role, &specialty),
            id,
            name,
            role,
            status: AgentStatus::Idle,
            specialty,
            team_ids: Vec::new(),
            findings: AgentFindings::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Generate a new unique ID for an agent
    /// Uses UUID v4 for uniqueness
    pub fn generate_id() -> AgentId {
        Uuid::new_v4().to_string()
    }

    /// Validate the agent
    /// Returns Ok(()) if valid, Err with message if invalid
    pub fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Agent name cannot be empty".to_string());
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(format!(
                "Agent name exceeds maximum length of {} characters",
                MAX_NAME_LENGTH
            ));
        }
        self.config.validate()?;
        Ok(())
    }

    /// Whether the agent matches a lowercase keyword by name or specialty
    fn matches_keyword(&self, keyword: &str) -> bool {
        self.name.to_lowercase().contains(keyword) || self.specialty.to_lowercase().contains(keyword)
    }
}

/// Parameters of a paginated agent listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number
    pub page: usize,
    /// Number of agents per page
    pub size: usize,
    /// Keep only agents with this role
    pub role: Option<AgentRole>,
    /// Keep only agents whose name or specialty contains this text
    pub keyword: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            role: None,
            keyword: None,
        }
    }
}

/// One page of an agent listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentPage {
    /// Agents on this page
    pub agents: Vec<Agent>,
    /// 1-based page number
    pub page: usize,
    /// Requested page size
    pub size: usize,
    /// Number of agents matching the filters across all pages
    pub total: usize,
    /// Number of pages, never less than 1
    pub total_pages: usize,
}

/// Main application state
/// Owns the agent registry and where it is persisted
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Registry of all agents (id -> Agent)
    pub agents: HashMap<AgentId, Agent>,
    /// File the registry is saved to after each mutation (None = memory only)
    pub registry_path: Option<PathBuf>,
}

impl AppState {
    /// Create a new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state that persists the registry to the given file
    pub fn with_registry_path(path: PathBuf) -> Self {
        Self {
            agents: HashMap::new(),
            registry_path: Some(path),
        }
    }

    /// Add an agent to the registry
    /// Returns true if the agent was added (false if ID already exists)
    pub fn add_agent(&mut self, agent: Agent) -> bool {
        if self.agents.contains_key(&agent.id) {
            false
        } else {
            self.agents.insert(agent.id.clone(), agent);
            true
        }
    }

    /// Get all agents, supervisors first, then by name
    pub fn agents_list(&self) -> Vec<&Agent> {
        let mut agents: Vec<&Agent> = self.agents.values().collect();
        agents.sort_by(|a, b| {
            a.role
                .rank()
                .cmp(&b.role.rank())
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });
        agents
    }

    /// Run a filtered, paginated listing
    /// Pages past the end yield an empty agent list with the real totals
    pub fn list_page(&self, query: &ListQuery) -> AgentPage {
        let size = query.size.clamp(1, MAX_PAGE_SIZE);
        let page = query.page.max(1);
        let keyword = query
            .keyword
            .as_deref()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty());

        let matching: Vec<&Agent> = self
            .agents_list()
            .into_iter()
            .filter(|agent| query.role.map_or(true, |role| agent.role == role))
            .filter(|agent| keyword.as_deref().map_or(true, |k| agent.matches_keyword(k)))
            .collect();

        let total = matching.len();
        let total_pages = total.div_ceil(size).max(1);
        let agents = matching
            .into_iter()
            .skip(page.saturating_sub(1).saturating_mul(size))
            .take(size)
            .cloned()
            .collect();

        AgentPage {
            agents,
            page,
            size,
            total,
            total_pages,
        }
    }

    /// Get the number of agents in the registry
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Load agents from a file
    /// Replaces all current agents with those loaded from the file
    /// Returns the number of agents loaded, or an error if loading failed
    pub fn load_agents<P: AsRef<std::path::Path>>(
        &mut self,
        path: P,
    ) -> Result<usize, super::persistence::PersistenceError> {
        let loaded_agents = super::persistence::AgentRegistry::load_from_file(path)?;
        let count = loaded_agents.len();
        self.agents = loaded_agents;
        Ok(count)
    }

    /// Apply `change` to a copy of the registry, save the copy, then keep it
    ///
    /// The in-memory registry is left untouched when saving fails.
    pub fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut HashMap<AgentId, Agent>) -> T,
    ) -> Result<T, super::persistence::PersistenceError> {
        let mut next = self.agents.clone();
        let output = change(&mut next);
        if let Some(path) = &self.registry_path {
            super::persistence::AgentRegistry::save_to_file(&next, path)?;
        }
        self.agents = next;
        Ok(output)
    }

    /// Save agents to the registry file, if one is configured
    pub fn persist(&self) -> Result<(), super::persistence::PersistenceError> {
        match &self.registry_path {
            Some(path) => super::persistence::AgentRegistry::save_to_file(&self.agents, path),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(id: &str, name: &str, role: AgentRole, specialty: &str) -> Agent {
        Agent::new(id.to_string(), name.to_string(), role, specialty.to_string())
    }

    fn sample_state() -> AppState {
        let mut state = AppState::new();
        state.add_agent(agent("g", "Overseer", AgentRole::GlobalSupervisor, "operations"));
        state.add_agent(agent("t", "Kafka Lead", AgentRole::TeamSupervisor, "kafka"));
        for i in 0..10 {
            state.add_agent(agent(
                &format!("w{}", i),
                &format!("Worker {:02}", i),
                AgentRole::Worker,
                if i % 2 == 0 { "database latency" } else { "kafka lag" },
            ));
        }
        state.add_agent(agent("s", "Scout", AgentRole::Scouter, "discovery"));
        state
    }

    #[test]
    fn test_agent_new() {
        let agent = agent("1", "Test Agent", AgentRole::Worker, "dns");
        assert_eq!(agent.id, "1");
        assert_eq!(agent.status, AgentStatus::Idle);
        assert_eq!(agent.findings, AgentFindings::default());
        assert!(agent.team_ids.is_empty());
    }

    #[test]
    fn test_agent_generate_id() {
        let id1 = Agent::generate_id();
        let id2 = Agent::generate_id();
        assert_ne!(id1, id2);
        assert!(!id1.is_empty());
    }

    #[test]
    fn test_agent_validate() {
        let mut agent = agent("1", "Test Agent", AgentRole::Worker, "dns");
        assert!(agent.validate().is_ok());

        agent.name = "   ".to_string();
        assert!(agent.validate().is_err());

        agent.name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(agent.validate().is_err());
    }

    #[test]
    fn test_add_agent() {
        let mut state = AppState::new();
        let agent = agent("1", "Test Agent", AgentRole::Worker, "dns");
        assert!(state.add_agent(agent.clone()));
        assert!(!state.add_agent(agent)); // Duplicate ID should fail
        assert_eq!(state.agent_count(), 1);
    }

    #[test]
    fn test_agents_list_orders_supervisors_first() {
        let state = sample_state();
        let agents = state.agents_list();
        assert_eq!(agents[0].role, AgentRole::GlobalSupervisor);
        assert_eq!(agents[1].role, AgentRole::TeamSupervisor);
        assert_eq!(agents[2].name, "Worker 00");
        assert_eq!(agents.last().unwrap().role, AgentRole::Scouter);
    }

    #[test]
    fn test_list_page_paginates() {
        let state = sample_state();
        let first = state.list_page(&ListQuery::default());
        assert_eq!(first.total, 13);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.agents.len(), 8);

        let second = state.list_page(&ListQuery {
            page: 2,
            ..ListQuery::default()
        });
        assert_eq!(second.agents.len(), 5);

        let past_end = state.list_page(&ListQuery {
            page: 5,
            ..ListQuery::default()
        });
        assert!(past_end.agents.is_empty());
        assert_eq!(past_end.total, 13);
    }

    #[test]
    fn test_list_page_role_filter() {
        let state = sample_state();
        let page = state.list_page(&ListQuery {
            role: Some(AgentRole::Worker),
            size: 100,
            ..ListQuery::default()
        });
        assert_eq!(page.total, 10);
        assert!(page.agents.iter().all(|a| a.role == AgentRole::Worker));
    }

    #[test]
    fn test_list_page_keyword_is_case_insensitive() {
        let state = sample_state();
        let page = state.list_page(&ListQuery {
            keyword: Some("KAFKA".to_string()),
            size: 100,
            ..ListQuery::default()
        });
        // Kafka Lead plus the five odd workers
        assert_eq!(page.total, 6);
    }

    #[test]
    fn test_list_page_empty_registry_has_one_page() {
        let state = AppState::new();
        let page = state.list_page(&ListQuery::default());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_list_page_far_past_the_end_is_empty() {
        let state = sample_state();
        let page = state.list_page(&ListQuery {
            page: usize::MAX / 50,
            size: 100,
            ..ListQuery::default()
        });
        assert!(page.agents.is_empty());
        assert_eq!(page.total, state.agent_count());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_commit_keeps_registry_when_save_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        let mut state = sample_state();
        state.registry_path = Some(blocker.join("agents.json"));
        let result = state.commit(|agents| agents.remove("w0"));
        assert!(result.is_err());
        assert!(state.agents.contains_key("w0"));
    }

    #[test]
    fn test_commit_applies_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agents.json");
        let mut state = sample_state();
        state.registry_path = Some(path.clone());

        let removed = state.commit(|agents| agents.remove("w0")).unwrap();
        assert!(removed.is_some());
        assert!(!state.agents.contains_key("w0"));
        let saved = super::super::persistence::AgentRegistry::load_from_file(&path).unwrap();
        assert_eq!(saved.len(), state.agent_count());
    }

    #[test]
    fn test_list_page_clamps_bad_parameters() {
        let state = sample_state();
        let page = state.list_page(&ListQuery {
            page: 0,
            size: 0,
            ..ListQuery::default()
        });
        assert_eq!(page.page, 1);
        assert_eq!(page.size, 1);
        assert_eq!(page.total_pages, 13);
    }
}
