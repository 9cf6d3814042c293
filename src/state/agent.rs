// Agent records as served by the registry API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for an agent
pub type AgentId = String;

/// Fixed number of agents shown per page
pub const PAGE_SIZE: usize = 8;

/// Position of an agent in the supervision hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentRole {
    GlobalSupervisor,
    TeamSupervisor,
    Worker,
    Scouter,
}

impl AgentRole {
    /// Whether the role is one of the two supervisor variants
    pub fn is_supervisor(self) -> bool {
        matches!(self, AgentRole::GlobalSupervisor | AgentRole::TeamSupervisor)
    }

    /// Wire name, as accepted by the `role` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            AgentRole::GlobalSupervisor => "GLOBAL_SUPERVISOR",
            AgentRole::TeamSupervisor => "TEAM_SUPERVISOR",
            AgentRole::Worker => "WORKER",
            AgentRole::Scouter => "SCOUTER",
        }
    }

    /// Short label for badges
    pub fn label(self) -> &'static str {
        match self {
            AgentRole::GlobalSupervisor => "Global Supervisor",
            AgentRole::TeamSupervisor => "Team Supervisor",
            AgentRole::Worker => "Worker",
            AgentRole::Scouter => "Scouter",
        }
    }
}

/// What an agent is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentStatus {
    Idle,
    Thinking,
    Working,
    Error,
    Waiting,
}

/// Warning and critical finding counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFindings {
    pub warnings: u32,
    pub critical: u32,
}

/// Model settings of an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model identifier
    pub model: String,
    /// Sampling temperature, 0.0 to 2.0
    pub temperature: f32,
    /// System instruction prepended to every conversation
    pub system_instruction: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            temperature: 0.3,
            system_instruction: String::new(),
        }
    }
}

/// A registered agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier for the agent
    pub id: AgentId,
    /// Display name of the agent
    pub name: String,
    pub role: AgentRole,
    pub status: AgentStatus,
    /// Free-text area of expertise
    pub specialty: String,
    #[serde(default)]
    pub team_ids: Vec<String>,
    #[serde(default)]
    pub findings: AgentFindings,
    #[serde(default)]
    pub config: AgentConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Agent {
    /// Create an idle agent stamped with the current time
    pub fn new(id: AgentId, name: String, role: AgentRole, specialty: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            role,
            status: AgentStatus::Idle,
            specialty,
            team_ids: Vec::new(),
            findings: AgentFindings::default(),
            config: AgentConfig::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Only workers may be deleted from the dashboard
    pub fn is_deletable(&self) -> bool {
        self.role == AgentRole::Worker
    }
}

/// One page of the agent listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPage {
    pub agents: Vec<Agent>,
    pub page: usize,
    pub size: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Three-way role toggle of the agent registry page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoleFilter {
    #[default]
    All,
    Supervisor,
    Worker,
}

impl RoleFilter {
    /// Every filter, in toolbar order
    pub const ALL_FILTERS: [RoleFilter; 3] =
        [RoleFilter::All, RoleFilter::Supervisor, RoleFilter::Worker];

    /// Role forwarded to the server
    ///
    /// The list endpoint takes a single role, so SUPERVISOR is not sent and is
    /// resolved on the fetched page instead (see [`RoleFilter::admits`]).
    pub fn server_role(self) -> Option<AgentRole> {
        match self {
            RoleFilter::Worker => Some(AgentRole::Worker),
            RoleFilter::All | RoleFilter::Supervisor => None,
        }
    }

    /// Whether an agent with this role is shown under the filter
    pub fn admits(self, role: AgentRole) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Supervisor => role.is_supervisor(),
            RoleFilter::Worker => role == AgentRole::Worker,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoleFilter::All => "ALL",
            RoleFilter::Supervisor => "SUPERVISOR",
            RoleFilter::Worker => "WORKER",
        }
    }
}
