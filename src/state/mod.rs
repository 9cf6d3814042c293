// State management module
// Handles entity records, the agent data-access store and UI state

pub mod agent;
pub mod agent_store;
pub mod app_state;
pub mod debounce;
pub mod entities;

pub use agent::{
    Agent, AgentConfig, AgentFindings, AgentId, AgentPage, AgentRole, AgentStatus, RoleFilter,
    PAGE_SIZE,
};
pub use agent_store::{AgentStore, MutationKind, MutationOutcome, RequestId};
pub use app_state::{AppState, ViewMode};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use entities::*;
