// State management module
// Handles the agent registry, roles and persistence

pub mod app_state;
pub mod config;
pub mod persistence;
pub mod seed;

pub use app_state::{Agent, AgentFindings, AgentId, AgentPage, AgentStatus, AppState, ListQuery};
pub use config::{AgentConfig, AgentRole};
pub use persistence::PersistenceError;
