// Agent persistence module
// Handles saving and loading the agent registry to/from files

use super::app_state::{Agent, AgentId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Current version of the registry file format
const REGISTRY_VERSION: u32 = 1;

/// Error types for persistence operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// File I/O error
    #[error("IO Error: {0}")]
    IoError(String),
    /// JSON serialization/deserialization error
    #[error("JSON Error: {0}")]
    JsonError(String),
    /// Invalid data format
    #[error("Invalid Data: {0}")]
    InvalidData(String),
}

/// Serializable structure for agent registry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AgentRegistryData {
    /// Version of the registry format (for future migration support)
    version: u32,
    /// Map of agent ID to agent data
    agents: HashMap<AgentId, Agent>,
}

/// Agent registry persistence operations
pub struct AgentRegistry;

impl AgentRegistry {
    /// Save agents to a JSON file, creating the parent directory if needed
    ///
    /// # Arguments
    /// * `agents` - HashMap of agents to save
    /// * `path` - Path to the JSON file
    pub fn save_to_file<P: AsRef<Path>>(
        agents: &HashMap<AgentId, Agent>,
        path: P,
    ) -> Result<(), PersistenceError> {
        let data = AgentRegistryData {
            version: REGISTRY_VERSION,
            agents: agents.clone(),
        };

        let json = serde_json::to_string_pretty(&data)
            .map_err(|e| PersistenceError::JsonError(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| PersistenceError::IoError(e.to_string()))?;
            }
        }

        fs::write(path.as_ref(), json).map_err(|e| PersistenceError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Load agents from a JSON file
    ///
    /// A missing file yields an empty registry.
    pub fn load_from_file<P: AsRef<Path>>(
        path: P,
    ) -> Result<HashMap<AgentId, Agent>, PersistenceError> {
        if !path.as_ref().exists() {
            return Ok(HashMap::new());
        }

        let json = fs::read_to_string(path.as_ref())
            .map_err(|e| PersistenceError::IoError(e.to_string()))?;

        let data: AgentRegistryData =
            serde_json::from_str(&json).map_err(|e| PersistenceError::JsonError(e.to_string()))?;

        if data.version != REGISTRY_VERSION {
            return Err(PersistenceError::InvalidData(format!(
                "Unsupported registry version: {}",
                data.version
            )));
        }

        if let Some((key, agent)) = data.agents.iter().find(|(key, agent)| **key != agent.id) {
            return Err(PersistenceError::InvalidData(format!(
                "Registry key {} does not match agent id {}",
                key, agent.id
            )));
        }

        Ok(data.agents)
    }
}
