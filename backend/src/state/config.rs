//! Agent role and model configuration
//!
//! Defines the role hierarchy of the registry and the per-agent model settings.
//!
//! This module handles agent-level configuration (roles, model configs).
//! For application-level configuration (server settings, persistence settings),
//! see `config`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default model assigned to newly created agents
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default sampling temperature for newly created agents
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Upper bound accepted for the sampling temperature
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Agent role enumeration
/// Position of an agent in the supervision hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentRole {
    /// Top-level coordinator across all teams
    GlobalSupervisor,
    /// Coordinator of a single resource team
    TeamSupervisor,
    /// Task-executing agent
    Worker,
    /// Discovery agent that scans for new resources
    Scouter,
}

impl AgentRole {
    /// Whether the role is one of the supervisor variants
    pub fn is_supervisor(self) -> bool {
        matches!(self, AgentRole::GlobalSupervisor | AgentRole::TeamSupervisor)
    }

    /// Sort rank used by listings (supervisors first)
    pub fn rank(self) -> u8 {
        match self {
            AgentRole::GlobalSupervisor => 0,
            AgentRole::TeamSupervisor => 1,
            AgentRole::Worker => 2,
            AgentRole::Scouter => 3,
        }
    }

    /// Wire name of the role (e.g. `TEAM_SUPERVISOR`)
    pub fn as_str(self) -> &'static str {
        match self {
            AgentRole::GlobalSupervisor => "GLOBAL_SUPERVISOR",
            AgentRole::TeamSupervisor => "TEAM_SUPERVISOR",
            AgentRole::Worker => "WORKER",
            AgentRole::Scouter => "SCOUTER",
        }
    }
}

impl FromStr for AgentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GLOBAL_SUPERVISOR" => Ok(AgentRole::GlobalSupervisor),
            "TEAM_SUPERVISOR" => Ok(AgentRole::TeamSupervisor),
            "WORKER" => Ok(AgentRole::Worker),
            "SCOUTER" => Ok(AgentRole::Scouter),
            other => Err(format!("Unknown agent role: {}", other)),
        }
    }
}

/// Model configuration of an agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    /// Model identifier (e.g. "gemini-2.0-flash")
    pub model: String,
    /// Sampling temperature, 0.0 to 2.0
    pub temperature: f32,
    /// System instruction prepended to every conversation
    pub system_instruction: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            system_instruction: String::new(),
        }
    }
}

impl AgentConfig {
    /// Create the default configuration for an agent with the given role and specialty
    pub fn for_role(role: AgentRole, specialty: &str) -> Self {
        let system_instruction = match role {
            AgentRole::GlobalSupervisor => {
                "You coordinate every team supervisor and consolidate their findings.".to_string()
            }
            AgentRole::TeamSupervisor => format!(
                "You lead the team responsible for {}. Delegate checks to workers and summarize results.",
                specialty
            ),
            AgentRole::Worker => format!(
                "You are a worker agent specialized in {}. Report warnings and critical findings.",
                specialty
            ),
            AgentRole::Scouter => format!(
                "You discover and classify new resources related to {}.",
                specialty
            ),
        };
        Self {
            system_instruction,
            ..Self::default()
        }
    }

    /// Validate the configuration
    /// Returns Ok(()) if valid, Err with message if invalid
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model cannot be empty".to_string());
        }
        if !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(format!(
                "Temperature must be between 0.0 and {}",
                MAX_TEMPERATURE
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_is_supervisor() {
        assert!(AgentRole::GlobalSupervisor.is_supervisor());
        assert!(AgentRole::TeamSupervisor.is_supervisor());
        assert!(!AgentRole::Worker.is_supervisor());
        assert!(!AgentRole::Scouter.is_supervisor());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("WORKER".parse::<AgentRole>(), Ok(AgentRole::Worker));
        assert_eq!(
            "team_supervisor".parse::<AgentRole>(),
            Ok(AgentRole::TeamSupervisor)
        );
        assert!("WORKER,SCOUTER".parse::<AgentRole>().is_err());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&AgentRole::GlobalSupervisor).unwrap();
        assert_eq!(json, "\"GLOBAL_SUPERVISOR\"");
    }

    #[test]
    fn test_agent_config_for_role() {
        let config = AgentConfig::for_role(AgentRole::Worker, "kafka lag");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.system_instruction.contains("kafka lag"));
    }

    #[test]
    fn test_agent_config_validate() {
        let mut config = AgentConfig::default();
        assert!(config.validate().is_ok());

        config.temperature = 2.5;
        assert!(config.validate().is_err());

        config.temperature = 1.0;
        config.model = " ".to_string();
        assert!(config.validate().is_err());
    }
}
