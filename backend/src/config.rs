//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Persistence configuration
    pub persistence: PersistenceConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Persistence configuration
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// Base directory for storing agent data
    pub data_dir: String,
    /// Populate an empty registry with the demo roster on startup
    pub seed_demo_agents: bool,
}

impl PersistenceConfig {
    /// Path of the agent registry file inside the data directory
    pub fn registry_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("agents.json")
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            persistence: PersistenceConfig {
                data_dir: env::var("DATA_DIR").unwrap_or_else(|_| {
                    // Default to ~/.entropy-opstack or current directory
                    if let Some(home) = env::var_os("HOME") {
                        format!("{}/.entropy-opstack", home.to_string_lossy())
                    } else {
                        ".entropy-opstack".to_string()
                    }
                }),
                seed_demo_agents: env::var("SEED_DEMO_AGENTS")
                    .map(|v| parse_flag(&v))
                    .unwrap_or(true),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("true"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" OFF "));
    }

    #[test]
    fn test_registry_path() {
        let persistence = PersistenceConfig {
            data_dir: "/tmp/opstack".to_string(),
            seed_demo_agents: false,
        };
        assert_eq!(
            persistence.registry_path(),
            PathBuf::from("/tmp/opstack/agents.json")
        );
    }

    #[test]
    fn test_server_addr() {
        let config = Config {
            server: ServerConfig {
                port: 9000,
                host: "127.0.0.1".to_string(),
            },
            persistence: PersistenceConfig {
                data_dir: ".".to_string(),
                seed_demo_agents: true,
            },
        };
        assert_eq!(config.server_addr(), "127.0.0.1:9000");
    }
}
