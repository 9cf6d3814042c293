// Dashboard configuration
// Loaded from environment variables with defaults

use std::env;
use std::time::Duration;

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the registry backend
    pub api_url: String,
    /// Serve the agent registry from memory instead of the backend
    pub offline: bool,
    /// User shown in the header badge at startup
    pub user: String,
    /// Timeout applied to every backend request
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            offline: false,
            user: "operator".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: lookup("ENTROPY_API_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.api_url),
            offline: lookup("ENTROPY_OFFLINE")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
                .unwrap_or(defaults.offline),
            user: lookup("ENTROPY_USER")
                .or_else(|| lookup("USER"))
                .filter(|user| !user.trim().is_empty())
                .unwrap_or(defaults.user),
            request_timeout: lookup("ENTROPY_REQUEST_TIMEOUT_SECS")
                .and_then(|t| t.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("ENTROPY_API_URL", "http://ops:9000"),
            ("ENTROPY_OFFLINE", "TRUE"),
            ("ENTROPY_USER", "alice"),
            ("ENTROPY_REQUEST_TIMEOUT_SECS", "3"),
        ]));
        assert_eq!(config.api_url, "http://ops:9000");
        assert!(config.offline);
        assert_eq!(config.user, "alice");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_user_falls_back_to_login_name() {
        let config = Config::from_lookup(lookup_from(&[("USER", "ops")]));
        assert_eq!(config.user, "ops");
    }

    #[test]
    fn test_bad_timeout_uses_default() {
        let config = Config::from_lookup(lookup_from(&[("ENTROPY_REQUEST_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}
