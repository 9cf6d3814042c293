// HTTP client for the agent registry backend

use super::error::ApiError;
use crate::state::{Agent, AgentConfig, AgentPage, AgentRole, PAGE_SIZE};
use reqwest::blocking::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Parameters of a list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentQuery {
    /// 1-based page number
    pub page: usize,
    pub size: usize,
    /// Single role forwarded to the server
    pub role: Option<AgentRole>,
    pub keyword: Option<String>,
}

impl Default for AgentQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: PAGE_SIZE,
            role: None,
            keyword: None,
        }
    }
}

/// Operations the dashboard needs from the agent registry
///
/// Calls are blocking; the store runs them off the UI thread.
pub trait AgentApi: Send + Sync {
    fn list_agents(&self, query: &AgentQuery) -> Result<AgentPage, ApiError>;
    fn get_agent(&self, id: &str) -> Result<Agent, ApiError>;
    fn create_agent(&self, name: &str, specialty: &str) -> Result<Agent, ApiError>;
    fn update_agent(&self, id: &str, name: &str, specialty: &str) -> Result<Agent, ApiError>;
    fn update_agent_config(&self, id: &str, config: &AgentConfig) -> Result<Agent, ApiError>;
    fn delete_agent(&self, id: &str) -> Result<(), ApiError>;
}

/// Error body produced by the backend
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`AgentApi`] over the backend's REST endpoints
pub struct HttpAgentApi {
    client: Client,
    base_url: String,
}

impl HttpAgentApi {
    /// Create a client for the backend at `base_url` (e.g. "http://localhost:8080")
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a success body, or turn an error status into [`ApiError::Server`]
    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json()?);
        }
        let text = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
        Err(ApiError::server(status.as_u16(), message))
    }
}

/// Build the query-string pairs of a list request
pub fn query_pairs(query: &AgentQuery) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("page", query.page.to_string()),
        ("size", query.size.to_string()),
    ];
    if let Some(role) = query.role {
        pairs.push(("role", role.as_str().to_string()));
    }
    if let Some(keyword) = query.keyword.as_deref().filter(|k| !k.trim().is_empty()) {
        pairs.push(("keyword", keyword.trim().to_string()));
    }
    pairs
}

impl AgentApi for HttpAgentApi {
    fn list_agents(&self, query: &AgentQuery) -> Result<AgentPage, ApiError> {
        debug!(?query, "Listing agents");
        let response = self
            .client
            .get(self.url("/api/agents"))
            .query(&query_pairs(query))
            .send()?;
        Self::decode(response)
    }

    fn get_agent(&self, id: &str) -> Result<Agent, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/api/agents/{}", id)))
            .send()?;
        Self::decode(response)
    }

    fn create_agent(&self, name: &str, specialty: &str) -> Result<Agent, ApiError> {
        let response = self
            .client
            .post(self.url("/api/agents"))
            .json(&json!({ "name": name, "specialty": specialty }))
            .send()?;
        Self::decode(response)
    }

    fn update_agent(&self, id: &str, name: &str, specialty: &str) -> Result<Agent, ApiError> {
        let response = self
            .client
            .put(self.url(&format!("/api/agents/{}", id)))
            .json(&json!({ "name": name, "specialty": specialty }))
            .send()?;
        Self::decode(response)
    }

    fn update_agent_config(&self, id: &str, config: &AgentConfig) -> Result<Agent, ApiError> {
        let response = self
            .client
            .put(self.url(&format!("/api/agents/{}/config", id)))
            .json(config)
            .send()?;
        Self::decode(response)
    }

    fn delete_agent(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/agents/{}", id)))
            .send()?;
        Self::decode::<serde_json::Value>(response).map(|_| ())
    }
}
