// Display records for teams, topologies, templates, reports and history
// These are read-only content types; ids are unique within their collection.

use super::agent::{Agent, AgentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A supervisor and its workers, attached to one resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    /// Topology node the team watches
    pub resource_id: String,
    pub name: String,
    pub supervisor: Agent,
    pub members: Vec<Agent>,
}

/// Node of a topology graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: String,
    /// Architectural layer (e.g. "edge", "application", "data")
    pub layer: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// Directed edge of a topology graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyLink {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub link_type: String,
    /// Discovery confidence, 0.0 to 1.0, when the link was inferred
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// Infrastructure graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub id: String,
    pub name: String,
    pub description: String,
    pub nodes: Vec<TopologyNode>,
    pub links: Vec<TopologyLink>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Topology {
    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&TopologyNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Links that start or end at the given node
    pub fn links_of<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a TopologyLink> {
        self.links
            .iter()
            .filter(move |link| link.source == node_id || link.target == node_id)
    }

    /// Links pointing at a node that is not part of this topology
    pub fn dangling_links(&self) -> Vec<&TopologyLink> {
        self.links
            .iter()
            .filter(|link| self.node(&link.source).is_none() || self.node(&link.target).is_none())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Prompt body with `{{variable}}` placeholders
    pub content: String,
    pub variables: Vec<String>,
    pub tags: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl PromptTemplate {
    /// Substitute `{{name}}` placeholders; unknown placeholders are left as-is
    pub fn render(&self, values: &BTreeMap<String, String>) -> String {
        values.iter().fold(self.content.clone(), |text, (key, value)| {
            text.replace(&format!("{{{{{}}}}}", key), value)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Markdown skeleton of the report
    pub content: String,
    pub tags: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Draft,
    Final,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub title: String,
    pub report_type: String,
    pub status: ReportStatus,
    pub summary: String,
    /// Markdown body
    pub content: String,
    pub topology_id: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverySource {
    pub id: String,
    pub name: String,
    pub source_type: String,
    pub endpoint: String,
    pub enabled: bool,
    pub discovered_count: u32,
    pub last_scan_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Running,
    Completed,
    Failed,
}

/// One line of a diagnosis session log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLogEntry {
    pub timestamp: DateTime<Utc>,
    pub agent_name: String,
    pub level: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisSession {
    pub id: String,
    pub query: String,
    pub topology_id: String,
    pub status: SessionStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub logs: Vec<SessionLogEntry>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraceStepKind {
    Thought,
    Action,
    Observation,
}

impl TraceStepKind {
    pub fn label(self) -> &'static str {
        match self {
            TraceStepKind::Thought => "Thought",
            TraceStepKind::Action => "Action",
            TraceStepKind::Observation => "Observation",
        }
    }
}

/// One step of an execution trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub index: usize,
    pub kind: TraceStepKind,
    pub content: String,
    /// Tool invoked by an action step
    pub tool: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Success,
    Failed,
}

/// One past run of an agent, with its trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentExecutionRecord {
    pub id: String,
    pub agent_id: AgentId,
    pub task: String,
    pub status: ExecutionStatus,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub summary: String,
    pub trace: Vec<TraceStep>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> TopologyNode {
        TopologyNode {
            id: id.to_string(),
            label: id.to_uppercase(),
            node_type: "service".to_string(),
            layer: "application".to_string(),
            properties: BTreeMap::new(),
        }
    }

    fn link(source: &str, target: &str) -> TopologyLink {
        TopologyLink {
            source: source.to_string(),
            target: target.to_string(),
            link_type: "calls".to_string(),
            confidence: None,
        }
    }

    #[test]
    fn test_topology_lookup_and_links() {
        let topology = Topology {
            id: "t".to_string(),
            name: "T".to_string(),
            description: String::new(),
            nodes: vec![node("a"), node("b"), node("c")],
            links: vec![link("a", "b"), link("b", "c"), link("c", "zz")],
            tags: Vec::new(),
            created_at: Utc::now(),
        };
        assert_eq!(topology.node("b").unwrap().label, "B");
        assert!(topology.node("missing").is_none());
        assert_eq!(topology.links_of("b").count(), 2);
        assert_eq!(topology.dangling_links().len(), 1);
    }

    #[test]
    fn test_prompt_template_render() {
        let template = PromptTemplate {
            id: "p".to_string(),
            name: "P".to_string(),
            description: String::new(),
            category: "diagnosis".to_string(),
            content: "Check {{service}} for {{symptom}}; keep {{other}}".to_string(),
            variables: vec!["service".to_string(), "symptom".to_string()],
            tags: Vec::new(),
            updated_at: Utc::now(),
        };
        let mut values = BTreeMap::new();
        values.insert("service".to_string(), "checkout".to_string());
        values.insert("symptom".to_string(), "latency".to_string());
        assert_eq!(
            template.render(&values),
            "Check checkout for latency; keep {{other}}"
        );
    }

    #[test]
    fn test_link_type_serialized_as_type() {
        let json = serde_json::to_value(link("a", "b")).unwrap();
        assert_eq!(json["type"], "calls");
        assert!(json["confidence"].is_null());
    }
}
