// Synthetic data generators
// Output depends only on the inputs, except for the embedded timestamps,
// which the `*_at` variants take explicitly.

use crate::state::{
    Agent, AgentExecutionRecord, AgentRole, AgentStatus, ExecutionStatus, Team, TopologyNode,
    TraceStep, TraceStepKind,
};
use chrono::{DateTime, Duration, Utc};

/// Stable small hash of a string, used to vary generated content per agent
fn seed_of(text: &str) -> usize {
    text.bytes()
        .fold(7usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
}

const TASKS: &[&str] = &[
    "Scheduled health sweep",
    "Investigate alert burst",
    "Verify remediation",
    "Baseline drift check",
    "Correlate upstream incident",
];

const TOOLS: &[&str] = &[
    "metrics.query",
    "logs.search",
    "topology.neighbors",
    "traces.sample",
];

/// Mock execution history for an agent, stamped relative to now
pub fn generate_execution_history(agent: &Agent) -> Vec<AgentExecutionRecord> {
    generate_execution_history_at(agent, Utc::now())
}

/// Mock execution history for an agent, newest record first
pub fn generate_execution_history_at(
    agent: &Agent,
    now: DateTime<Utc>,
) -> Vec<AgentExecutionRecord> {
    let seed = seed_of(&agent.id);
    let count = 3 + seed % 3;
    let focus = if agent.specialty.trim().is_empty() {
        agent.name.as_str()
    } else {
        agent.specialty.as_str()
    };

    (0..count)
        .map(|i| {
            let task = TASKS[(seed + i) % TASKS.len()];
            let started_at = now - Duration::minutes(37 * (i as i64 + 1));
            let failed = (i == 0 && agent.status == AgentStatus::Error)
                || (i == 1 && agent.findings.critical > 0);
            let trace = generate_trace(focus, seed + i, failed, started_at);
            let duration_ms = 1_500 * trace.len() as u64 + ((seed + i) % 900) as u64;
            let summary = if failed {
                format!("{} aborted: {} check reported a critical condition", task, focus)
            } else {
                format!("{} completed for {}; no new critical findings", task, focus)
            };
            AgentExecutionRecord {
                id: format!("exec-{}-{}", agent.id, i + 1),
                agent_id: agent.id.clone(),
                task: task.to_string(),
                status: if failed {
                    ExecutionStatus::Failed
                } else {
                    ExecutionStatus::Success
                },
                started_at,
                duration_ms,
                summary,
                trace,
            }
        })
        .collect()
}

fn generate_trace(focus: &str, seed: usize, failed: bool, start: DateTime<Utc>) -> Vec<TraceStep> {
    let first_tool = TOOLS[seed % TOOLS.len()];
    let second_tool = TOOLS[(seed + 1) % TOOLS.len()];
    let mut steps = vec![
        (
            TraceStepKind::Thought,
            format!("Need current signals for {} before deciding anything.", focus),
            None,
        ),
        (
            TraceStepKind::Action,
            format!("Call {} scoped to {}", first_tool, focus),
            Some(first_tool),
        ),
        (
            TraceStepKind::Observation,
            format!("{} returned {} samples within normal range.", first_tool, 40 + seed % 60),
            None,
        ),
        (
            TraceStepKind::Thought,
            "Cross-check with a second source to rule out a blind spot.".to_string(),
            None,
        ),
        (
            TraceStepKind::Action,
            format!("Call {} for the last 15 minutes", second_tool),
            Some(second_tool),
        ),
    ];
    if failed {
        steps.push((
            TraceStepKind::Observation,
            format!("{} shows a sustained error spike; escalating to supervisor.", second_tool),
            None,
        ));
    } else {
        steps.push((
            TraceStepKind::Observation,
            format!("{} confirms the first result.", second_tool),
            None,
        ));
        steps.push((
            TraceStepKind::Thought,
            "No action required; recording a healthy checkpoint.".to_string(),
            None,
        ));
    }

    steps
        .into_iter()
        .enumerate()
        .map(|(index, (kind, content, tool))| TraceStep {
            index,
            kind,
            content,
            tool: tool.map(str::to_string),
            timestamp: start + Duration::milliseconds(1_500 * index as i64),
        })
        .collect()
}

/// Worker specialties proposed for a node type
fn specialties_for(node_type: &str) -> &'static [&'static str] {
    match node_type.to_ascii_lowercase().as_str() {
        "database" | "db" => &["Query Latency", "Replication Lag", "Connection Pool"],
        "queue" | "kafka" | "stream" => &["Consumer Lag", "Partition Balance"],
        "cache" => &["Hit Ratio", "Eviction Rate"],
        "gateway" | "loadbalancer" | "ingress" => &["Error Rate", "TLS Expiry"],
        _ => &["Health Check", "Log Anomaly"],
    }
}

fn slug(text: &str) -> String {
    text.to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Default team for a newly discovered topology node
pub fn generate_default_team(node: &TopologyNode) -> Team {
    generate_default_team_at(node, Utc::now())
}

/// Default team for a node: one team supervisor and one worker per specialty
pub fn generate_default_team_at(node: &TopologyNode, now: DateTime<Utc>) -> Team {
    let team_id = format!("team-{}", node.id);
    let make = |id: String, name: String, role: AgentRole, specialty: String| {
        let mut agent = Agent::new(id, name, role, specialty);
        agent.team_ids = vec![team_id.clone()];
        agent.created_at = now;
        agent.updated_at = now;
        agent
    };

    let supervisor = make(
        format!("agent-{}-supervisor", node.id),
        format!("{} Supervisor", node.label),
        AgentRole::TeamSupervisor,
        format!("{} ({})", node.label, node.node_type),
    );
    let members = specialties_for(&node.node_type)
        .iter()
        .map(|specialty| {
            make(
                format!("agent-{}-{}", node.id, slug(specialty)),
                format!("{} {} Worker", node.label, specialty),
                AgentRole::Worker,
                format!("{} on {}", specialty, node.label),
            )
        })
        .collect();

    Team {
        id: team_id.clone(),
        resource_id: node.id.clone(),
        name: format!("{} Team", node.label),
        supervisor,
        members,
    }
}
