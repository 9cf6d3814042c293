//! Demo roster used to populate a new registry

use super::app_state::{Agent, AgentFindings, AgentStatus, AppState};
use super::config::AgentRole;
use super::persistence::PersistenceError;
use std::path::PathBuf;
use tracing::{info, warn};

/// (id, name, role, specialty, status, team, warnings, critical)
type SeedRow = (
    &'static str,
    &'static str,
    AgentRole,
    &'static str,
    AgentStatus,
    Option<&'static str>,
    u32,
    u32,
);

const DEMO_ROSTER: &[SeedRow] = &[
    ("agent-global", "Global Supervisor", AgentRole::GlobalSupervisor, "Cross-team coordination", AgentStatus::Idle, None, 0, 0),
    ("agent-sup-payments", "Payments Team Lead", AgentRole::TeamSupervisor, "Payment gateway cluster", AgentStatus::Thinking, Some("team-payments"), 2, 0),
    ("agent-sup-data", "Data Platform Lead", AgentRole::TeamSupervisor, "Kafka and warehouse pipelines", AgentStatus::Waiting, Some("team-data"), 1, 1),
    ("agent-w-db", "DB Latency Worker", AgentRole::Worker, "PostgreSQL query latency", AgentStatus::Working, Some("team-payments"), 3, 0),
    ("agent-w-fraud", "Fraud Signal Worker", AgentRole::Worker, "Transaction anomaly detection", AgentStatus::Idle, Some("team-payments"), 0, 1),
    ("agent-w-kafka", "Kafka Lag Worker", AgentRole::Worker, "Consumer group lag", AgentStatus::Error, Some("team-data"), 4, 2),
    ("agent-w-etl", "ETL Freshness Worker", AgentRole::Worker, "Warehouse load freshness", AgentStatus::Idle, Some("team-data"), 0, 0),
    ("agent-w-cache", "Cache Hit Worker", AgentRole::Worker, "Redis eviction and hit ratio", AgentStatus::Working, Some("team-payments"), 1, 0),
    ("agent-w-dns", "DNS Resolution Worker", AgentRole::Worker, "Internal DNS health", AgentStatus::Idle, None, 0, 0),
    ("agent-w-cert", "Certificate Expiry Worker", AgentRole::Worker, "TLS certificate rotation", AgentStatus::Waiting, None, 2, 0),
    ("agent-scout-k8s", "Kubernetes Scouter", AgentRole::Scouter, "Cluster workload discovery", AgentStatus::Thinking, None, 0, 0),
];

/// Insert the demo roster into the registry
/// Returns the number of agents added
pub fn seed_demo_agents(state: &mut AppState) -> usize {
    let mut added = 0;
    for &(id, name, role, specialty, status, team, warnings, critical) in DEMO_ROSTER {
        let mut agent = Agent::new(id.to_string(), name.to_string(), role, specialty.to_string());
        agent.status = status;
        agent.team_ids = team.iter().map(|t| t.to_string()).collect();
        agent.findings = AgentFindings { warnings, critical };
        if state.add_agent(agent) {
            added += 1;
        }
    }
    added
}

/// Open the registry stored at `path`
///
/// A missing file starts a new registry, seeded with the demo roster when
/// `seed` is set. An existing file that cannot be loaded is an error and is
/// never overwritten.
pub fn open_registry(path: PathBuf, seed: bool) -> Result<AppState, PersistenceError> {
    let mut state = AppState::with_registry_path(path.clone());
    if path.exists() {
        let count = state.load_agents(&path)?;
        info!("Loaded {} agents from {}", count, path.display());
        return Ok(state);
    }

    if seed {
        let seeded = seed_demo_agents(&mut state);
        info!("Seeded {} demo agents", seeded);
        if let Err(e) = state.persist() {
            warn!("Failed to save seeded registry: {}", e);
        }
    }
    Ok(state)
}
