// Static demo content shown by the dashboard pages

use crate::state::{
    Agent, AgentFindings, AgentRole, AgentStatus, DiagnosisSession, DiscoverySource,
    PromptTemplate, Report, ReportStatus, ReportTemplate, SessionLogEntry, SessionStatus,
    Topology, TopologyLink, TopologyNode,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

// 2026-09-01T08:00:00Z
const BASE: i64 = 1_788_249_600;
const HOUR: i64 = 3_600;

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// One entry of the demo roster
struct SeedRow {
    id: &'static str,
    name: &'static str,
    role: AgentRole,
    specialty: &'static str,
    status: AgentStatus,
    team: Option<&'static str>,
    warnings: u32,
    critical: u32,
}

const SEED_ROWS: [SeedRow; 11] = [
    SeedRow {
        id: "agent-global",
        name: "Global Supervisor",
        role: AgentRole::GlobalSupervisor,
        specialty: "Cross-team coordination",
        status: AgentStatus::Idle,
        team: None,
        warnings: 0,
        critical: 0,
    },
    SeedRow {
        id: "agent-sup-payments",
        name: "Payments Team Lead",
        role: AgentRole::TeamSupervisor,
        specialty: "Payment gateway cluster",
        status: AgentStatus::Thinking,
        team: Some("team-payments"),
        warnings: 2,
        critical: 0,
    },
    SeedRow {
        id: "agent-sup-data",
        name: "Data Platform Lead",
        role: AgentRole::TeamSupervisor,
        specialty: "Kafka and warehouse pipelines",
        status: AgentStatus::Waiting,
        team: Some("team-data"),
        warnings: 1,
        critical: 1,
    },
    SeedRow {
        id: "agent-w-db",
        name: "DB Latency Worker",
        role: AgentRole::Worker,
        specialty: "PostgreSQL query latency",
        status: AgentStatus::Working,
        team: Some("team-payments"),
        warnings: 3,
        critical: 0,
    },
    SeedRow {
        id: "agent-w-fraud",
        name: "Fraud Signal Worker",
        role: AgentRole::Worker,
        specialty: "Transaction anomaly detection",
        status: AgentStatus::Idle,
        team: Some("team-payments"),
        warnings: 0,
        critical: 1,
    },
    SeedRow {
        id: "agent-w-kafka",
        name: "Kafka Lag Worker",
        role: AgentRole::Worker,
        specialty: "Consumer group lag",
        status: AgentStatus::Error,
        team: Some("team-data"),
        warnings: 4,
        critical: 2,
    },
    SeedRow {
        id: "agent-w-etl",
        name: "ETL Freshness Worker",
        role: AgentRole::Worker,
        specialty: "Warehouse load freshness",
        status: AgentStatus::Idle,
        team: Some("team-data"),
        warnings: 0,
        critical: 0,
    },
    SeedRow {
        id: "agent-w-cache",
        name: "Cache Hit Worker",
        role: AgentRole::Worker,
        specialty: "Redis eviction and hit ratio",
        status: AgentStatus::Working,
        team: Some("team-payments"),
        warnings: 1,
        critical: 0,
    },
    SeedRow {
        id: "agent-w-dns",
        name: "DNS Resolution Worker",
        role: AgentRole::Worker,
        specialty: "Internal DNS health",
        status: AgentStatus::Idle,
        team: None,
        warnings: 0,
        critical: 0,
    },
    SeedRow {
        id: "agent-w-cert",
        name: "Certificate Expiry Worker",
        role: AgentRole::Worker,
        specialty: "TLS certificate rotation",
        status: AgentStatus::Waiting,
        team: None,
        warnings: 2,
        critical: 0,
    },
    SeedRow {
        id: "agent-scout-k8s",
        name: "Kubernetes Scouter",
        role: AgentRole::Scouter,
        specialty: "Cluster workload discovery",
        status: AgentStatus::Thinking,
        team: None,
        warnings: 0,
        critical: 0,
    },
];

/// Agent roster used by offline mode; matches the backend's demo seed
pub fn seed_agents() -> Vec<Agent> {
    SEED_ROWS
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut agent = Agent::new(
                row.id.to_string(),
                row.name.to_string(),
                row.role,
                row.specialty.to_string(),
            );
            agent.status = row.status;
            agent.team_ids = row.team.iter().map(|t| t.to_string()).collect();
            agent.findings = AgentFindings {
                warnings: row.warnings,
                critical: row.critical,
            };
            agent.created_at = ts(BASE - (i as i64 + 1) * 24 * HOUR);
            agent.updated_at = agent.created_at;
            agent
        })
        .collect()
}

fn node(
    id: &str,
    label: &str,
    node_type: &str,
    layer: &str,
    props: &[(&str, &str)],
) -> TopologyNode {
    TopologyNode {
        id: id.to_string(),
        label: label.to_string(),
        node_type: node_type.to_string(),
        layer: layer.to_string(),
        properties: props
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn link(source: &str, target: &str, link_type: &str, confidence: Option<f32>) -> TopologyLink {
    TopologyLink {
        source: source.to_string(),
        target: target.to_string(),
        link_type: link_type.to_string(),
        confidence,
    }
}

pub fn topologies() -> Vec<Topology> {
    vec![
        Topology {
            id: "topo-payments".to_string(),
            name: "Payments Platform".to_string(),
            description: "Checkout path from the public gateway to the ledger database."
                .to_string(),
            nodes: vec![
                node(
                    "edge-gw",
                    "Edge Gateway",
                    "gateway",
                    "edge",
                    &[("vendor", "envoy"), ("replicas", "4")],
                ),
                node(
                    "checkout-svc",
                    "Checkout Service",
                    "service",
                    "application",
                    &[("language", "go"), ("replicas", "6")],
                ),
                node(
                    "payments-svc",
                    "Payments Service",
                    "service",
                    "application",
                    &[("language", "java"), ("replicas", "8")],
                ),
                node(
                    "fraud-svc",
                    "Fraud Scoring",
                    "service",
                    "application",
                    &[("model", "gbdt-v12")],
                ),
                node(
                    "orders-db",
                    "Orders DB",
                    "database",
                    "data",
                    &[("engine", "postgresql 16"), ("size", "1.2 TB")],
                ),
                node("session-cache", "Session Cache", "cache", "data", &[("engine", "redis 7")]),
            ],
            links: vec![
                link("edge-gw", "checkout-svc", "routes", None),
                link("checkout-svc", "payments-svc", "calls", None),
                link("payments-svc", "fraud-svc", "calls", Some(0.92)),
                link("payments-svc", "orders-db", "writes", None),
                link("checkout-svc", "session-cache", "reads", Some(0.78)),
            ],
            tags: tags(&["production", "pci"]),
            created_at: ts(BASE - 30 * 24 * HOUR),
        },
        Topology {
            id: "topo-data".to_string(),
            name: "Data Pipeline".to_string(),
            description: "Event ingestion through Kafka into the analytics warehouse.".to_string(),
            nodes: vec![
                node("ingest-api", "Ingest API", "gateway", "edge", &[("rate", "12k rps")]),
                node(
                    "kafka-main",
                    "Kafka Main",
                    "queue",
                    "data",
                    &[("brokers", "5"), ("partitions", "240")],
                ),
                node(
                    "etl-worker",
                    "ETL Worker",
                    "service",
                    "application",
                    &[("schedule", "every 5 min")],
                ),
                node("warehouse", "Warehouse", "database", "data", &[("engine", "clickhouse")]),
                node("bi-dashboards", "BI Dashboards", "service", "presentation", &[]),
            ],
            links: vec![
                link("ingest-api", "kafka-main", "produces", None),
                link("kafka-main", "etl-worker", "consumes", None),
                link("etl-worker", "warehouse", "writes", None),
                link("bi-dashboards", "warehouse", "reads", Some(0.64)),
            ],
            tags: tags(&["production", "analytics"]),
            created_at: ts(BASE - 21 * 24 * HOUR),
        },
    ]
}

pub fn prompt_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            id: "prompt-latency".to_string(),
            name: "Latency triage".to_string(),
            description: "First-pass investigation of a latency regression.".to_string(),
            category: "diagnosis".to_string(),
            content: "Investigate rising p99 latency on {{service}} since {{since}}. \
                      List the top three suspects with evidence."
                .to_string(),
            variables: tags(&["service", "since"]),
            tags: tags(&["latency", "triage"]),
            updated_at: ts(BASE - 2 * 24 * HOUR),
        },
        PromptTemplate {
            id: "prompt-lag".to_string(),
            name: "Consumer lag review".to_string(),
            description: "Explain growth of consumer lag for a group.".to_string(),
            category: "diagnosis".to_string(),
            content: "Consumer group {{group}} on {{cluster}} is lagging. \
                      Compare produce and consume rates and check for rebalances."
                .to_string(),
            variables: tags(&["group", "cluster"]),
            tags: tags(&["kafka"]),
            updated_at: ts(BASE - 5 * 24 * HOUR),
        },
        PromptTemplate {
            id: "prompt-summary".to_string(),
            name: "Shift summary".to_string(),
            description: "Summarize findings for the on-call handover.".to_string(),
            category: "reporting".to_string(),
            content: "Summarize all warnings and critical findings for {{team}} in the last {{hours}} hours."
                .to_string(),
            variables: tags(&["team", "hours"]),
            tags: tags(&["handover"]),
            updated_at: ts(BASE - 24 * HOUR),
        },
    ]
}

pub fn report_templates() -> Vec<ReportTemplate> {
    vec![
        ReportTemplate {
            id: "rt-incident".to_string(),
            name: "Incident review".to_string(),
            description: "Timeline, impact, root cause and follow-ups.".to_string(),
            category: "incident".to_string(),
            content: "# Incident review\n\n## Timeline\n\n## Impact\n\n## Root cause\n\n## Follow-ups\n"
                .to_string(),
            tags: tags(&["incident"]),
            updated_at: ts(BASE - 10 * 24 * HOUR),
        },
        ReportTemplate {
            id: "rt-weekly".to_string(),
            name: "Weekly health".to_string(),
            description: "Per-team counters and notable findings.".to_string(),
            category: "health".to_string(),
            content: "# Weekly health\n\n## Teams\n\n## Notable findings\n".to_string(),
            tags: tags(&["weekly"]),
            updated_at: ts(BASE - 3 * 24 * HOUR),
        },
    ]
}

pub fn reports() -> Vec<Report> {
    vec![
        Report {
            id: "report-101".to_string(),
            title: "Checkout latency regression".to_string(),
            report_type: "incident".to_string(),
            status: ReportStatus::Final,
            summary: "p99 latency doubled after a connection pool change in Payments Service."
                .to_string(),
            content: "# Checkout latency regression\n\n\
                      ## Timeline\n- 09:12 alert on checkout p99\n- 09:40 pool size reverted\n\n\
                      ## Root cause\nThe Payments Service pool was reduced from 64 to 16 connections.\n"
                .to_string(),
            topology_id: Some("topo-payments".to_string()),
            tags: tags(&["latency", "payments"]),
            created_at: ts(BASE - 6 * HOUR),
        },
        Report {
            id: "report-102".to_string(),
            title: "Kafka consumer lag".to_string(),
            report_type: "incident".to_string(),
            status: ReportStatus::Draft,
            summary: "ETL consumers fell 40 minutes behind during a broker restart.".to_string(),
            content: "# Kafka consumer lag\n\n## Observations\nLag grew on 12 of 240 partitions.\n"
                .to_string(),
            topology_id: Some("topo-data".to_string()),
            tags: tags(&["kafka", "etl"]),
            created_at: ts(BASE - 2 * HOUR),
        },
        Report {
            id: "report-095".to_string(),
            title: "Week 35 health".to_string(),
            report_type: "health".to_string(),
            status: ReportStatus::Archived,
            summary: "Seven warnings, no critical findings.".to_string(),
            content: "# Week 35 health\n\nAll teams green.\n".to_string(),
            topology_id: None,
            tags: tags(&["weekly"]),
            created_at: ts(BASE - 7 * 24 * HOUR),
        },
    ]
}

pub fn discovery_sources() -> Vec<DiscoverySource> {
    vec![
        DiscoverySource {
            id: "ds-k8s".to_string(),
            name: "Production cluster".to_string(),
            source_type: "kubernetes".to_string(),
            endpoint: "https://k8s-prod.internal:6443".to_string(),
            enabled: true,
            discovered_count: 148,
            last_scan_at: Some(ts(BASE - HOUR)),
            tags: tags(&["production"]),
        },
        DiscoverySource {
            id: "ds-prom".to_string(),
            name: "Prometheus targets".to_string(),
            source_type: "prometheus".to_string(),
            endpoint: "http://prometheus.internal:9090".to_string(),
            enabled: true,
            discovered_count: 512,
            last_scan_at: Some(ts(BASE - 3 * HOUR)),
            tags: tags(&["metrics"]),
        },
        DiscoverySource {
            id: "ds-cmdb".to_string(),
            name: "Legacy CMDB export".to_string(),
            source_type: "csv".to_string(),
            endpoint: "s3://ops-exports/cmdb.csv".to_string(),
            enabled: false,
            discovered_count: 0,
            last_scan_at: None,
            tags: tags(&["legacy"]),
        },
    ]
}

fn log(offset: i64, agent_name: &str, level: &str, message: &str) -> SessionLogEntry {
    SessionLogEntry {
        timestamp: ts(BASE - 5 * HOUR + offset),
        agent_name: agent_name.to_string(),
        level: level.to_string(),
        message: message.to_string(),
    }
}

pub fn diagnosis_sessions() -> Vec<DiagnosisSession> {
    vec![
        DiagnosisSession {
            id: "session-7f3a".to_string(),
            query: "Why is checkout slow since 09:00?".to_string(),
            topology_id: "topo-payments".to_string(),
            status: SessionStatus::Completed,
            started_at: ts(BASE - 5 * HOUR),
            finished_at: Some(ts(BASE - 5 * HOUR + 540)),
            logs: vec![
                log(
                    0,
                    "Global Supervisor",
                    "INFO",
                    "Dispatching checkout latency question to Payments Team Lead",
                ),
                log(
                    20,
                    "Payments Team Lead",
                    "INFO",
                    "Assigning DB Latency Worker and Cache Hit Worker",
                ),
                log(140, "DB Latency Worker", "WARN", "orders-db connection wait time up 4x"),
                log(300, "Cache Hit Worker", "INFO", "session-cache hit ratio stable at 97%"),
                log(
                    540,
                    "Payments Team Lead",
                    "INFO",
                    "Root cause: reduced connection pool on payments-svc",
                ),
            ],
            tags: tags(&["latency"]),
        },
        DiagnosisSession {
            id: "session-91c2".to_string(),
            query: "Is the warehouse data fresh?".to_string(),
            topology_id: "topo-data".to_string(),
            status: SessionStatus::Failed,
            started_at: ts(BASE - 2 * HOUR),
            finished_at: Some(ts(BASE - 2 * HOUR + 300)),
            logs: vec![
                log(10_800, "Data Platform Lead", "INFO", "Checking ETL freshness"),
                log(10_900, "Kafka Lag Worker", "ERROR", "metrics.query timed out for kafka-main"),
            ],
            tags: tags(&["freshness"]),
        },
    ]
}
