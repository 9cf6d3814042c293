// Mock data module
// Demo fixtures and synthetic generators used by the dashboard pages

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::{
    generate_default_team, generate_default_team_at, generate_execution_history,
    generate_execution_history_at,
};

use crate::state::{
    DiagnosisSession, DiscoverySource, PromptTemplate, Report, ReportTemplate, Topology,
    TopologyNode,
};

/// All read-only demo content, loaded once at startup
#[derive(Debug, Clone)]
pub struct Catalog {
    pub topologies: Vec<Topology>,
    pub prompt_templates: Vec<PromptTemplate>,
    pub report_templates: Vec<ReportTemplate>,
    pub reports: Vec<Report>,
    pub discovery_sources: Vec<DiscoverySource>,
    pub diagnosis_sessions: Vec<DiagnosisSession>,
}

impl Catalog {
    pub fn load() -> Self {
        Self {
            topologies: topologies(),
            prompt_templates: prompt_templates(),
            report_templates: report_templates(),
            reports: reports(),
            discovery_sources: discovery_sources(),
            diagnosis_sessions: diagnosis_sessions(),
        }
    }

    pub fn topology(&self, id: &str) -> Option<&Topology> {
        self.topologies.iter().find(|topology| topology.id == id)
    }

    pub fn report(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|report| report.id == id)
    }

    pub fn resources(&self) -> Vec<(&Topology, &TopologyNode)> {
        resources(&self.topologies)
    }

    pub fn resource(&self, id: &str) -> Option<(&Topology, &TopologyNode)> {
        find_resource(&self.topologies, id)
    }
}

/// Every topology node, paired with the topology that contains it
pub fn resources(topologies: &[Topology]) -> Vec<(&Topology, &TopologyNode)> {
    topologies
        .iter()
        .flat_map(|topology| topology.nodes.iter().map(move |node| (topology, node)))
        .collect()
}

/// Find a resource (topology node) by id
pub fn find_resource<'a>(
    topologies: &'a [Topology],
    id: &str,
) -> Option<(&'a Topology, &'a TopologyNode)> {
    topologies
        .iter()
        .find_map(|topology| topology.node(id).map(|node| (topology, node)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resources_cover_all_nodes() {
        let topologies = topologies();
        let node_count: usize = topologies.iter().map(|t| t.nodes.len()).sum();
        assert_eq!(resources(&topologies).len(), node_count);
    }

    #[test]
    fn test_find_resource() {
        let topologies = topologies();
        let (topology, node) = find_resource(&topologies, "kafka-main").unwrap();
        assert_eq!(topology.id, "topo-data");
        assert_eq!(node.node_type, "queue");
        assert!(find_resource(&topologies, "nope").is_none());
    }

    #[test]
    fn test_catalog_lookups() {
        let catalog = Catalog::load();
        assert_eq!(catalog.topology("topo-data").unwrap().name, catalog.topologies[1].name);
        assert!(catalog.report("report-101").is_some());
        assert!(catalog.report("report-999").is_none());
        assert_eq!(catalog.resource("orders-db").unwrap().0.id, "topo-payments");
    }
}
