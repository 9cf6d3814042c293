// Read-only dashboard pages over the demo catalog
// Dashboard, topologies, resources, reports, templates, discovery and diagnosis

use crate::mock::{self, Catalog};
use crate::routes::{self, Route};
use crate::state::{
    AgentStatus, AgentStore, AppState, DiagnosisSession, ReportStatus, SessionStatus, Team,
    TopologyNode,
};
use crate::ui::components::*;
use eframe::egui;
use std::collections::{BTreeMap, HashMap};

/// Counters shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub topologies: usize,
    pub resources: usize,
    pub draft_reports: usize,
    pub running_sessions: usize,
    pub failed_sessions: usize,
    pub enabled_sources: usize,
}

impl DashboardStats {
    pub fn collect(catalog: &Catalog) -> Self {
        Self {
            topologies: catalog.topologies.len(),
            resources: catalog.resources().len(),
            draft_reports: catalog
                .reports
                .iter()
                .filter(|report| report.status == ReportStatus::Draft)
                .count(),
            running_sessions: count_sessions(&catalog.diagnosis_sessions, SessionStatus::Running),
            failed_sessions: count_sessions(&catalog.diagnosis_sessions, SessionStatus::Failed),
            enabled_sources: catalog
                .discovery_sources
                .iter()
                .filter(|source| source.enabled)
                .count(),
        }
    }
}

fn count_sessions(sessions: &[DiagnosisSession], status: SessionStatus) -> usize {
    sessions
        .iter()
        .filter(|session| session.status == status)
        .count()
}

/// Default teams generated for resources, kept for the lifetime of the app
#[derive(Debug, Default)]
pub struct ResourceTeams {
    teams: HashMap<String, Team>,
}

impl ResourceTeams {
    pub fn get(&self, resource_id: &str) -> Option<&Team> {
        self.teams.get(resource_id)
    }

    /// Team for `node`, generated the first time it is asked for
    pub fn get_or_generate(&mut self, node: &TopologyNode) -> &Team {
        self.teams
            .entry(node.id.clone())
            .or_insert_with(|| mock::generate_default_team(node))
    }

    /// Replace the team of `node` with a freshly generated one
    pub fn regenerate(&mut self, node: &TopologyNode) -> &Team {
        self.teams.remove(&node.id);
        self.get_or_generate(node)
    }
}

/// Variable values typed into the prompt preview, keyed by template id
#[derive(Debug, Default)]
pub struct PromptPreview {
    pub selected: Option<String>,
    pub values: BTreeMap<String, BTreeMap<String, String>>,
}

fn stat_card(ui: &mut egui::Ui, label: &str, value: usize, path: Option<&str>, app: &mut AppState) {
    egui::Frame::group(ui.style())
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.set_width(150.0);
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(value.to_string()).size(26.0).strong());
                match path {
                    Some(path) => {
                        if ui.link(label).clicked() {
                            app.navigate_path(path);
                        }
                    }
                    None => {
                        ui.label(label);
                    }
                }
            });
        });
}

pub fn dashboard(ui: &mut egui::Ui, store: &AgentStore, catalog: &Catalog, app: &mut AppState) {
    page_header(ui, "Dashboard", "Operational overview");
    let stats = DashboardStats::collect(catalog);

    ui.horizontal_wrapped(|ui| {
        stat_card(ui, "Agents", store.total(), Some(routes::AGENTS), app);
        stat_card(ui, "Topologies", stats.topologies, Some(routes::TOPOLOGIES), app);
        stat_card(ui, "Resources", stats.resources, Some(routes::RESOURCES), app);
        stat_card(ui, "Draft reports", stats.draft_reports, Some(routes::REPORTS), app);
        stat_card(ui, "Failed diagnoses", stats.failed_sessions, Some(routes::DIAGNOSIS), app);
        stat_card(ui, "Active sources", stats.enabled_sources, Some(routes::DISCOVERY), app);
    });

    ui.add_space(16.0);
    ui.label(egui::RichText::new("Needs attention").strong());
    ui.add_space(4.0);
    let flagged: Vec<_> = store
        .agents()
        .into_iter()
        .filter(|agent| agent.status == AgentStatus::Error || agent.findings.critical > 0)
        .collect();
    if flagged.is_empty() {
        ui.label(egui::RichText::new("No agents with errors or critical findings on the current page").weak());
    }
    for agent in flagged {
        ui.horizontal(|ui| {
            status_badge(ui, agent.status);
            if ui.link(&agent.name).clicked() {
                app.navigate(Route::AgentConfig(agent.id.clone()));
            }
            findings_badge(ui, agent.findings);
        });
    }

    ui.add_space(16.0);
    ui.label(egui::RichText::new("Latest reports").strong());
    ui.add_space(4.0);
    let mut latest: Vec<_> = catalog.reports.iter().collect();
    latest.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    for report in latest.into_iter().take(3) {
        if ui.link(&report.title).clicked() {
            app.navigate_path(&routes::report_detail(&report.id));
        }
    }
}

pub fn topologies(ui: &mut egui::Ui, catalog: &Catalog, app: &mut AppState) {
    page_header(ui, "Topologies", "Discovered infrastructure graphs");
    for topology in &catalog.topologies {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                if ui
                    .link(egui::RichText::new(&topology.name).strong())
                    .clicked()
                {
                    app.navigate_path(&routes::topology_detail(&topology.id));
                }
                ui.label(
                    egui::RichText::new(format!(
                        "{} nodes · {} links",
                        topology.nodes.len(),
                        topology.links.len()
                    ))
                    .weak(),
                );
            });
            ui.label(&topology.description);
            tag_list(ui, &topology.tags);
        });
        ui.add_space(6.0);
    }
}

pub fn topology_detail(ui: &mut egui::Ui, catalog: &Catalog, app: &mut AppState, id: &str) {
    let Some(topology) = catalog.topology(id) else {
        not_found(ui, &format!("Topology \"{}\" does not exist", id));
        return;
    };
    page_header(ui, &topology.name, &topology.description);

    ui.label(egui::RichText::new("Nodes").strong());
    egui::Grid::new("topology_nodes")
        .num_columns(3)
        .striped(true)
        .show(ui, |ui| {
            for node in &topology.nodes {
                if ui.link(&node.label).clicked() {
                    app.navigate_path(&routes::resource_detail(&node.id));
                }
                ui.label(&node.node_type);
                ui.label(egui::RichText::new(&node.layer).weak());
                ui.end_row();
            }
        });

    ui.add_space(12.0);
    ui.label(egui::RichText::new("Links").strong());
    egui::Grid::new("topology_links")
        .num_columns(3)
        .striped(true)
        .show(ui, |ui| {
            for link in &topology.links {
                ui.label(format!("{} → {}", link.source, link.target));
                ui.label(&link.link_type);
                match link.confidence {
                    Some(confidence) => ui.label(format!("{:.0}% confidence", confidence * 100.0)),
                    None => ui.label(egui::RichText::new("declared").weak()),
                };
                ui.end_row();
            }
        });

    let dangling = topology.dangling_links();
    if !dangling.is_empty() {
        ui.add_space(8.0);
        error_text(
            ui,
            &format!("{} link(s) reference nodes outside this topology", dangling.len()),
        );
    }
}

pub fn resources(ui: &mut egui::Ui, catalog: &Catalog, app: &mut AppState) {
    page_header(ui, "Resources", "Every node across all topologies");
    egui::Grid::new("resources_table")
        .num_columns(4)
        .striped(true)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            for header in ["Resource", "Type", "Layer", "Topology"] {
                ui.label(egui::RichText::new(header).strong());
            }
            ui.end_row();
            for (topology, node) in catalog.resources() {
                if ui.link(&node.label).clicked() {
                    app.navigate_path(&routes::resource_detail(&node.id));
                }
                ui.label(&node.node_type);
                ui.label(&node.layer);
                if ui.link(&topology.name).clicked() {
                    app.navigate_path(&routes::topology_detail(&topology.id));
                }
                ui.end_row();
            }
        });
}

pub fn resource_detail(
    ui: &mut egui::Ui,
    catalog: &Catalog,
    teams: &mut ResourceTeams,
    app: &mut AppState,
    id: &str,
) {
    let Some((topology, node)) = catalog.resource(id) else {
        not_found(ui, &format!("Resource \"{}\" does not exist", id));
        return;
    };
    page_header(ui, &node.label, &format!("{} · {} layer", node.node_type, node.layer));

    ui.horizontal(|ui| {
        ui.label("Topology:");
        if ui.link(&topology.name).clicked() {
            app.navigate_path(&routes::topology_detail(&topology.id));
        }
    });
    if !node.properties.is_empty() {
        egui::Grid::new("resource_properties")
            .num_columns(2)
            .show(ui, |ui| {
                for (key, value) in &node.properties {
                    ui.label(egui::RichText::new(key).weak());
                    ui.label(value);
                    ui.end_row();
                }
            });
    }

    ui.add_space(8.0);
    ui.label(egui::RichText::new("Connections").strong());
    for link in topology.links_of(&node.id) {
        let (arrow, other) = if link.source == node.id {
            ("→", &link.target)
        } else {
            ("←", &link.source)
        };
        ui.horizontal(|ui| {
            ui.label(format!("{} {}", arrow, link.link_type));
            if ui.link(other.as_str()).clicked() {
                app.navigate_path(&routes::resource_detail(other));
            }
        });
    }

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Monitoring team").strong());
        if ui.small_button("Regenerate").clicked() {
            teams.regenerate(node);
        }
    });
    let team = teams.get_or_generate(node);
    ui.label(egui::RichText::new(&team.name).weak());
    ui.horizontal(|ui| {
        role_badge(ui, team.supervisor.role);
        ui.label(&team.supervisor.name);
    });
    for member in &team.members {
        ui.horizontal(|ui| {
            ui.add_space(16.0);
            role_badge(ui, member.role);
            ui.label(&member.name);
            ui.label(egui::RichText::new(&member.specialty).weak());
        });
    }
}

fn report_status_label(status: ReportStatus) -> (&'static str, egui::Color32) {
    match status {
        ReportStatus::Draft => ("Draft", egui::Color32::from_rgb(220, 180, 0)),
        ReportStatus::Final => ("Final", egui::Color32::from_rgb(0, 180, 0)),
        ReportStatus::Archived => ("Archived", egui::Color32::GRAY),
    }
}

pub fn reports(ui: &mut egui::Ui, catalog: &Catalog, app: &mut AppState) {
    page_header(ui, "Reports", "Incident and health reports written by agents");
    if ui.button("Templates").clicked() {
        app.navigate_path(routes::REPORT_TEMPLATES);
    }
    ui.add_space(8.0);
    for report in &catalog.reports {
        let (label, color) = report_status_label(report.status);
        ui.horizontal(|ui| {
            ui.colored_label(color, label);
            if ui.link(egui::RichText::new(&report.title).strong()).clicked() {
                app.navigate_path(&routes::report_detail(&report.id));
            }
            ui.label(
                egui::RichText::new(report.created_at.format("%Y-%m-%d %H:%M").to_string())
                    .weak(),
            );
        });
        ui.label(&report.summary);
        tag_list(ui, &report.tags);
        ui.add_space(8.0);
    }
}

pub fn report_detail(ui: &mut egui::Ui, catalog: &Catalog, app: &mut AppState, id: &str) {
    let Some(report) = catalog.report(id) else {
        not_found(ui, &format!("Report \"{}\" does not exist", id));
        return;
    };
    page_header(ui, &report.title, &report.summary);
    ui.horizontal(|ui| {
        let (label, color) = report_status_label(report.status);
        ui.colored_label(color, label);
        ui.label(egui::RichText::new(&report.report_type).weak());
        if let Some(topology) = report
            .topology_id
            .as_deref()
            .and_then(|topology_id| catalog.topology(topology_id))
        {
            if ui.link(&topology.name).clicked() {
                app.navigate_path(&routes::topology_detail(&topology.id));
            }
        }
    });
    ui.separator();
    egui::ScrollArea::vertical()
        .id_source("report_body")
        .show(ui, |ui| markdown_view(ui, &report.content));
}

pub fn report_templates(ui: &mut egui::Ui, catalog: &Catalog) {
    page_header(ui, "Report templates", "Skeletons used when agents write reports");
    for template in &catalog.report_templates {
        egui::CollapsingHeader::new(egui::RichText::new(&template.name).strong())
            .id_source(&template.id)
            .show(ui, |ui| {
                ui.label(egui::RichText::new(&template.description).weak());
                tag_list(ui, &template.tags);
                ui.separator();
                markdown_view(ui, &template.content);
            });
    }
}

pub fn prompts(ui: &mut egui::Ui, catalog: &Catalog, preview: &mut PromptPreview) {
    page_header(ui, "Prompt templates", "Reusable instructions with {{variables}}");
    ui.horizontal_top(|ui| {
        ui.vertical(|ui| {
            ui.set_width(240.0);
            for template in &catalog.prompt_templates {
                let selected = preview.selected.as_deref() == Some(template.id.as_str());
                if ui.selectable_label(selected, &template.name).clicked() {
                    preview.selected = Some(template.id.clone());
                }
                ui.label(egui::RichText::new(&template.category).small().weak());
                ui.add_space(4.0);
            }
        });
        ui.separator();
        ui.vertical(|ui| {
            let Some(template) = preview
                .selected
                .as_deref()
                .and_then(|id| catalog.prompt_templates.iter().find(|t| t.id == id))
            else {
                ui.label(egui::RichText::new("Select a template").weak());
                return;
            };
            ui.label(&template.description);
            tag_list(ui, &template.tags);
            ui.add_space(8.0);
            let values = preview.values.entry(template.id.clone()).or_default();
            egui::Grid::new("prompt_variables").num_columns(2).show(ui, |ui| {
                for variable in &template.variables {
                    ui.label(variable);
                    ui.text_edit_singleline(values.entry(variable.clone()).or_default());
                    ui.end_row();
                }
            });
            ui.add_space(8.0);
            let filled: BTreeMap<String, String> = values
                .iter()
                .filter(|(_, value)| !value.trim().is_empty())
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            ui.label(egui::RichText::new("Preview").strong());
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(egui::RichText::new(template.render(&filled)).monospace());
            });
        });
    });
}

pub fn discovery(ui: &mut egui::Ui, catalog: &Catalog) {
    page_header(ui, "Discovery", "Sources scanned for resources and links");
    egui::Grid::new("discovery_sources")
        .num_columns(5)
        .striped(true)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            for header in ["Source", "Type", "Endpoint", "Discovered", "Last scan"] {
                ui.label(egui::RichText::new(header).strong());
            }
            ui.end_row();
            for source in &catalog.discovery_sources {
                let name = egui::RichText::new(&source.name);
                ui.label(if source.enabled { name } else { name.weak().strikethrough() });
                ui.label(&source.source_type);
                ui.label(egui::RichText::new(&source.endpoint).monospace().small());
                ui.label(source.discovered_count.to_string());
                ui.label(
                    source
                        .last_scan_at
                        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "never".to_string()),
                );
                ui.end_row();
            }
        });
}

fn session_status_label(status: SessionStatus) -> (&'static str, egui::Color32) {
    match status {
        SessionStatus::Running => ("Running", egui::Color32::from_rgb(80, 150, 255)),
        SessionStatus::Completed => ("Completed", egui::Color32::from_rgb(0, 180, 0)),
        SessionStatus::Failed => ("Failed", egui::Color32::from_rgb(220, 0, 0)),
    }
}

fn log_color(level: &str) -> egui::Color32 {
    match level {
        "ERROR" => egui::Color32::from_rgb(220, 0, 0),
        "WARN" => egui::Color32::from_rgb(220, 180, 0),
        _ => egui::Color32::GRAY,
    }
}

pub fn diagnosis(ui: &mut egui::Ui, catalog: &Catalog, app: &mut AppState) {
    page_header(ui, "Diagnosis", "Questions answered by agent teams");
    for session in &catalog.diagnosis_sessions {
        let (label, color) = session_status_label(session.status);
        egui::CollapsingHeader::new(&session.query)
            .id_source(&session.id)
            .default_open(session.status != SessionStatus::Completed)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(color, label);
                    if let Some(topology) = catalog.topology(&session.topology_id) {
                        if ui.link(&topology.name).clicked() {
                            app.navigate_path(&routes::topology_detail(&topology.id));
                        }
                    }
                    tag_list(ui, &session.tags);
                });
                // Terminal-style log
                egui::Frame::none()
                    .fill(egui::Color32::from_rgb(20, 20, 20))
                    .inner_margin(egui::Margin::same(8.0))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        for entry in &session.logs {
                            ui.horizontal(|ui| {
                                ui.label(
                                    egui::RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                        .monospace()
                                        .color(egui::Color32::from_rgb(120, 120, 120)),
                                );
                                ui.label(
                                    egui::RichText::new(&entry.level)
                                        .monospace()
                                        .color(log_color(&entry.level)),
                                );
                                ui.label(
                                    egui::RichText::new(format!("[{}] {}", entry.agent_name, entry.message))
                                        .monospace()
                                        .color(egui::Color32::from_rgb(200, 200, 200)),
                                );
                            });
                        }
                    });
            });
    }
}

pub fn not_found(ui: &mut egui::Ui, message: &str) {
    empty_state(ui, "Not found", message);
}
