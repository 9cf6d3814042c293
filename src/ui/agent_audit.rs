// Agent audit modal
// Master list of past runs on the left, trace timeline of the selected run on the right

use crate::mock;
use crate::state::{Agent, AgentExecutionRecord, ExecutionStatus, TraceStepKind};
use eframe::egui;

/// Execution history of one agent plus the selected record
#[derive(Debug, Clone)]
pub struct AuditView {
    pub agent: Agent,
    pub records: Vec<AgentExecutionRecord>,
    pub selected: Option<usize>,
}

impl AuditView {
    /// Generate the history for `agent`; the newest record starts selected
    pub fn open(agent: &Agent) -> Self {
        Self::with_records(agent.clone(), mock::generate_execution_history(agent))
    }

    pub fn with_records(agent: Agent, records: Vec<AgentExecutionRecord>) -> Self {
        let selected = if records.is_empty() { None } else { Some(0) };
        Self {
            agent,
            records,
            selected,
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.records.len() {
            self.selected = Some(index);
        }
    }

    pub fn selected_record(&self) -> Option<&AgentExecutionRecord> {
        self.selected.and_then(|index| self.records.get(index))
    }

    /// Draw the modal; returns false once the user closes it
    pub fn show(&mut self, ctx: &egui::Context) -> bool {
        let mut open = true;
        egui::Window::new(format!("Audit: {}", self.agent.name))
            .id(egui::Id::new("agent_audit_modal"))
            .collapsible(false)
            .resizable(true)
            .default_size([760.0, 460.0])
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.set_width(260.0);
                        self.render_records(ui);
                    });
                    ui.separator();
                    ui.vertical(|ui| match self.selected_record() {
                        Some(record) => render_timeline(ui, record),
                        None => {
                            ui.label(egui::RichText::new("Select a run to inspect").weak());
                        }
                    });
                });
            });
        open
    }

    fn render_records(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Execution history").strong());
        ui.add_space(4.0);
        let mut clicked = None;
        egui::ScrollArea::vertical()
            .id_source("audit_records_scroll")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for (index, record) in self.records.iter().enumerate() {
                    let is_selected = self.selected == Some(index);
                    let title = format!(
                        "{} {}",
                        status_icon(record.status),
                        record.task
                    );
                    let response = ui.selectable_label(is_selected, title);
                    ui.label(
                        egui::RichText::new(format!(
                            "{} · {:.1}s",
                            record.started_at.format("%Y-%m-%d %H:%M"),
                            record.duration_ms as f64 / 1000.0
                        ))
                        .small()
                        .weak(),
                    );
                    if response.clicked() {
                        clicked = Some(index);
                    }
                    ui.add_space(4.0);
                }
            });
        if let Some(index) = clicked {
            self.select(index);
        }
    }
}

fn status_icon(status: ExecutionStatus) -> &'static str {
    match status {
        ExecutionStatus::Success => "✔",
        ExecutionStatus::Failed => "✖",
    }
}

fn step_color(kind: TraceStepKind) -> egui::Color32 {
    match kind {
        TraceStepKind::Thought => egui::Color32::from_rgb(150, 150, 255),
        TraceStepKind::Action => egui::Color32::from_rgb(230, 170, 60),
        TraceStepKind::Observation => egui::Color32::from_rgb(90, 190, 120),
    }
}

fn render_timeline(ui: &mut egui::Ui, record: &AgentExecutionRecord) {
    ui.label(egui::RichText::new(&record.task).strong().size(15.0));
    ui.label(egui::RichText::new(&record.summary).weak());
    ui.add_space(6.0);
    ui.separator();
    egui::ScrollArea::vertical()
        .id_source("audit_timeline_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for step in &record.trace {
                ui.horizontal_top(|ui| {
                    ui.label(
                        egui::RichText::new(format!("{:>2}", step.index + 1))
                            .monospace()
                            .weak(),
                    );
                    ui.colored_label(step_color(step.kind), step.kind.label());
                    ui.vertical(|ui| {
                        ui.label(&step.content);
                        if let Some(tool) = &step.tool {
                            ui.label(egui::RichText::new(tool).monospace().small());
                        }
                        ui.label(
                            egui::RichText::new(step.timestamp.format("%H:%M:%S").to_string())
                                .small()
                                .weak(),
                        );
                    });
                });
                ui.add_space(6.0);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> Agent {
        mock::seed_agents()
            .into_iter()
            .find(|agent| agent.id == "agent-w-kafka")
            .unwrap()
    }

    #[test]
    fn test_open_selects_newest_record() {
        let view = AuditView::open(&agent());
        assert!(view.records.len() >= 3);
        assert_eq!(view.selected, Some(0));
        assert_eq!(view.selected_record().unwrap().id, view.records[0].id);
    }

    #[test]
    fn test_select_ignores_out_of_range() {
        let mut view = AuditView::open(&agent());
        view.select(1);
        assert_eq!(view.selected, Some(1));
        view.select(99);
        assert_eq!(view.selected, Some(1));
    }

    #[test]
    fn test_empty_history_has_no_selection() {
        let view = AuditView::with_records(agent(), Vec::new());
        assert!(view.selected_record().is_none());
    }
}
