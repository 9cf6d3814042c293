// Agent registry page
// Search, role filter, paging, list/card views and the create/edit/delete/audit modals

use crate::routes::Route;
use crate::state::{
    Agent, AgentId, AgentStore, AppState, Debouncer, MutationOutcome, RequestId, RoleFilter,
    ViewMode, SEARCH_DEBOUNCE,
};
use crate::ui::agent_audit::AuditView;
use crate::ui::components::*;
use eframe::egui;
use std::time::Instant;

/// Modal currently shown over the registry
#[derive(Debug, Clone)]
pub enum AgentModal {
    Create {
        edit_name: String,
        edit_specialty: String,
        error: Option<String>,
        /// Request submitted from this modal and not yet answered
        pending: Option<RequestId>,
    },
    Edit {
        id: AgentId,
        edit_name: String,
        edit_specialty: String,
        error: Option<String>,
        pending: Option<RequestId>,
    },
    ConfirmDelete {
        id: AgentId,
        name: String,
        error: Option<String>,
        pending: Option<RequestId>,
    },
    Audit(AuditView),
}

impl AgentModal {
    pub fn create() -> Self {
        AgentModal::Create {
            edit_name: String::new(),
            edit_specialty: String::new(),
            error: None,
            pending: None,
        }
    }

    pub fn edit(agent: &Agent) -> Self {
        AgentModal::Edit {
            id: agent.id.clone(),
            edit_name: agent.name.clone(),
            edit_specialty: agent.specialty.clone(),
            error: None,
            pending: None,
        }
    }

    pub fn confirm_delete(agent: &Agent) -> Self {
        AgentModal::ConfirmDelete {
            id: agent.id.clone(),
            name: agent.name.clone(),
            error: None,
            pending: None,
        }
    }

    fn pending(&self) -> Option<RequestId> {
        match self {
            AgentModal::Create { pending, .. }
            | AgentModal::Edit { pending, .. }
            | AgentModal::ConfirmDelete { pending, .. } => *pending,
            AgentModal::Audit(_) => None,
        }
    }

    /// Whether this modal started the mutation described by `outcome`
    fn awaits(&self, outcome: &MutationOutcome) -> bool {
        self.pending() == Some(outcome.request)
    }

    fn set_error(&mut self, message: &str) {
        match self {
            AgentModal::Create { error, pending, .. }
            | AgentModal::Edit { error, pending, .. }
            | AgentModal::ConfirmDelete { error, pending, .. } => {
                *error = Some(message.to_string());
                *pending = None;
            }
            AgentModal::Audit(_) => {}
        }
    }
}

/// Action picked on an agent row or card
#[derive(Debug, Clone, PartialEq)]
enum RowAction {
    Edit(Agent),
    Delete(Agent),
    Audit(Agent),
    Configure(AgentId),
}

/// State of the agent registry page
pub struct AgentManagementPage {
    search_text: String,
    search: Debouncer<String>,
    modal: Option<AgentModal>,
}

impl Default for AgentManagementPage {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            search: Debouncer::new(SEARCH_DEBOUNCE),
            modal: None,
        }
    }
}

impl AgentManagementPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modal(&self) -> Option<&AgentModal> {
        self.modal.as_ref()
    }

    pub fn open_modal(&mut self, modal: AgentModal) {
        self.modal = Some(modal);
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Record a keystroke in the search field
    pub fn on_search_input(&mut self, text: &str, now: Instant) {
        self.search_text = text.to_string();
        self.search.update(self.search_text.clone(), now);
    }

    /// Forward the search text to the store once it has settled
    pub fn flush_search(&mut self, store: &mut AgentStore, now: Instant) {
        if let Some(keyword) = self.search.poll(now) {
            store.set_keyword(keyword.trim());
        }
    }

    /// Close the modal that started a successful mutation, or show the failure inside it
    pub fn handle_outcomes(&mut self, outcomes: &[MutationOutcome]) {
        for outcome in outcomes {
            let close = match self.modal.as_mut() {
                Some(modal) if modal.awaits(outcome) => match outcome.error_message() {
                    None => true,
                    Some(message) => {
                        modal.set_error(message);
                        false
                    }
                },
                _ => false,
            };
            if close {
                self.modal = None;
            }
        }
    }

    /// Start the mutation for the open form; an empty name is rejected locally
    pub fn submit(&mut self, store: &mut AgentStore) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        match modal {
            AgentModal::Create {
                edit_name,
                edit_specialty,
                error,
                pending,
            } => {
                if edit_name.trim().is_empty() {
                    *error = Some("Name is required".to_string());
                    return;
                }
                *error = None;
                *pending = Some(store.handle_create(edit_name.trim(), edit_specialty.trim()));
            }
            AgentModal::Edit {
                id,
                edit_name,
                edit_specialty,
                error,
                pending,
            } => {
                if edit_name.trim().is_empty() {
                    *error = Some("Name is required".to_string());
                    return;
                }
                *error = None;
                *pending = Some(store.handle_update(id, edit_name.trim(), edit_specialty.trim()));
            }
            AgentModal::ConfirmDelete {
                id, error, pending, ..
            } => {
                *error = None;
                *pending = Some(store.handle_delete(id));
            }
            AgentModal::Audit(_) => {}
        }
    }

    fn apply_row_action(&mut self, action: RowAction, app: &mut AppState) {
        match action {
            RowAction::Edit(agent) => self.open_modal(AgentModal::edit(&agent)),
            RowAction::Delete(agent) => {
                if agent.is_deletable() {
                    self.open_modal(AgentModal::confirm_delete(&agent));
                }
            }
            RowAction::Audit(agent) => self.open_modal(AgentModal::Audit(AuditView::open(&agent))),
            RowAction::Configure(id) => app.navigate(Route::AgentConfig(id)),
        }
    }

    /// Render the page into the route outlet
    pub fn render(&mut self, ui: &mut egui::Ui, store: &mut AgentStore, app: &mut AppState) {
        let now = Instant::now();
        self.flush_search(store, now);
        if let Some(remaining) = self.search.remaining(now) {
            ui.ctx().request_repaint_after(remaining);
        }

        page_header(ui, "Agents", "Supervisors, workers and scouters watching your estate");

        if let Some(message) = store.error().map(str::to_string) {
            match error_banner(ui, &message) {
                Some(BannerAction::Retry) => {
                    store.dismiss_error();
                    store.refresh();
                }
                Some(BannerAction::Dismiss) => store.dismiss_error(),
                None => {}
            }
            ui.add_space(8.0);
        }

        self.render_toolbar(ui, store, app, now);
        ui.add_space(8.0);

        let agents: Vec<Agent> = store.agents().into_iter().cloned().collect();
        let mut action = None;
        egui::ScrollArea::vertical()
            .id_source("agent_registry_scroll")
            .auto_shrink([false, true])
            .max_height((ui.available_height() - 40.0).max(120.0))
            .show(ui, |ui| {
                if agents.is_empty() {
                    if store.loading() {
                        ui.vertical_centered(|ui| {
                            ui.add_space(40.0);
                            ui.spinner();
                        });
                    } else {
                        empty_state(ui, "No agents found", "Try another keyword or role filter");
                    }
                } else {
                    action = match app.ui_state.agent_view {
                        ViewMode::List => render_table(ui, &agents),
                        ViewMode::Cards => render_cards(ui, &agents),
                    };
                }
            });
        if let Some(action) = action {
            self.apply_row_action(action, app);
        }

        ui.add_space(8.0);
        render_pagination(ui, store);

        self.render_modal(ui.ctx(), store);
    }

    fn render_toolbar(
        &mut self,
        ui: &mut egui::Ui,
        store: &mut AgentStore,
        app: &mut AppState,
        now: Instant,
    ) {
        ui.horizontal(|ui| {
            let mut text = self.search_text.clone();
            let response = ui.add(
                egui::TextEdit::singleline(&mut text)
                    .hint_text("Search name or specialty")
                    .desired_width(240.0),
            );
            if response.changed() {
                self.on_search_input(&text, now);
                ui.ctx().request_repaint_after(SEARCH_DEBOUNCE);
            }

            ui.add_space(12.0);
            let current = store.role_filter();
            for filter in RoleFilter::ALL_FILTERS {
                if ui.selectable_label(current == filter, filter.label()).clicked() {
                    store.set_role_filter(filter);
                }
            }

            ui.add_space(12.0);
            let view = &mut app.ui_state.agent_view;
            ui.selectable_value(view, ViewMode::List, "☰ List");
            ui.selectable_value(view, ViewMode::Cards, "▦ Cards");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if primary_button(ui, "+ New Agent").clicked() {
                    self.open_modal(AgentModal::create());
                }
                if store.loading() {
                    ui.spinner();
                }
            });
        });
    }

    fn render_modal(&mut self, ctx: &egui::Context, store: &mut AgentStore) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };

        let mut open = true;
        let mut submit = false;
        let mut cancel = false;

        match modal {
            AgentModal::Audit(view) => {
                open = view.show(ctx);
            }
            AgentModal::Create {
                edit_name,
                edit_specialty,
                error,
                ..
            } => {
                let busy = store.creating();
                form_window(ctx, "New Agent", &mut open, |ui| {
                    agent_form(ui, edit_name, edit_specialty);
                    if let Some(message) = error {
                        error_text(ui, message);
                    }
                    ui.horizontal(|ui| {
                        submit = busy_button(ui, "Create", busy).clicked();
                        cancel = ui.button("Cancel").clicked();
                    });
                });
            }
            AgentModal::Edit {
                edit_name,
                edit_specialty,
                error,
                ..
            } => {
                let busy = store.updating();
                form_window(ctx, "Edit Agent", &mut open, |ui| {
                    agent_form(ui, edit_name, edit_specialty);
                    if let Some(message) = error {
                        error_text(ui, message);
                    }
                    ui.horizontal(|ui| {
                        submit = busy_button(ui, "Save", busy).clicked();
                        cancel = ui.button("Cancel").clicked();
                    });
                });
            }
            AgentModal::ConfirmDelete { name, error, .. } => {
                let busy = store.deleting();
                form_window(ctx, "Delete Agent", &mut open, |ui| {
                    ui.label(format!("Delete worker \"{}\"? This cannot be undone.", name));
                    if let Some(message) = error {
                        error_text(ui, message);
                    }
                    ui.horizontal(|ui| {
                        ui.add_enabled_ui(!busy, |ui| {
                            submit = danger_button(ui, "Delete").clicked();
                        });
                        if busy {
                            ui.spinner();
                        }
                        cancel = ui.button("Cancel").clicked();
                    });
                });
            }
        }

        if !open || cancel {
            self.close_modal();
        } else if submit {
            self.submit(store);
        }
    }
}

fn form_window(
    ctx: &egui::Context,
    title: &str,
    open: &mut bool,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(open)
        .show(ctx, |ui| {
            ui.set_min_width(340.0);
            add_contents(ui);
        });
}

fn agent_form(ui: &mut egui::Ui, edit_name: &mut String, edit_specialty: &mut String) {
    egui::Grid::new("agent_form_grid")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label("Name");
            ui.text_edit_singleline(edit_name);
            ui.end_row();
            ui.label("Specialty");
            ui.text_edit_singleline(edit_specialty);
            ui.end_row();
        });
    ui.add_space(8.0);
}

fn row_actions(ui: &mut egui::Ui, agent: &Agent, action: &mut Option<RowAction>) {
    if ui.small_button("Edit").clicked() {
        *action = Some(RowAction::Edit(agent.clone()));
    }
    if ui.small_button("Audit").clicked() {
        *action = Some(RowAction::Audit(agent.clone()));
    }
    if ui.small_button("Configure").clicked() {
        *action = Some(RowAction::Configure(agent.id.clone()));
    }
    if agent.is_deletable() && danger_button(ui, "Delete").clicked() {
        *action = Some(RowAction::Delete(agent.clone()));
    }
}

fn render_table(ui: &mut egui::Ui, agents: &[Agent]) -> Option<RowAction> {
    let mut action = None;
    egui::Grid::new("agent_table")
        .num_columns(6)
        .striped(true)
        .spacing([16.0, 8.0])
        .show(ui, |ui| {
            for header in ["Name", "Role", "Status", "Specialty", "Findings", ""] {
                ui.label(egui::RichText::new(header).strong());
            }
            ui.end_row();

            for agent in agents {
                ui.vertical(|ui| {
                    ui.label(&agent.name);
                    ui.label(egui::RichText::new(&agent.id).monospace().small().weak());
                });
                role_badge(ui, agent.role);
                status_badge(ui, agent.status);
                ui.label(&agent.specialty);
                findings_badge(ui, agent.findings);
                ui.horizontal(|ui| row_actions(ui, agent, &mut action));
                ui.end_row();
            }
        });
    action
}

fn render_cards(ui: &mut egui::Ui, agents: &[Agent]) -> Option<RowAction> {
    let mut action = None;
    ui.horizontal_wrapped(|ui| {
        for agent in agents {
            egui::Frame::group(ui.style())
                .rounding(egui::Rounding::same(6.0))
                .inner_margin(egui::Margin::same(10.0))
                .show(ui, |ui| {
                    ui.set_width(230.0);
                    ui.vertical(|ui| {
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(&agent.name).strong());
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| status_badge(ui, agent.status),
                            );
                        });
                        role_badge(ui, agent.role);
                        ui.label(egui::RichText::new(&agent.specialty).weak());
                        findings_badge(ui, agent.findings);
                        ui.add_space(4.0);
                        ui.horizontal_wrapped(|ui| row_actions(ui, agent, &mut action));
                    });
                });
        }
    });
    action
}

fn render_pagination(ui: &mut egui::Ui, store: &mut AgentStore) {
    ui.horizontal(|ui| {
        if ui
            .add_enabled(store.can_prev(), egui::Button::new("◀ Prev"))
            .clicked()
        {
            store.set_page(store.page() - 1);
        }
        ui.label(format!(
            "Page {} of {} · {} agents",
            store.page(),
            store.total_pages(),
            store.total()
        ));
        if ui
            .add_enabled(store.can_next(), egui::Button::new("Next ▶"))
            .clicked()
        {
            store.set_page(store.page() + 1);
        }
    });
}
