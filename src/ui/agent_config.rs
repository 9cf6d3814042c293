// Agent configuration page
// Edits the model settings of one agent and saves them through the store

use crate::routes::Route;
use crate::state::{AgentConfig, AgentId, AgentStore, AppState, MutationOutcome, RequestId};
use crate::ui::components::*;
use eframe::egui;

/// Models offered in the picker; any other name can still be typed in
pub const KNOWN_MODELS: &[&str] = &["gemini-2.0-flash", "gemini-1.5-pro", "gemini-1.5-flash"];

pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Editable copy of an agent's configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigForm {
    pub model: String,
    pub temperature: f32,
    pub system_instruction: String,
}

impl From<&AgentConfig> for ConfigForm {
    fn from(config: &AgentConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            system_instruction: config.system_instruction.clone(),
        }
    }
}

impl ConfigForm {
    /// Config to save; temperature is clamped into the accepted range
    pub fn to_config(&self) -> AgentConfig {
        AgentConfig {
            model: self.model.trim().to_string(),
            temperature: clamp_temperature(self.temperature),
            system_instruction: self.system_instruction.clone(),
        }
    }
}

pub fn clamp_temperature(value: f32) -> f32 {
    if value.is_nan() {
        return MIN_TEMPERATURE;
    }
    value.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
}

/// State of the configuration page for the agent in the current route
#[derive(Debug, Default)]
pub struct AgentConfigPage {
    agent_id: Option<AgentId>,
    form: Option<ConfigForm>,
    /// Result of the last save: Ok(notice) or Err(message)
    status: Option<Result<String, String>>,
    /// Save started from this page and not yet answered
    pending: Option<RequestId>,
}

impl AgentConfigPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the page at `id`; loads the agent when it changed
    pub fn open(&mut self, id: &str, store: &mut AgentStore) {
        if self.agent_id.as_deref() == Some(id) {
            return;
        }
        self.agent_id = Some(id.to_string());
        self.form = None;
        self.status = None;
        self.pending = None;
        store.load_agent(id);
    }

    /// Fill the form from the loaded agent once it matches the page
    fn sync_form(&mut self, store: &AgentStore) {
        if self.form.is_some() {
            return;
        }
        if let (Some(id), Some(agent)) = (&self.agent_id, store.detail()) {
            if &agent.id == id {
                self.form = Some(ConfigForm::from(&agent.config));
            }
        }
    }

    pub fn form(&self) -> Option<&ConfigForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut ConfigForm> {
        self.form.as_mut()
    }

    pub fn status(&self) -> Option<&Result<String, String>> {
        self.status.as_ref()
    }

    pub fn save(&mut self, store: &mut AgentStore) {
        if let (Some(id), Some(form)) = (&self.agent_id, &self.form) {
            self.status = None;
            self.pending = Some(store.handle_update_config(id, form.to_config()));
        }
    }

    pub fn handle_outcomes(&mut self, outcomes: &[MutationOutcome]) {
        for outcome in outcomes {
            if self.pending != Some(outcome.request) {
                continue;
            }
            self.pending = None;
            self.status = Some(match outcome.error_message() {
                None => Ok("Configuration saved".to_string()),
                Some(message) => Err(message.to_string()),
            });
        }
    }

    pub fn render(&mut self, ui: &mut egui::Ui, id: &str, store: &mut AgentStore, app: &mut AppState) {
        self.open(id, store);
        self.sync_form(store);

        let title = match store.detail().filter(|agent| agent.id == id) {
            Some(agent) => format!("Configure {}", agent.name),
            None => "Configure agent".to_string(),
        };
        page_header(ui, &title, id);

        if ui.button("◀ Back to agents").clicked() {
            app.navigate(Route::Agents);
        }
        ui.add_space(8.0);

        if self.form.is_none() {
            if store.detail_loading() {
                ui.spinner();
            } else if let Some(message) = store.detail_error() {
                error_text(ui, message);
                if ui.button("Retry").clicked() {
                    store.load_agent(id);
                }
            }
            return;
        }

        let busy = store.updating_config();
        let mut save = false;
        if let Some(form) = self.form.as_mut() {
            egui::Grid::new("agent_config_grid")
                .num_columns(2)
                .spacing([16.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Model");
                    ui.horizontal(|ui| {
                        egui::ComboBox::from_id_source("agent_config_model")
                            .selected_text(form.model.clone())
                            .show_ui(ui, |ui| {
                                for model in KNOWN_MODELS {
                                    ui.selectable_value(&mut form.model, model.to_string(), *model);
                                }
                            });
                        ui.text_edit_singleline(&mut form.model);
                    });
                    ui.end_row();

                    ui.label("Temperature");
                    ui.add(
                        egui::Slider::new(&mut form.temperature, MIN_TEMPERATURE..=MAX_TEMPERATURE)
                            .step_by(0.1)
                            .clamp_to_range(true),
                    );
                    ui.end_row();

                    ui.label("System instruction");
                    ui.add(
                        egui::TextEdit::multiline(&mut form.system_instruction)
                            .desired_rows(8)
                            .desired_width(480.0),
                    );
                    ui.end_row();
                });

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                save = busy_button(ui, "Save configuration", busy).clicked();
            });
        }
        if save {
            self.save(store);
        }

        match &self.status {
            Some(Ok(notice)) => {
                ui.colored_label(egui::Color32::from_rgb(0, 180, 0), notice);
            }
            Some(Err(message)) => error_text(ui, message),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, InMemoryAgentApi};
    use crate::mock;
    use std::sync::Arc;

    fn seeded() -> (Arc<InMemoryAgentApi>, AgentStore) {
        let api = Arc::new(InMemoryAgentApi::new(mock::seed_agents()));
        let store = AgentStore::new(api.clone());
        (api, store)
    }

    #[test]
    fn test_clamp_temperature() {
        assert_eq!(clamp_temperature(-1.0), 0.0);
        assert_eq!(clamp_temperature(0.7), 0.7);
        assert_eq!(clamp_temperature(5.0), 2.0);
        assert_eq!(clamp_temperature(f32::NAN), 0.0);
    }

    #[test]
    fn test_form_loads_then_saves() {
        let (_, mut store) = seeded();
        let mut page = AgentConfigPage::new();
        page.open("agent-w-db", &mut store);
        store.settle();
        page.sync_form(&store);
        assert_eq!(page.form().unwrap().model, "gemini-2.0-flash");

        let form = page.form_mut().unwrap();
        form.model = "gemini-1.5-pro".to_string();
        form.temperature = 9.0;
        page.save(&mut store);
        let outcomes = store.settle();
        page.handle_outcomes(&outcomes);

        assert_eq!(page.status(), Some(&Ok("Configuration saved".to_string())));
        let saved = &store.detail().unwrap().config;
        assert_eq!(saved.model, "gemini-1.5-pro");
        assert_eq!(saved.temperature, MAX_TEMPERATURE);
    }

    #[test]
    fn test_save_failure_is_reported() {
        let (api, mut store) = seeded();
        let mut page = AgentConfigPage::new();
        page.open("agent-w-db", &mut store);
        store.settle();
        page.sync_form(&store);

        api.fail_next(ApiError::Transport("connection reset".to_string()));
        page.save(&mut store);
        let outcomes = store.settle();
        page.handle_outcomes(&outcomes);
        assert!(matches!(page.status(), Some(Err(message)) if message.contains("connection reset")));
    }

    #[test]
    fn test_name_edit_does_not_report_as_config_save() {
        let (_, mut store) = seeded();
        let mut page = AgentConfigPage::new();
        page.open("agent-w-db", &mut store);
        store.settle();
        page.sync_form(&store);

        store.handle_update("agent-w-db", "DB Latency Worker", "Slow queries");
        assert!(!store.updating_config());
        let outcomes = store.settle();
        page.handle_outcomes(&outcomes);
        assert!(page.status().is_none());
    }

    #[test]
    fn test_switching_agent_resets_form() {
        let (_, mut store) = seeded();
        let mut page = AgentConfigPage::new();
        page.open("agent-w-db", &mut store);
        store.settle();
        page.sync_form(&store);
        assert!(page.form().is_some());

        page.open("agent-w-etl", &mut store);
        assert!(page.form().is_none());
        store.settle();
        page.sync_form(&store);
        assert!(page.form().is_some());
    }
}
