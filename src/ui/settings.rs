// Settings and login views

use crate::config::Config;
use crate::state::AppState;
use crate::ui::components::*;
use eframe::egui;

pub fn settings(ui: &mut egui::Ui, config: &Config, app: &mut AppState) {
    page_header(ui, "Settings", "");

    egui::Grid::new("settings_grid")
        .num_columns(2)
        .spacing([16.0, 10.0])
        .show(ui, |ui| {
            ui.label("Registry API");
            ui.label(egui::RichText::new(&config.api_url).monospace());
            ui.end_row();

            ui.label("Mode");
            ui.label(if config.offline {
                "Offline (in-memory demo registry)"
            } else {
                "Online"
            });
            ui.end_row();

            ui.label("Request timeout");
            ui.label(format!("{} s", config.request_timeout.as_secs()));
            ui.end_row();

            ui.label("Signed in as");
            ui.label(app.current_user.as_deref().unwrap_or("nobody"));
            ui.end_row();

            ui.label("Theme");
            ui.horizontal(|ui| {
                ui.selectable_value(&mut app.ui_state.dark_mode, true, "Dark");
                ui.selectable_value(&mut app.ui_state.dark_mode, false, "Light");
            });
            ui.end_row();
        });
}

/// Login form state
#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub error: Option<String>,
}

impl LoginForm {
    /// Sign in with the typed name; keeps an inline error on failure
    pub fn submit(&mut self, app: &mut AppState) -> bool {
        if app.login(&self.username) {
            self.username.clear();
            self.error = None;
            true
        } else {
            self.error = Some("Enter a user name".to_string());
            false
        }
    }

    pub fn render(&mut self, ui: &mut egui::Ui, app: &mut AppState) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.heading(egui::RichText::new("EntropyOPStack").size(24.0));
            ui.add_space(8.0);
            ui.label(egui::RichText::new("Sign in to continue").weak());
            ui.add_space(24.0);

            let response = ui.add(
                egui::TextEdit::singleline(&mut self.username)
                    .hint_text("User name")
                    .desired_width(220.0),
            );
            let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.add_space(8.0);
            if primary_button(ui, "Sign in").clicked() || entered {
                self.submit(app);
            }
            if let Some(message) = &self.error {
                error_text(ui, message);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::Route;

    #[test]
    fn test_login_form() {
        let mut app = AppState::new("operator");
        app.logout();
        let mut form = LoginForm::default();

        assert!(!form.submit(&mut app));
        assert!(form.error.is_some());
        assert_eq!(*app.route(), Route::Login);

        form.username = "alice".to_string();
        assert!(form.submit(&mut app));
        assert!(form.error.is_none());
        assert!(form.username.is_empty());
        assert_eq!(app.current_user.as_deref(), Some("alice"));
    }
}
