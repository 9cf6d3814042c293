// Main application layout
// Fixed header with navigation and the route outlet below it

use crate::config::Config;
use crate::mock::Catalog;
use crate::routes::{Route, NAV_ITEMS};
use crate::state::{AgentStore, AppState};
use crate::ui::{pages, settings, Pages};
use eframe::egui;

/// Everything a page may read or change while rendering
pub struct LayoutContext<'a> {
    pub app: &'a mut AppState,
    pub store: &'a mut AgentStore,
    pub pages: &'a mut Pages,
    pub catalog: &'a Catalog,
    pub config: &'a Config,
}

/// Render the main application layout
/// Header on top, current route below
pub fn render_app_layout(ctx: &egui::Context, cx: LayoutContext<'_>) {
    apply_theme(ctx, cx.app.ui_state.dark_mode);

    if cx.app.is_signed_in() {
        render_header(ctx, cx.app);
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(4.0);
        render_outlet(ui, cx);
    });
}

fn apply_theme(ctx: &egui::Context, dark_mode: bool) {
    if ctx.style().visuals.dark_mode != dark_mode {
        ctx.set_visuals(if dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
    }
}

/// Render the top header: brand, history buttons, nav items and user actions
fn render_header(ctx: &egui::Context, app: &mut AppState) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new("◆ EntropyOPStack")
                    .strong()
                    .size(16.0)
                    .color(egui::Color32::from_rgb(120, 160, 255)),
            );
            ui.add_space(12.0);

            if ui
                .add_enabled(app.navigator.can_go_back(), egui::Button::new("◀"))
                .on_hover_text("Back")
                .clicked()
            {
                app.navigator.back();
            }
            if ui
                .add_enabled(app.navigator.can_go_forward(), egui::Button::new("▶"))
                .on_hover_text("Forward")
                .clicked()
            {
                app.navigator.forward();
            }
            ui.add_space(12.0);

            let section = app.route().section();
            for item in NAV_ITEMS {
                if ui
                    .selectable_label(section == Some(item.path), item.label)
                    .clicked()
                {
                    app.navigate_path(item.path);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Logout").clicked() {
                    app.logout();
                }
                if ui.button("⚙").on_hover_text("Settings").clicked() {
                    app.navigate(Route::Settings);
                }
                if let Some(user) = &app.current_user {
                    ui.label(egui::RichText::new(format!("👤 {}", user)).strong());
                }
            });
        });
        ui.add_space(4.0);
    });
}

/// Render the page for the current route
fn render_outlet(ui: &mut egui::Ui, cx: LayoutContext<'_>) {
    let LayoutContext {
        app,
        store,
        pages: page_state,
        catalog,
        config,
    } = cx;

    if !app.is_signed_in() {
        page_state.login.render(ui, app);
        return;
    }

    match app.route().clone() {
        Route::Dashboard => pages::dashboard(ui, store, catalog, app),
        Route::Topologies => pages::topologies(ui, catalog, app),
        Route::TopologyDetail(id) => pages::topology_detail(ui, catalog, app, &id),
        Route::Resources => pages::resources(ui, catalog, app),
        Route::ResourceDetail(id) => {
            pages::resource_detail(ui, catalog, &mut page_state.resource_teams, app, &id)
        }
        Route::Agents => page_state.agents.render(ui, store, app),
        Route::AgentConfig(id) => page_state.agent_config.render(ui, &id, store, app),
        Route::Reports => pages::reports(ui, catalog, app),
        Route::ReportTemplates => pages::report_templates(ui, catalog),
        Route::ReportDetail(id) => pages::report_detail(ui, catalog, app, &id),
        Route::Discovery => pages::discovery(ui, catalog),
        Route::Prompts => pages::prompts(ui, catalog, &mut page_state.prompt_preview),
        Route::Diagnosis => pages::diagnosis(ui, catalog, app),
        Route::Settings => settings::settings(ui, config, app),
        Route::Login => page_state.login.render(ui, app),
        Route::NotFound(path) => {
            pages::not_found(ui, &format!("No page at {}", path));
            if ui.button("Go to dashboard").clicked() {
                app.navigate(Route::Dashboard);
            }
        }
    }
}
