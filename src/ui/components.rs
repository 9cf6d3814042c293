// Reusable UI components
// Provides common UI elements for the application

use crate::state::{AgentFindings, AgentRole, AgentStatus};
use eframe::egui;

/// Render a status badge with colored text (no background bar)
/// Colors: Idle (gray), Thinking (blue), Working (green), Waiting (yellow), Error (red)
pub fn status_badge(ui: &mut egui::Ui, status: AgentStatus) {
    let (text, text_color) = match status {
        AgentStatus::Idle => ("Idle", egui::Color32::GRAY),
        AgentStatus::Thinking => ("Thinking", egui::Color32::from_rgb(80, 150, 255)),
        AgentStatus::Working => ("Working", egui::Color32::from_rgb(0, 200, 0)),
        AgentStatus::Waiting => ("Waiting", egui::Color32::from_rgb(220, 180, 0)),
        AgentStatus::Error => ("Error", egui::Color32::from_rgb(220, 0, 0)),
    };

    ui.colored_label(text_color, format!("● {}", text));
}

/// Render a role badge; supervisors are emphasized
pub fn role_badge(ui: &mut egui::Ui, role: AgentRole) {
    let color = match role {
        AgentRole::GlobalSupervisor => egui::Color32::from_rgb(190, 120, 255),
        AgentRole::TeamSupervisor => egui::Color32::from_rgb(140, 140, 255),
        AgentRole::Worker => egui::Color32::from_rgb(120, 200, 200),
        AgentRole::Scouter => egui::Color32::from_rgb(230, 150, 80),
    };
    let text = egui::RichText::new(role.label()).color(color).small();
    if role.is_supervisor() {
        ui.label(text.strong());
    } else {
        ui.label(text);
    }
}

/// Render warning / critical counters
pub fn findings_badge(ui: &mut egui::Ui, findings: AgentFindings) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 6.0;
        let warn_color = if findings.warnings > 0 {
            egui::Color32::from_rgb(220, 180, 0)
        } else {
            egui::Color32::GRAY
        };
        let crit_color = if findings.critical > 0 {
            egui::Color32::from_rgb(220, 0, 0)
        } else {
            egui::Color32::GRAY
        };
        ui.colored_label(warn_color, format!("⚠ {}", findings.warnings))
            .on_hover_text("Warnings");
        ui.colored_label(crit_color, format!("⛔ {}", findings.critical))
            .on_hover_text("Critical");
    });
}

/// Render a primary action button
pub fn primary_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    ui.button(egui::RichText::new(text).strong())
}

/// Render a primary button that is disabled while `busy`
pub fn busy_button(ui: &mut egui::Ui, text: &str, busy: bool) -> egui::Response {
    ui.horizontal(|ui| {
        let response = ui.add_enabled(!busy, egui::Button::new(egui::RichText::new(text).strong()));
        if busy {
            ui.spinner();
        }
        response
    })
    .inner
}

/// Render a destructive action button (red)
pub fn danger_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    ui.button(egui::RichText::new(text).color(egui::Color32::from_rgb(220, 0, 0)))
}

/// Inline error line used inside modals and forms
pub fn error_text(ui: &mut egui::Ui, message: &str) {
    ui.colored_label(egui::Color32::from_rgb(220, 60, 60), message);
}

/// Action chosen on an error banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerAction {
    Retry,
    Dismiss,
}

/// Top-of-page error banner with retry and dismiss buttons
pub fn error_banner(ui: &mut egui::Ui, message: &str) -> Option<BannerAction> {
    let mut action = None;
    egui::Frame::none()
        .fill(egui::Color32::from_rgba_unmultiplied(200, 40, 40, 40))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(200, 40, 40)))
        .rounding(egui::Rounding::same(4.0))
        .inner_margin(egui::Margin::same(8.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                error_text(ui, message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✕").on_hover_text("Dismiss").clicked() {
                        action = Some(BannerAction::Dismiss);
                    }
                    if ui.button("Retry").clicked() {
                        action = Some(BannerAction::Retry);
                    }
                });
            });
        });
    action
}

/// Page heading with an optional subtitle
pub fn page_header(ui: &mut egui::Ui, title: &str, subtitle: &str) {
    ui.add_space(8.0);
    ui.heading(egui::RichText::new(title).size(20.0));
    if !subtitle.is_empty() {
        ui.label(egui::RichText::new(subtitle).weak());
    }
    ui.add_space(4.0);
    ui.separator();
    ui.add_space(8.0);
}

/// Row of small tag chips
pub fn tag_list(ui: &mut egui::Ui, tags: &[String]) {
    ui.horizontal_wrapped(|ui| {
        for tag in tags {
            ui.label(egui::RichText::new(format!("#{}", tag)).small().weak());
        }
    });
}

/// Centered placeholder for empty lists
pub fn empty_state(ui: &mut egui::Ui, title: &str, hint: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(egui::RichText::new(title).italics().weak().size(14.0));
        ui.add_space(8.0);
        ui.label(egui::RichText::new(hint).weak().size(12.0));
    });
}

/// Render markdown-ish text: `#` headings and `-` bullets, the rest as plain lines
pub fn markdown_view(ui: &mut egui::Ui, text: &str) {
    for line in text.lines() {
        let trimmed = line.trim_start();
        if let Some(heading) = trimmed.strip_prefix("## ") {
            ui.add_space(6.0);
            ui.label(egui::RichText::new(heading).strong().size(15.0));
        } else if let Some(heading) = trimmed.strip_prefix("# ") {
            ui.label(egui::RichText::new(heading).heading());
        } else if let Some(item) = trimmed.strip_prefix("- ") {
            ui.label(format!("  • {}", item));
        } else if trimmed.is_empty() {
            ui.add_space(4.0);
        } else {
            ui.label(trimmed);
        }
    }
}
