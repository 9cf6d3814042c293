// UI module
// Contains layout, components, and the dashboard pages

pub mod agent_audit;
pub mod agent_config;
pub mod agent_management;
pub mod components;
pub mod layout;
pub mod pages;
pub mod settings;

pub use layout::{render_app_layout, LayoutContext};

use crate::state::MutationOutcome;
use tracing::debug;

/// Per-page state that survives navigation
#[derive(Default)]
pub struct Pages {
    pub agents: agent_management::AgentManagementPage,
    pub agent_config: agent_config::AgentConfigPage,
    pub resource_teams: pages::ResourceTeams,
    pub prompt_preview: pages::PromptPreview,
    pub login: settings::LoginForm,
}

impl Pages {
    /// Route mutation results to the pages that started them
    pub fn handle_outcomes(&mut self, outcomes: &[MutationOutcome]) {
        for outcome in outcomes {
            debug!(
                request = outcome.request,
                kind = ?outcome.kind,
                target = ?outcome.target,
                ok = outcome.succeeded(),
                "Routing mutation outcome"
            );
        }
        self.agents.handle_outcomes(outcomes);
        self.agent_config.handle_outcomes(outcomes);
    }
}
