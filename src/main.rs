// EntropyOPStack dashboard - Main Entry Point
// Native Rust GUI for supervising the agents that monitor your infrastructure

mod api;
mod config;
mod mock;
mod routes;
mod state;
mod ui;

use api::{AgentApi, HttpAgentApi, InMemoryAgentApi};
use config::Config;
use eframe::egui;
use mock::Catalog;
use state::{AgentStore, AppState};
use std::sync::Arc;
use tracing::{info, warn};
use ui::{render_app_layout, LayoutContext, Pages};

fn main() -> eframe::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Configure window options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("EntropyOPStack")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([960.0, 600.0]),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "EntropyOPStack",
        options,
        Box::new(move |cc| {
            let api = registry_api(&config);
            let app = EntropyOpStackApp::new(config, api, Some(cc.egui_ctx.clone()));
            Box::new(app)
        }),
    )
}

/// Pick the registry the dashboard talks to
/// Falls back to the in-memory demo roster when offline or when the HTTP client cannot be built
fn registry_api(config: &Config) -> Arc<dyn AgentApi> {
    if config.offline {
        info!("Offline mode: serving the demo roster from memory");
        return Arc::new(InMemoryAgentApi::new(mock::seed_agents()));
    }
    match HttpAgentApi::new(&config.api_url, config.request_timeout) {
        Ok(api) => {
            info!("Using agent registry at {}", config.api_url);
            Arc::new(api)
        }
        Err(err) => {
            warn!(error = %err, "Failed to build HTTP client; falling back to offline mode");
            Arc::new(InMemoryAgentApi::new(mock::seed_agents()))
        }
    }
}

/// Main application struct
/// Owns navigation, the agent store, per-page state and the demo catalog
struct EntropyOpStackApp {
    config: Config,
    state: AppState,
    store: AgentStore,
    pages: Pages,
    catalog: Catalog,
}

impl EntropyOpStackApp {
    /// Create the application and request the first agent page
    fn new(config: Config, api: Arc<dyn AgentApi>, repaint: Option<egui::Context>) -> Self {
        let mut store = AgentStore::new(api);
        if let Some(ctx) = repaint {
            store = store.with_repaint(ctx);
        }
        store.refresh();

        Self {
            state: AppState::new(config.user.clone()),
            config,
            store,
            pages: Pages::default(),
            catalog: Catalog::load(),
        }
    }

    /// Apply finished registry calls and hand mutation results to the pages
    fn sync(&mut self) {
        let outcomes = self.store.poll();
        self.pages.handle_outcomes(&outcomes);
    }
}

impl eframe::App for EntropyOpStackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync();

        // Render the main application layout
        render_app_layout(
            ctx,
            LayoutContext {
                app: &mut self.state,
                store: &mut self.store,
                pages: &mut self.pages,
                catalog: &self.catalog,
                config: &self.config,
            },
        );
    }
}
