// Agent data-access store
// Owns the fetched page, filters and busy flags of the agent registry page.
// Every registry call runs on a background thread; results come back over a
// channel and are applied when the UI calls `poll` at the start of a frame.

use crate::api::{AgentApi, AgentQuery, ApiError};
use crate::state::{Agent, AgentConfig, AgentId, AgentPage, RoleFilter, PAGE_SIZE};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// Message shown when a mutation fails without a usable error string
pub const GENERIC_FAILURE: &str = "Operation failed. Please try again.";

/// Kind of a registry mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    UpdateConfig,
    Delete,
}

/// Identifies one mutation call; returned by the `handle_*` methods
pub type RequestId = u64;

/// Result of a mutation, handed back to the page that started it
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    /// Matches the id returned when the mutation was started
    pub request: RequestId,
    pub kind: MutationKind,
    /// Agent the mutation targeted (None for create)
    pub target: Option<AgentId>,
    /// Created or updated agent on success, error message on failure
    pub result: Result<Option<Agent>, String>,
}

impl MutationOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    /// Error text to show inline, falling back to a generic message
    pub fn error_message(&self) -> Option<&str> {
        match &self.result {
            Ok(_) => None,
            Err(message) if message.trim().is_empty() => Some(GENERIC_FAILURE),
            Err(message) => Some(message),
        }
    }
}

enum StoreEvent {
    Listed {
        generation: u64,
        result: Result<AgentPage, ApiError>,
    },
    Loaded {
        id: AgentId,
        result: Result<Agent, ApiError>,
    },
    Mutated {
        request: RequestId,
        kind: MutationKind,
        target: Option<AgentId>,
        result: Result<Option<Agent>, ApiError>,
    },
}

/// Agent listing state plus asynchronous CRUD operations
pub struct AgentStore {
    api: Arc<dyn AgentApi>,
    tx: Sender<StoreEvent>,
    rx: Receiver<StoreEvent>,
    /// Repainted when a background call finishes
    repaint: Option<egui::Context>,
    /// Incremented per list request; older responses are dropped
    generation: u64,
    in_flight: usize,
    next_request: RequestId,

    page: usize,
    role_filter: RoleFilter,
    keyword: String,

    fetched: Vec<Agent>,
    total: usize,
    total_pages: usize,
    loading: bool,
    error: Option<String>,

    detail: Option<Agent>,
    detail_error: Option<String>,
    detail_loading: bool,

    // Calls in flight per mutation kind
    creating: usize,
    updating: usize,
    updating_config: usize,
    deleting: usize,
}

impl AgentStore {
    /// Create a store over the given registry; nothing is fetched until `refresh`
    pub fn new(api: Arc<dyn AgentApi>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            api,
            tx,
            rx,
            repaint: None,
            generation: 0,
            in_flight: 0,
            next_request: 0,
            page: 1,
            role_filter: RoleFilter::All,
            keyword: String::new(),
            fetched: Vec::new(),
            total: 0,
            total_pages: 1,
            loading: false,
            error: None,
            detail: None,
            detail_error: None,
            detail_loading: false,
            creating: 0,
            updating: 0,
            updating_config: 0,
            deleting: 0,
        }
    }

    /// Request a repaint of `ctx` whenever a background call completes
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    // ---- listing state ----

    /// Agents of the current page that pass the role filter
    ///
    /// SUPERVISOR is resolved here because the server takes a single role.
    pub fn agents(&self) -> Vec<&Agent> {
        self.fetched
            .iter()
            .filter(|agent| self.role_filter.admits(agent.role))
            .collect()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn role_filter(&self) -> RoleFilter {
        self.role_filter
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn creating(&self) -> bool {
        self.creating > 0
    }

    /// Name or specialty edit in flight
    pub fn updating(&self) -> bool {
        self.updating > 0
    }

    /// Model config save in flight
    pub fn updating_config(&self) -> bool {
        self.updating_config > 0
    }

    pub fn deleting(&self) -> bool {
        self.deleting > 0
    }

    /// Agent loaded by `load_agent`
    pub fn detail(&self) -> Option<&Agent> {
        self.detail.as_ref()
    }

    pub fn detail_error(&self) -> Option<&str> {
        self.detail_error.as_deref()
    }

    pub fn detail_loading(&self) -> bool {
        self.detail_loading
    }

    // ---- filters and paging ----

    /// Move to another page, clamped to the known page range
    pub fn set_page(&mut self, page: usize) {
        let page = page.clamp(1, self.total_pages.max(1));
        if page != self.page {
            self.page = page;
            self.refresh();
        }
    }

    /// Change the role filter; resets to page 1
    pub fn set_role_filter(&mut self, filter: RoleFilter) {
        if filter != self.role_filter {
            self.role_filter = filter;
            self.page = 1;
            self.refresh();
        }
    }

    /// Change the keyword filter; resets to page 1
    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        let keyword = keyword.into();
        if keyword != self.keyword {
            self.keyword = keyword;
            self.page = 1;
            self.refresh();
        }
    }

    fn current_query(&self) -> AgentQuery {
        AgentQuery {
            page: self.page,
            size: PAGE_SIZE,
            role: self.role_filter.server_role(),
            keyword: Some(self.keyword.clone()).filter(|k| !k.trim().is_empty()),
        }
    }

    /// Fetch the current page again
    pub fn refresh(&mut self) {
        self.generation += 1;
        self.loading = true;
        let generation = self.generation;
        let query = self.current_query();
        debug!(generation, ?query, "Fetching agent page");
        self.spawn(move |api| StoreEvent::Listed {
            generation,
            result: api.list_agents(&query),
        });
    }

    /// Fetch a single agent into `detail`
    pub fn load_agent(&mut self, id: &str) {
        self.detail_loading = true;
        self.detail_error = None;
        let id = id.to_string();
        self.spawn(move |api| StoreEvent::Loaded {
            result: api.get_agent(&id),
            id,
        });
    }

    // ---- mutations ----

    pub fn handle_create(&mut self, name: &str, specialty: &str) -> RequestId {
        self.creating += 1;
        let request = self.next_request();
        let (name, specialty) = (name.to_string(), specialty.to_string());
        self.spawn(move |api| StoreEvent::Mutated {
            request,
            kind: MutationKind::Create,
            target: None,
            result: api.create_agent(&name, &specialty).map(Some),
        });
        request
    }

    pub fn handle_update(&mut self, id: &str, name: &str, specialty: &str) -> RequestId {
        self.updating += 1;
        let request = self.next_request();
        let (id, name, specialty) = (id.to_string(), name.to_string(), specialty.to_string());
        self.spawn(move |api| StoreEvent::Mutated {
            request,
            kind: MutationKind::Update,
            result: api.update_agent(&id, &name, &specialty).map(Some),
            target: Some(id),
        });
        request
    }

    pub fn handle_update_config(&mut self, id: &str, config: AgentConfig) -> RequestId {
        self.updating_config += 1;
        let request = self.next_request();
        let id = id.to_string();
        self.spawn(move |api| StoreEvent::Mutated {
            request,
            kind: MutationKind::UpdateConfig,
            result: api.update_agent_config(&id, &config).map(Some),
            target: Some(id),
        });
        request
    }

    pub fn handle_delete(&mut self, id: &str) -> RequestId {
        self.deleting += 1;
        let request = self.next_request();
        let id = id.to_string();
        self.spawn(move |api| StoreEvent::Mutated {
            request,
            kind: MutationKind::Delete,
            result: api.delete_agent(&id).map(|_| None),
            target: Some(id),
        });
        request
    }

    // ---- plumbing ----

    fn next_request(&mut self) -> RequestId {
        self.next_request += 1;
        self.next_request
    }

    fn spawn<F>(&mut self, job: F)
    where
        F: FnOnce(&dyn AgentApi) -> StoreEvent + Send + 'static,
    {
        self.in_flight += 1;
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        thread::spawn(move || {
            let event = job(api.as_ref());
            // The store may have been dropped; nothing to deliver to then
            let _ = tx.send(event);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    /// Apply every finished call; returns the mutation outcomes among them
    pub fn poll(&mut self) -> Vec<MutationOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            if let Some(outcome) = self.apply(event) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    fn apply(&mut self, event: StoreEvent) -> Option<MutationOutcome> {
        self.in_flight = self.in_flight.saturating_sub(1);
        match event {
            StoreEvent::Listed { generation, result } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "Dropping stale agent page");
                    return None;
                }
                self.loading = false;
                match result {
                    // A delete can empty the last page; show the new last page instead
                    Ok(page) if page.page > 1 && page.page > page.total_pages.max(1) => {
                        debug!(
                            page = page.page,
                            total_pages = page.total_pages,
                            "Page past the end; fetching the last page"
                        );
                        self.total = page.total;
                        self.total_pages = page.total_pages.max(1);
                        self.page = self.total_pages;
                        self.refresh();
                    }
                    Ok(page) => {
                        self.fetched = page.agents;
                        self.total = page.total;
                        self.total_pages = page.total_pages.max(1);
                        self.page = page.page.max(1);
                        self.error = None;
                    }
                    Err(err) => {
                        warn!(error = %err, "Failed to fetch agents");
                        self.error = Some(err.to_string());
                    }
                }
                None
            }
            StoreEvent::Loaded { id, result } => {
                self.detail_loading = false;
                match result {
                    Ok(agent) => {
                        self.detail = Some(agent);
                        self.detail_error = None;
                    }
                    Err(err) => {
                        warn!(agent_id = %id, error = %err, "Failed to load agent");
                        self.detail = None;
                        self.detail_error = Some(err.to_string());
                    }
                }
                None
            }
            StoreEvent::Mutated {
                request,
                kind,
                target,
                result,
            } => {
                let counter = match kind {
                    MutationKind::Create => &mut self.creating,
                    MutationKind::Update => &mut self.updating,
                    MutationKind::UpdateConfig => &mut self.updating_config,
                    MutationKind::Delete => &mut self.deleting,
                };
                *counter = counter.saturating_sub(1);
                let result = match result {
                    Ok(agent) => {
                        debug!(?kind, ?target, "Mutation succeeded");
                        if kind == MutationKind::Delete {
                            if let Some(id) = &target {
                                let before = self.fetched.len();
                                self.fetched.retain(|agent| &agent.id != id);
                                if self.fetched.len() < before {
                                    self.total = self.total.saturating_sub(1);
                                }
                            }
                        }
                        if let (Some(updated), Some(detail)) = (&agent, self.detail.as_mut()) {
                            if detail.id == updated.id {
                                *detail = updated.clone();
                            }
                        }
                        self.refresh();
                        Ok(agent)
                    }
                    Err(err) => {
                        warn!(?kind, ?target, error = %err, "Mutation failed");
                        Err(err.to_string())
                    }
                };
                Some(MutationOutcome {
                    request,
                    kind,
                    target,
                    result,
                })
            }
        }
    }

    /// Block until every outstanding call has been applied
    #[cfg(test)]
    pub fn settle(&mut self) -> Vec<MutationOutcome> {
        use std::time::Duration;
        let mut outcomes = Vec::new();
        while self.in_flight > 0 {
            let event = self
                .rx
                .recv_timeout(Duration::from_secs(5))
                .expect("background call did not finish");
            if let Some(outcome) = self.apply(event) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::InMemoryAgentApi;
    use crate::mock;
    use crate::state::AgentRole;
    use std::time::Duration;

    fn store_with(api: Arc<InMemoryAgentApi>) -> AgentStore {
        let mut store = AgentStore::new(api);
        store.refresh();
        store.settle();
        store
    }

    fn seeded() -> (Arc<InMemoryAgentApi>, AgentStore) {
        let api = Arc::new(InMemoryAgentApi::new(mock::seed_agents()));
        let store = store_with(Arc::clone(&api));
        (api, store)
    }

    #[test]
    fn test_initial_fetch() {
        let (_, store) = seeded();
        assert!(!store.loading());
        assert_eq!(store.page(), 1);
        assert_eq!(store.agents().len(), PAGE_SIZE);
        assert!(store.total() > PAGE_SIZE);
        assert!(store.error().is_none());
    }

    #[test]
    fn test_pagination_bounds() {
        let (_, mut store) = seeded();
        assert!(!store.can_prev());
        assert!(store.can_next());

        let last = store.total_pages();
        store.set_page(last);
        store.settle();
        assert_eq!(store.page(), last);
        assert!(store.can_prev());
        assert!(!store.can_next());

        // Clamped to the last page
        store.set_page(last + 5);
        store.settle();
        assert_eq!(store.page(), last);
    }

    #[test]
    fn test_worker_filter_hides_supervisors() {
        let (_, mut store) = seeded();
        store.set_role_filter(RoleFilter::Worker);
        store.settle();
        assert!(!store.agents().is_empty());
        assert!(store
            .agents()
            .iter()
            .all(|agent| agent.role == AgentRole::Worker));
    }

    #[test]
    fn test_supervisor_filter_hides_workers() {
        let (_, mut store) = seeded();
        store.set_role_filter(RoleFilter::Supervisor);
        store.settle();
        assert!(!store.agents().is_empty());
        assert!(store.agents().iter().all(|agent| agent.role.is_supervisor()));
    }

    #[test]
    fn test_filter_change_resets_page() {
        let (_, mut store) = seeded();
        store.set_page(2);
        store.settle();
        assert_eq!(store.page(), 2);
        store.set_keyword("kafka");
        store.settle();
        assert_eq!(store.page(), 1);
        assert!(store.agents().iter().all(|agent| {
            agent.name.to_lowercase().contains("kafka")
                || agent.specialty.to_lowercase().contains("kafka")
        }));
    }

    #[test]
    fn test_stale_page_is_dropped() {
        let (_, mut store) = seeded();
        store.set_keyword("zzz-no-match");
        store.set_keyword("kafka");
        store.settle();
        assert_eq!(store.keyword(), "kafka");
        assert!(!store.agents().is_empty());
    }

    #[test]
    fn test_list_error_sets_banner_and_keeps_rows() {
        let (api, mut store) = seeded();
        let before = store.agents().len();
        api.fail_next(ApiError::Transport("connection refused".to_string()));
        store.refresh();
        store.settle();
        assert!(store.error().unwrap().contains("connection refused"));
        assert_eq!(store.agents().len(), before);

        store.dismiss_error();
        assert!(store.error().is_none());
    }

    #[test]
    fn test_create_refreshes_list() {
        let (api, mut store) = seeded();
        let total = store.total();
        store.handle_create("Queue Worker", "RabbitMQ backlog");
        assert!(store.creating());
        let outcomes = store.settle();
        assert!(!store.creating());
        assert_eq!(outcomes.len(), 1);
        let created = outcomes[0].result.clone().unwrap().unwrap();
        assert_eq!(created.role, AgentRole::Worker);
        assert_eq!(store.total(), total + 1);
        assert_eq!(api.len(), total + 1);
    }

    #[test]
    fn test_create_failure_reports_server_message() {
        let (_, mut store) = seeded();
        store.handle_create("   ", "");
        let outcomes = store.settle();
        assert!(!outcomes[0].succeeded());
        assert!(outcomes[0]
            .error_message()
            .unwrap()
            .contains("name cannot be empty"));
    }

    #[test]
    fn test_delete_removes_only_after_success() {
        let (_, mut store) = seeded();
        store.set_role_filter(RoleFilter::Worker);
        store.settle();
        let id = store.agents()[0].id.clone();

        store.handle_delete(&id);
        // Still visible until the call reports back
        assert!(store.agents().iter().any(|agent| agent.id == id));
        let outcomes = store.settle();
        assert!(outcomes[0].succeeded());
        assert!(!store.agents().iter().any(|agent| agent.id == id));
    }

    #[test]
    fn test_delete_failure_keeps_agent() {
        let (api, mut store) = seeded();
        store.set_role_filter(RoleFilter::Worker);
        store.settle();
        let id = store.agents()[0].id.clone();

        api.fail_next(ApiError::server(500, "Persistence error: disk full"));
        store.handle_delete(&id);
        let outcomes = store.settle();
        assert_eq!(
            outcomes[0].error_message(),
            Some("Persistence error: disk full")
        );
        assert!(store.agents().iter().any(|agent| agent.id == id));
        assert!(!store.deleting());
    }

    #[test]
    fn test_blank_error_uses_generic_message() {
        let outcome = MutationOutcome {
            request: 1,
            kind: MutationKind::Update,
            target: Some("x".to_string()),
            result: Err(String::new()),
        };
        assert_eq!(outcome.error_message(), Some(GENERIC_FAILURE));
    }

    #[test]
    fn test_update_config_refreshes_detail() {
        let (_, mut store) = seeded();
        let id = store.agents()[3].id.clone();
        store.load_agent(&id);
        store.settle();
        assert_eq!(store.detail().unwrap().id, id);

        let config = AgentConfig {
            model: "gemini-1.5-pro".to_string(),
            temperature: 1.2,
            system_instruction: "Summarize in one line.".to_string(),
        };
        store.handle_update_config(&id, config.clone());
        let outcomes = store.settle();
        assert!(outcomes[0].succeeded());
        assert_eq!(store.detail().unwrap().config, config);
    }

    #[test]
    fn test_delete_of_last_row_on_last_page_moves_back() {
        let (_, mut store) = seeded();
        for n in 1..=PAGE_SIZE + 1 {
            store.handle_create(&format!("Relay {}", n), "Message relay backlog");
        }
        store.settle();
        store.set_keyword("relay");
        store.settle();
        assert_eq!(store.total_pages(), 2);

        store.set_page(2);
        store.settle();
        assert_eq!(store.agents().len(), 1);
        let id = store.agents()[0].id.clone();

        store.handle_delete(&id);
        store.settle();
        assert_eq!(store.page(), 1);
        assert_eq!(store.total_pages(), 1);
        assert!(!store.can_prev());
        assert_eq!(store.agents().len(), PAGE_SIZE);
    }

    #[test]
    fn test_requests_get_distinct_ids() {
        let (_, mut store) = seeded();
        let first = store.handle_create("Relay A", "");
        let second = store.handle_create("Relay B", "");
        assert_ne!(first, second);
        let mut ids: Vec<RequestId> = store.settle().iter().map(|o| o.request).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_edit_and_config_save_tracked_separately() {
        let (_, mut store) = seeded();
        let id = store.agents()[3].id.clone();
        store.handle_update(&id, "Renamed Worker", "");
        store.handle_update_config(&id, AgentConfig::default());
        assert!(store.updating());
        assert!(store.updating_config());

        // Receive both results, then apply the edit alone
        let mut events: Vec<StoreEvent> = (0..2)
            .map(|_| store.rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect();
        events.sort_by_key(|event| match event {
            StoreEvent::Mutated { kind, .. } => *kind == MutationKind::UpdateConfig,
            _ => true,
        });
        let config_event = events.pop().unwrap();
        let edit_event = events.pop().unwrap();

        let outcome = store.apply(edit_event).unwrap();
        assert_eq!(outcome.kind, MutationKind::Update);
        assert!(!store.updating());
        assert!(store.updating_config());

        store.apply(config_event);
        store.settle();
        assert!(!store.updating_config());
    }

    #[test]
    fn test_load_missing_agent_sets_detail_error() {
        let (_, mut store) = seeded();
        store.load_agent("does-not-exist");
        store.settle();
        assert!(store.detail().is_none());
        assert!(store.detail_error().unwrap().contains("does-not-exist"));
    }
}
