// Route table and navigation history
// Path templates use `:id` as the entity placeholder.

pub const HOME: &str = "/";
pub const TOPOLOGIES: &str = "/topologies";
pub const TOPOLOGY_DETAIL: &str = "/topologies/:id";
pub const RESOURCES: &str = "/resources";
pub const RESOURCE_DETAIL: &str = "/resources/:id";
pub const AGENTS: &str = "/agents";
pub const AGENT_CONFIG: &str = "/agents/:id/config";
pub const REPORTS: &str = "/reports";
pub const REPORT_TEMPLATES: &str = "/reports/templates";
pub const REPORT_DETAIL: &str = "/reports/:id";
pub const DISCOVERY: &str = "/discovery";
pub const PROMPTS: &str = "/prompts";
pub const DIAGNOSIS: &str = "/diagnosis";
pub const SETTINGS: &str = "/settings";
pub const LOGIN: &str = "/login";

/// Interpolate an entity id into a path template
pub fn with_id(template: &str, id: &str) -> String {
    template.replace(":id", id)
}

pub fn topology_detail(id: &str) -> String {
    with_id(TOPOLOGY_DETAIL, id)
}

pub fn resource_detail(id: &str) -> String {
    with_id(RESOURCE_DETAIL, id)
}

pub fn agent_config(id: &str) -> String {
    with_id(AGENT_CONFIG, id)
}

pub fn report_detail(id: &str) -> String {
    with_id(REPORT_DETAIL, id)
}

/// Entry of the header navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

/// Header navigation, in display order
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { label: "Dashboard", path: HOME },
    NavItem { label: "Topologies", path: TOPOLOGIES },
    NavItem { label: "Resources", path: RESOURCES },
    NavItem { label: "Agents", path: AGENTS },
    NavItem { label: "Reports", path: REPORTS },
    NavItem { label: "Discovery", path: DISCOVERY },
    NavItem { label: "Prompts", path: PROMPTS },
    NavItem { label: "Diagnosis", path: DIAGNOSIS },
];

/// A resolved location in the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Topologies,
    TopologyDetail(String),
    Resources,
    ResourceDetail(String),
    Agents,
    AgentConfig(String),
    Reports,
    ReportTemplates,
    ReportDetail(String),
    Discovery,
    Prompts,
    Diagnosis,
    Settings,
    Login,
    NotFound(String),
}

impl Route {
    /// Resolve a path; unknown paths become `NotFound`
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Dashboard,
            ["topologies"] => Route::Topologies,
            ["topologies", id] => Route::TopologyDetail(id.to_string()),
            ["resources"] => Route::Resources,
            ["resources", id] => Route::ResourceDetail(id.to_string()),
            ["agents"] => Route::Agents,
            ["agents", id, "config"] => Route::AgentConfig(id.to_string()),
            ["reports"] => Route::Reports,
            ["reports", "templates"] => Route::ReportTemplates,
            ["reports", id] => Route::ReportDetail(id.to_string()),
            ["discovery"] => Route::Discovery,
            ["prompts"] => Route::Prompts,
            ["diagnosis"] => Route::Diagnosis,
            ["settings"] => Route::Settings,
            ["login"] => Route::Login,
            _ => Route::NotFound(path.to_string()),
        }
    }

    /// Concrete path of the route
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => HOME.to_string(),
            Route::Topologies => TOPOLOGIES.to_string(),
            Route::TopologyDetail(id) => topology_detail(id),
            Route::Resources => RESOURCES.to_string(),
            Route::ResourceDetail(id) => resource_detail(id),
            Route::Agents => AGENTS.to_string(),
            Route::AgentConfig(id) => agent_config(id),
            Route::Reports => REPORTS.to_string(),
            Route::ReportTemplates => REPORT_TEMPLATES.to_string(),
            Route::ReportDetail(id) => report_detail(id),
            Route::Discovery => DISCOVERY.to_string(),
            Route::Prompts => PROMPTS.to_string(),
            Route::Diagnosis => DIAGNOSIS.to_string(),
            Route::Settings => SETTINGS.to_string(),
            Route::Login => LOGIN.to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Nav item path highlighted while this route is shown
    pub fn section(&self) -> Option<&'static str> {
        match self {
            Route::Dashboard => Some(HOME),
            Route::Topologies | Route::TopologyDetail(_) => Some(TOPOLOGIES),
            Route::Resources | Route::ResourceDetail(_) => Some(RESOURCES),
            Route::Agents | Route::AgentConfig(_) => Some(AGENTS),
            Route::Reports | Route::ReportTemplates | Route::ReportDetail(_) => Some(REPORTS),
            Route::Discovery => Some(DISCOVERY),
            Route::Prompts => Some(PROMPTS),
            Route::Diagnosis => Some(DIAGNOSIS),
            Route::Settings | Route::Login | Route::NotFound(_) => None,
        }
    }
}

/// Browser-style history over routes
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<Route>,
    index: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Dashboard)
    }
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self {
            history: vec![start],
            index: 0,
        }
    }

    pub fn current(&self) -> &Route {
        &self.history[self.index]
    }

    /// Push a route; drops any forward history. Re-navigating to the current
    /// route is a no-op.
    pub fn navigate(&mut self, route: Route) {
        if *self.current() == route {
            return;
        }
        self.history.truncate(self.index + 1);
        self.history.push(route);
        self.index += 1;
    }

    pub fn navigate_path(&mut self, path: &str) {
        self.navigate(Route::parse(path));
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.history.len()
    }

    /// Step back; returns false at the start of history
    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward; returns false at the end of history
    pub fn forward(&mut self) -> bool {
        if self.can_go_forward() {
            self.index += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_helpers() {
        assert_eq!(topology_detail("topo-data"), "/topologies/topo-data");
        assert_eq!(resource_detail("orders-db"), "/resources/orders-db");
        assert_eq!(agent_config("agent-w-db"), "/agents/agent-w-db/config");
        assert_eq!(report_detail("report-101"), "/reports/report-101");
    }

    #[test]
    fn test_parse_round_trips_every_nav_item() {
        for item in NAV_ITEMS {
            let route = Route::parse(item.path);
            assert_eq!(route.path(), item.path);
            assert_eq!(route.section(), Some(item.path));
        }
    }

    #[test]
    fn test_parse_detail_routes() {
        assert_eq!(
            Route::parse("/resources/orders-db"),
            Route::ResourceDetail("orders-db".to_string())
        );
        assert_eq!(
            Route::parse("/agents/agent-1/config/"),
            Route::AgentConfig("agent-1".to_string())
        );
        assert_eq!(Route::parse("/reports/templates"), Route::ReportTemplates);
        assert_eq!(
            Route::parse("/reports/report-101?tab=raw"),
            Route::ReportDetail("report-101".to_string())
        );
        assert!(matches!(Route::parse("/agents/x/y"), Route::NotFound(_)));
    }

    #[test]
    fn test_clicking_item_routes_to_detail_with_id() {
        let mut nav = Navigator::default();
        nav.navigate_path(RESOURCES);
        nav.navigate_path(&resource_detail("kafka-main"));
        let path = nav.current().path();
        let id = path.strip_prefix("/resources/").unwrap();
        assert_eq!(id, "kafka-main");
        assert!(!id.contains('/'));
    }

    #[test]
    fn test_back_and_forward_restore_routes() {
        let mut nav = Navigator::default();
        nav.navigate(Route::Resources);
        nav.navigate(Route::ResourceDetail("orders-db".to_string()));

        assert!(nav.back());
        assert_eq!(*nav.current(), Route::Resources);
        assert!(nav.back());
        assert_eq!(*nav.current(), Route::Dashboard);
        assert!(!nav.back());

        assert!(nav.forward());
        assert!(nav.forward());
        assert_eq!(
            *nav.current(),
            Route::ResourceDetail("orders-db".to_string())
        );
        assert!(!nav.forward());
    }

    #[test]
    fn test_navigate_truncates_forward_history() {
        let mut nav = Navigator::default();
        nav.navigate(Route::Agents);
        nav.navigate(Route::Reports);
        nav.back();
        nav.navigate(Route::Topologies);
        assert!(!nav.can_go_forward());
        nav.back();
        assert_eq!(*nav.current(), Route::Agents);
    }

    #[test]
    fn test_navigate_to_current_is_noop() {
        let mut nav = Navigator::default();
        nav.navigate(Route::Dashboard);
        assert!(!nav.can_go_back());
    }
}
