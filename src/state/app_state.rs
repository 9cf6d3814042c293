// Application state management
// Contains navigation, the signed-in user and UI preferences

use crate::routes::{Navigator, Route};

/// Layout of the agent registry page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    List,
    Cards,
}

/// UI-specific state
#[derive(Debug, Clone)]
pub struct UiState {
    pub dark_mode: bool,
    pub agent_view: ViewMode,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            dark_mode: true,
            agent_view: ViewMode::List,
        }
    }
}

/// Main application state
/// Everything the navigation shell needs besides the agent store
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub navigator: Navigator,
    /// Signed-in user shown in the header; None after logout
    pub current_user: Option<String>,
    pub ui_state: UiState,
}

impl AppState {
    /// Create a new application state signed in as `user`
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            current_user: Some(user.into()),
            ..Self::default()
        }
    }

    pub fn route(&self) -> &Route {
        self.navigator.current()
    }

    pub fn navigate(&mut self, route: Route) {
        self.navigator.navigate(route);
    }

    pub fn navigate_path(&mut self, path: &str) {
        self.navigator.navigate_path(path);
    }

    /// Sign in; returns false for a blank name
    pub fn login(&mut self, user: &str) -> bool {
        let user = user.trim();
        if user.is_empty() {
            return false;
        }
        self.current_user = Some(user.to_string());
        self.navigator.navigate(Route::Dashboard);
        true
    }

    /// Sign out and show the login view
    pub fn logout(&mut self) {
        self.current_user = None;
        self.navigator.navigate(Route::Login);
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new("operator");
        assert_eq!(state.current_user.as_deref(), Some("operator"));
        assert_eq!(*state.route(), Route::Dashboard);
        assert_eq!(state.ui_state.agent_view, ViewMode::List);
    }

    #[test]
    fn test_logout_then_login() {
        let mut state = AppState::new("operator");
        state.navigate(Route::Agents);
        state.logout();
        assert!(!state.is_signed_in());
        assert_eq!(*state.route(), Route::Login);

        assert!(!state.login("   "));
        assert!(state.login(" alice "));
        assert_eq!(state.current_user.as_deref(), Some("alice"));
        assert_eq!(*state.route(), Route::Dashboard);
    }
}
