//! Live UI state and per-context toggle rules

use std::collections::BTreeSet;

use crate::catalog::InsertionContext;
use crate::config::{PaletteConfig, DEFAULT_FAST_LIST_LIMIT, DEFAULT_SPECIALIZED_PREFIX};
use crate::search::MatchMode;

use super::token::CategoryToken;

/// Toggles, query and custom-only switch as set by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionUiState {
    pub active_toggles: BTreeSet<CategoryToken>,
    pub query: String,
    pub custom_only: bool,
}

impl SelectionUiState {
    /// State with every toggle available in `context` switched on
    pub fn for_context(context: &InsertionContext) -> Self {
        SelectionUiState {
            active_toggles: available_toggles(context).into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_toggles(toggles: impl IntoIterator<Item = CategoryToken>) -> Self {
        SelectionUiState {
            active_toggles: toggles.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn add_toggle(&mut self, token: CategoryToken) {
        self.active_toggles.insert(token);
    }

    pub fn remove_toggle(&mut self, token: CategoryToken) {
        self.active_toggles.remove(&token);
    }

    pub fn set_toggle(&mut self, token: CategoryToken, on: bool) {
        if on {
            self.add_toggle(token);
        } else {
            self.remove_toggle(token);
        }
    }

    pub fn is_active(&self, token: CategoryToken) -> bool {
        self.active_toggles.contains(&token)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn set_custom_only(&mut self, custom_only: bool) {
        self.custom_only = custom_only;
    }
}

/// Toggles offered for `context`, in display order.
///
/// Interface sources only make sense for a route source, interface targets and
/// message-flow steps only inside a route. Route configuration blocks get
/// message-flow steps only.
pub fn available_toggles(context: &InsertionContext) -> Vec<CategoryToken> {
    let route_config = context.is_route_configuration();
    let mut toggles = Vec::with_capacity(CategoryToken::ALL.len());
    if context.is_root() && !route_config {
        toggles.push(CategoryToken::InterfaceSource);
    }
    if !context.is_root() && !route_config {
        toggles.push(CategoryToken::InterfaceTarget);
    }
    if !context.is_root() {
        toggles.push(CategoryToken::MessageFlow);
    }
    if !route_config {
        toggles.push(CategoryToken::Connector);
        toggles.push(CategoryToken::Snippet);
        toggles.push(CategoryToken::SpecializedConnector);
    }
    toggles
}

/// Heading of the selector for `context`
pub fn selector_title(context: &InsertionContext) -> &'static str {
    if context.is_root() {
        "Select source"
    } else {
        "Select step"
    }
}

/// Knobs of the filter engine, derived from `PaletteConfig`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Lowercase title marker of specialized connectors
    specialized_prefix: String,
    pub match_mode: MatchMode,
    pub fast_list_limit: usize,
}

impl EngineOptions {
    pub fn new(specialized_prefix: &str, match_mode: MatchMode, fast_list_limit: usize) -> Self {
        EngineOptions {
            specialized_prefix: specialized_prefix.to_lowercase(),
            match_mode,
            fast_list_limit,
        }
    }

    pub fn from_config(config: &PaletteConfig) -> Self {
        Self::new(
            &config.specialized_prefix,
            config.match_mode,
            config.fast_list_limit,
        )
    }

    pub fn specialized_prefix(&self) -> &str {
        &self.specialized_prefix
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::new(
            DEFAULT_SPECIALIZED_PREFIX,
            MatchMode::default(),
            DEFAULT_FAST_LIST_LIMIT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ROUTE_CONFIGURATION_DEFINITION;

    #[test]
    fn toggles_are_plain_set_operations() {
        let mut state = SelectionUiState::default();
        state.add_toggle(CategoryToken::Connector);
        state.add_toggle(CategoryToken::Connector);
        assert_eq!(state.active_toggles.len(), 1);
        state.set_toggle(CategoryToken::Snippet, true);
        assert!(state.is_active(CategoryToken::Snippet));
        state.remove_toggle(CategoryToken::Connector);
        state.remove_toggle(CategoryToken::MessageFlow);
        assert_eq!(
            state.active_toggles.iter().copied().collect::<Vec<_>>(),
            vec![CategoryToken::Snippet]
        );
        assert!(state.query.is_empty());
    }

    #[test]
    fn root_toggles() {
        assert_eq!(
            available_toggles(&InsertionContext::root()),
            vec![
                CategoryToken::InterfaceSource,
                CategoryToken::Connector,
                CategoryToken::Snippet,
                CategoryToken::SpecializedConnector,
            ]
        );
    }

    #[test]
    fn step_toggles() {
        assert_eq!(
            available_toggles(&InsertionContext::child_of("RouteDefinition")),
            vec![
                CategoryToken::InterfaceTarget,
                CategoryToken::MessageFlow,
                CategoryToken::Connector,
                CategoryToken::Snippet,
                CategoryToken::SpecializedConnector,
            ]
        );
    }

    #[test]
    fn route_configuration_toggles() {
        let ctx = InsertionContext::child_of(ROUTE_CONFIGURATION_DEFINITION);
        assert_eq!(available_toggles(&ctx), vec![CategoryToken::MessageFlow]);
    }

    #[test]
    fn for_context_enables_available_toggles() {
        let state = SelectionUiState::for_context(&InsertionContext::root());
        assert!(state.is_active(CategoryToken::InterfaceSource));
        assert!(!state.is_active(CategoryToken::MessageFlow));
    }

    #[test]
    fn titles() {
        assert_eq!(selector_title(&InsertionContext::root()), "Select source");
        assert_eq!(
            selector_title(&InsertionContext::child_of("RouteDefinition")),
            "Select step"
        );
    }

    #[test]
    fn engine_options_lowercase_the_prefix() {
        let options = EngineOptions::new("ZSegment", MatchMode::Substring, 3);
        assert_eq!(options.specialized_prefix(), "zsegment");
        assert_eq!(EngineOptions::default().fast_list_limit, 7);
    }
}
