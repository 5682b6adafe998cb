//! Categorized, filtered view with per-category counts

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::catalog::{Category, SelectableElement};
use crate::search::QueryFilter;

use super::state::{EngineOptions, SelectionUiState};
use super::token::{effective_token, CategoryToken};

/// Number of shown elements per bucket. Every token is present, zero or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCounts(BTreeMap<CategoryToken, usize>);

impl CategoryCounts {
    fn zeroed() -> Self {
        CategoryCounts(CategoryToken::ALL.into_iter().map(|t| (t, 0)).collect())
    }

    pub fn get(&self, token: CategoryToken) -> usize {
        self.0.get(&token).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryToken, usize)> + '_ {
        self.0.iter().map(|(t, c)| (*t, *c))
    }
}

/// Output of `filter_and_count`
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    pub elements: Vec<Arc<SelectableElement>>,
    pub counts: CategoryCounts,
}

/// Whether any active toggle claims `element`.
fn toggled_in(element: &SelectableElement, ui: &SelectionUiState, prefix: &str) -> bool {
    let token = effective_token(element, prefix);
    if !ui.is_active(token) {
        return false;
    }
    // custom-only narrows snippets, nothing else
    !(ui.custom_only && element.category == Category::Snippet && !element.custom)
}

/// Filter `elements` by the active toggles (OR across buckets) and the query,
/// keeping catalog order, then count the survivors per bucket.
///
/// Counts are taken from the filtered list itself, so they always add up to
/// what is shown.
#[instrument(level = "debug", skip_all, fields(query_len = ui.query.len()))]
pub fn filter_and_count(
    elements: &[Arc<SelectableElement>],
    ui: &SelectionUiState,
    options: &EngineOptions,
) -> FilteredView {
    let prefix = options.specialized_prefix();
    let mut query = QueryFilter::new(&ui.query, options.match_mode);

    let filtered: Vec<Arc<SelectableElement>> = elements
        .iter()
        .filter(|e| toggled_in(e, ui, prefix))
        .filter(|e| query.matches(e))
        .cloned()
        .collect();

    let mut counts = CategoryCounts::zeroed();
    for element in &filtered {
        *counts.0.entry(effective_token(element, prefix)).or_default() += 1;
    }

    debug!(
        total = elements.len(),
        shown = filtered.len(),
        "Filtered palette elements"
    );

    FilteredView {
        elements: filtered,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(name: &str, category: Category) -> Arc<SelectableElement> {
        Arc::new(SelectableElement {
            name: name.to_string(),
            title: name.to_string(),
            category,
            ..Default::default()
        })
    }

    fn names(view: &FilteredView) -> Vec<&str> {
        view.elements.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn no_toggles_shows_nothing() {
        let elements = vec![el("Timer", Category::Connector)];
        let view = filter_and_count(
            &elements,
            &SelectionUiState::default(),
            &EngineOptions::default(),
        );
        assert!(view.elements.is_empty());
        assert_eq!(view.counts.total(), 0);
    }

    #[test]
    fn counts_cover_every_token() {
        let view = filter_and_count(&[], &SelectionUiState::default(), &EngineOptions::default());
        assert_eq!(view.counts.iter().count(), CategoryToken::ALL.len());
    }

    #[test]
    fn custom_only_narrows_snippets() {
        let mut custom = (*el("my-sink", Category::Snippet)).clone();
        custom.custom = true;
        let elements = vec![
            el("kafka-sink", Category::Snippet),
            Arc::new(custom),
            el("Timer", Category::Connector),
        ];
        let mut ui =
            SelectionUiState::with_toggles([CategoryToken::Snippet, CategoryToken::Connector]);
        ui.set_custom_only(true);
        let view = filter_and_count(&elements, &ui, &EngineOptions::default());
        assert_eq!(names(&view), vec!["my-sink", "Timer"]);
        assert_eq!(view.counts.get(CategoryToken::Snippet), 1);
    }

    #[test]
    fn interface_buckets_follow_their_toggles() {
        let elements = vec![
            el("in", Category::InterfaceSource),
            el("out", Category::InterfaceTarget),
        ];
        let ui = SelectionUiState::with_toggles([CategoryToken::InterfaceTarget]);
        let view = filter_and_count(&elements, &ui, &EngineOptions::default());
        assert_eq!(names(&view), vec!["out"]);
        assert_eq!(view.counts.get(CategoryToken::InterfaceTarget), 1);
        assert_eq!(view.counts.get(CategoryToken::InterfaceSource), 0);
    }
}
