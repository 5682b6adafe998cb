//! Selection session
//!
//! A `Selector` owns everything one open palette needs: the insertion context,
//! the assembled catalog, the user's toggle/query state, and the preference
//! store. Rendering goes through `view()`, which derives the whole view model
//! from current inputs in one pass.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::catalog::{InsertionContext, SelectableElement};
use crate::engine::{
    available_toggles, effective_token, fast_list, filter_and_count, pin_identity,
    selector_title, CategoryToken, EngineOptions, SelectionUiState,
};
use crate::error::Result;
use crate::preferences::{load_preferred_identities, PreferenceStore};

/// Receives the chosen element; the route editor materializes it.
pub trait SelectionSink {
    fn on_select(&mut self, element: &SelectableElement, context: &InsertionContext);
}

impl<F> SelectionSink for F
where
    F: FnMut(&SelectableElement, &InsertionContext),
{
    fn on_select(&mut self, element: &SelectableElement, context: &InsertionContext) {
        self(element, context)
    }
}

/// One category toggle as rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleView {
    pub token: CategoryToken,
    pub label: &'static str,
    pub selected: bool,
    pub count: usize,
}

/// Everything the palette renders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorView {
    pub title: &'static str,
    pub toggles: Vec<ToggleView>,
    pub show_custom_only: bool,
    pub fast: Vec<Arc<SelectableElement>>,
    pub elements: Vec<Arc<SelectableElement>>,
}

pub struct Selector<S: PreferenceStore> {
    context: InsertionContext,
    elements: Vec<Arc<SelectableElement>>,
    ui: SelectionUiState,
    preferred: HashSet<String>,
    options: EngineOptions,
    store: S,
    open: bool,
}

impl<S: PreferenceStore> Selector<S> {
    /// New, closed selector with every available toggle switched on
    pub fn new(
        context: InsertionContext,
        elements: Vec<Arc<SelectableElement>>,
        store: S,
        options: EngineOptions,
    ) -> Self {
        let ui = SelectionUiState::for_context(&context);
        Selector {
            context,
            elements,
            ui,
            preferred: HashSet::new(),
            options,
            store,
            open: false,
        }
    }

    /// Re-read pinned identities and show the palette
    pub fn open(&mut self) -> Result<()> {
        self.refresh_preferred()?;
        self.open = true;
        debug!(elements = self.elements.len(), "Selector opened");
        Ok(())
    }

    pub fn close(&mut self) {
        self.open = false;
        self.ui.clear_query();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn context(&self) -> &InsertionContext {
        &self.context
    }

    pub fn ui(&self) -> &SelectionUiState {
        &self.ui
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn preferred(&self) -> &HashSet<String> {
        &self.preferred
    }

    /// Catalog element pinned under `identity`, else the first one named `identity`
    pub fn find(&self, identity: &str) -> Option<Arc<SelectableElement>> {
        let prefix = self.options.specialized_prefix();
        self.elements
            .iter()
            .find(|e| pin_identity(e, prefix).is_ok_and(|id| id == identity))
            .or_else(|| self.elements.iter().find(|e| e.name == identity))
            .cloned()
    }

    /// Toggles not offered in this context are ignored.
    pub fn set_toggle(&mut self, token: CategoryToken, on: bool) {
        if on && !available_toggles(&self.context).contains(&token) {
            debug!(%token, "Toggle not available in this context");
            return;
        }
        self.ui.set_toggle(token, on);
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.ui.set_query(query);
    }

    pub fn set_custom_only(&mut self, custom_only: bool) {
        self.ui.set_custom_only(custom_only);
    }

    /// Derive the renderable view from current inputs
    pub fn view(&self) -> Result<SelectorView> {
        let filtered = filter_and_count(&self.elements, &self.ui, &self.options);
        let fast = fast_list(&self.elements, &self.ui, &self.preferred, &self.options)?;

        let toggles = available_toggles(&self.context)
            .into_iter()
            .map(|token| ToggleView {
                token,
                label: token.label(),
                selected: self.ui.is_active(token),
                count: filtered.counts.get(token),
            })
            .collect();

        Ok(SelectorView {
            title: selector_title(&self.context),
            toggles,
            show_custom_only: self.ui.is_active(CategoryToken::Snippet),
            fast,
            elements: filtered.elements,
        })
    }

    /// Hand `element` to `sink`, then pin it.
    ///
    /// The sink fires exactly once, before the preference write. A failed
    /// write is returned but does not undo the selection.
    #[instrument(skip_all, fields(element = %element.name))]
    pub fn select(
        &mut self,
        element: &SelectableElement,
        sink: &mut dyn SelectionSink,
    ) -> Result<()> {
        let prefix = self.options.specialized_prefix();
        let token = effective_token(element, prefix);
        let identity = pin_identity(element, prefix)?.to_string();

        self.close();
        sink.on_select(element, &self.context);

        if let Err(e) = self.store.add_preferred(token, &identity) {
            warn!(error = %e, %token, %identity, "Failed to pin selected element");
            return Err(e);
        }
        self.refresh_preferred()?;
        info!(%token, %identity, "Element selected and pinned");
        Ok(())
    }

    /// Remove `element` from the pinned set. Returns whether it was pinned.
    #[instrument(skip_all, fields(element = %element.name))]
    pub fn unpin(&mut self, element: &SelectableElement) -> Result<bool> {
        let prefix = self.options.specialized_prefix();
        let token = effective_token(element, prefix);
        let identity = pin_identity(element, prefix)?;

        let removed = self.store.remove_preferred(token, identity)?;
        self.refresh_preferred()?;
        info!(%token, %identity, removed, "Element unpinned");
        Ok(removed)
    }

    fn refresh_preferred(&mut self) -> Result<()> {
        self.preferred = load_preferred_identities(&self.store, &self.context)?;
        Ok(())
    }
}
