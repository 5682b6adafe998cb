//! Bounded list of pinned elements shown above the full palette

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Category, SelectableElement};
use crate::error::Result;
use crate::search::QueryFilter;

use super::state::{EngineOptions, SelectionUiState};
use super::token::CategoryToken;

/// Identity written to the preference store when `element` is chosen.
///
/// Message-flow steps pin their definition name and plain connectors their
/// URI-or-name. Specialized connectors and the remaining categories pin by name.
pub fn pin_identity<'a>(element: &'a SelectableElement, prefix: &str) -> Result<&'a str> {
    match element.category {
        Category::MessageFlow => element.identity(),
        Category::Connector if !element.has_title_prefix(prefix) => element.identity(),
        _ => element.name_identity(),
    }
}

/// Whether `element` is pinned according to `preferred`.
///
/// Message-flow steps are looked up by definition name only while their toggle
/// is on. Plain connectors are always looked up by URI-or-name, whatever the
/// toggles say. Everything else is looked up by name.
fn is_preferred(
    element: &SelectableElement,
    ui: &SelectionUiState,
    preferred: &HashSet<String>,
    prefix: &str,
) -> Result<bool> {
    let key = match element.category {
        Category::MessageFlow if !ui.is_active(CategoryToken::MessageFlow) => {
            element.name_identity()?
        }
        _ => pin_identity(element, prefix)?,
    };
    Ok(preferred.contains(key))
}

/// Pinned elements in catalog order, query-filtered, capped at
/// `options.fast_list_limit`.
///
/// Membership comes from the preference store; ordering does not, so the strip
/// is stable no matter when items were pinned.
pub fn fast_list(
    elements: &[Arc<SelectableElement>],
    ui: &SelectionUiState,
    preferred: &HashSet<String>,
    options: &EngineOptions,
) -> Result<Vec<Arc<SelectableElement>>> {
    let mut fast = Vec::new();
    if preferred.is_empty() || options.fast_list_limit == 0 {
        return Ok(fast);
    }

    let prefix = options.specialized_prefix();
    let mut query = QueryFilter::new(&ui.query, options.match_mode);

    for element in elements {
        if is_preferred(element, ui, preferred, prefix)? && query.matches(element) {
            fast.push(Arc::clone(element));
            if fast.len() == options.fast_list_limit {
                break;
            }
        }
    }

    debug!(
        preferred = preferred.len(),
        shown = fast.len(),
        "Built fast list"
    );
    Ok(fast)
}
