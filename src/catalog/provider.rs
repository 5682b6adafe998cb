//! Catalog providers and blocklists
//!
//! A provider enumerates the raw elements of one category for an insertion
//! context. `StaticCatalog` is the file-backed provider used by the CLI and
//! the tests; editors plug in their own implementation.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::error::{PaletteError, Result};

use super::types::{Category, DefinitionKind, InsertionContext, SelectableElement};

/// Read-only source of palette elements
pub trait CatalogProvider {
    /// Elements of `category` that may be inserted in `context`, in display order.
    /// A category the provider knows nothing about yields an empty list.
    fn list_for(&self, context: &InsertionContext, category: Category) -> Vec<SelectableElement>;
}

/// Identities hidden from the palette for one assembly
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocklist {
    /// Connector URIs (or names when a connector has no URI)
    pub connectors: HashSet<String>,
    /// Snippet names
    pub snippets: HashSet<String>,
}

impl Blocklist {
    pub fn new<C, S>(connectors: C, snippets: S) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Blocklist {
            connectors: connectors.into_iter().map(Into::into).collect(),
            snippets: snippets.into_iter().map(Into::into).collect(),
        }
    }
}

/// On-disk catalog format
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    elements: Vec<SelectableElement>,
}

/// In-memory catalog, usually loaded from a JSON file
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    elements: Vec<SelectableElement>,
}

impl StaticCatalog {
    pub fn new(elements: Vec<SelectableElement>) -> Self {
        StaticCatalog { elements }
    }

    /// Parse a catalog from JSON text (`{"elements": [...]}`)
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json).map_err(PaletteError::CatalogParse)?;
        Ok(StaticCatalog::new(file.elements))
    }

    /// Load a catalog file from disk
    #[instrument(name = "catalog_load", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| PaletteError::Catalog {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&content)?;
        info!(element_count = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn fits(element: &SelectableElement, context: &InsertionContext) -> bool {
        let kind_ok = match context.parent {
            None => element.kind == DefinitionKind::Source,
            Some(_) => element.kind == DefinitionKind::Step,
        };
        kind_ok && (context.accepts_nested_steps || !element.supports_nested_steps)
    }
}

impl CatalogProvider for StaticCatalog {
    fn list_for(&self, context: &InsertionContext, category: Category) -> Vec<SelectableElement> {
        let listed: Vec<SelectableElement> = self
            .elements
            .iter()
            .filter(|e| e.category == category && Self::fits(e, context))
            .cloned()
            .collect();
        debug!(?category, count = listed.len(), "Listed catalog elements");
        listed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CATALOG: &str = r#"{
        "elements": [
            {"name": "timer", "title": "Timer", "uri": "timer:tick", "category": "component", "kind": "source"},
            {"name": "log", "title": "Log", "uri": "log:info", "category": "component"},
            {"name": "choice", "title": "Choice", "dsl": "ChoiceDefinition", "category": "eip", "supportsNestedSteps": true},
            {"name": "filter", "title": "Filter", "dsl": "FilterDefinition", "category": "eip"}
        ]
    }"#;

    #[test]
    fn root_context_lists_sources_only() {
        let catalog = StaticCatalog::from_json(CATALOG).unwrap();
        let listed = catalog.list_for(&InsertionContext::root(), Category::Connector);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "timer");
    }

    #[test]
    fn child_context_lists_steps_only() {
        let catalog = StaticCatalog::from_json(CATALOG).unwrap();
        let ctx = InsertionContext::child_of("RouteDefinition");
        let names: Vec<_> = catalog
            .list_for(&ctx, Category::Connector)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["log"]);
    }

    #[test]
    fn nested_step_owners_hidden_when_not_accepted() {
        let catalog = StaticCatalog::from_json(CATALOG).unwrap();
        let ctx = InsertionContext::child_of("RouteDefinition").with_nested_steps(false);
        let names: Vec<_> = catalog
            .list_for(&ctx, Category::MessageFlow)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["filter"]);
    }

    #[test]
    fn unknown_category_is_empty() {
        let catalog = StaticCatalog::from_json(CATALOG).unwrap();
        let ctx = InsertionContext::child_of("RouteDefinition");
        assert!(catalog.list_for(&ctx, Category::Snippet).is_empty());
    }

    #[test]
    fn missing_elements_key_is_empty_catalog() {
        let catalog = StaticCatalog::from_json("{}").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = StaticCatalog::from_json("not json").unwrap_err();
        assert!(matches!(err, PaletteError::CatalogParse(_)));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();
        let catalog = StaticCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = StaticCatalog::load(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, PaletteError::Catalog { .. }));
    }
}
