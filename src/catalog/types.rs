//! Catalog element and insertion context definitions
//!
//! This module contains the core data types shared by the assembler, the
//! filter engine and the preference store.

use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, Result};

/// Parent definition name marking a route configuration block
pub const ROUTE_CONFIGURATION_DEFINITION: &str = "RouteConfigurationDefinition";

/// Catalog a selectable element came from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Category {
    /// Routing/processing steps (filter, split, choice, ...)
    #[serde(rename = "eip")]
    MessageFlow,
    /// Endpoint components addressed by URI or name
    #[default]
    #[serde(rename = "component")]
    Connector,
    /// Reusable building blocks
    #[serde(rename = "kamelet")]
    Snippet,
    /// Sources declared by the enclosing interface
    #[serde(rename = "interface-source")]
    InterfaceSource,
    /// Targets declared by the enclosing interface
    #[serde(rename = "interface-target")]
    InterfaceTarget,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::MessageFlow,
        Category::Connector,
        Category::Snippet,
        Category::InterfaceSource,
        Category::InterfaceTarget,
    ];
}

/// How an element is materialized into the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    /// Inserted as the route's `from`
    Source,
    /// Inserted as a step inside an existing route
    #[default]
    Step,
}

/// One entry of the step palette
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectableElement {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Comma separated labels, searchable
    #[serde(default)]
    pub labels: String,
    /// Definition class name (e.g. "FilterDefinition")
    #[serde(default)]
    pub dsl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub kind: DefinitionKind,
    /// User-defined snippet rather than one shipped with the catalog
    #[serde(default)]
    pub custom: bool,
    /// Element owns a nested step list (choice, split, ...)
    #[serde(default)]
    pub supports_nested_steps: bool,
}

impl SelectableElement {
    /// Category-specific identity used for blocklists and preferences.
    ///
    /// Message-flow elements are keyed by definition name, connectors by URI
    /// (falling back to name), everything else by name.
    pub fn identity(&self) -> Result<&str> {
        let identity = match self.category {
            Category::MessageFlow => self.dsl.as_str(),
            Category::Connector => self
                .uri
                .as_deref()
                .filter(|uri| !uri.is_empty())
                .unwrap_or(self.name.as_str()),
            _ => self.name.as_str(),
        };
        if identity.is_empty() {
            return Err(PaletteError::MissingIdentity {
                category: self.category,
                title: self.title.clone(),
            });
        }
        Ok(identity)
    }

    /// Plain name identity, regardless of category
    pub fn name_identity(&self) -> Result<&str> {
        if self.name.is_empty() {
            return Err(PaletteError::MissingIdentity {
                category: self.category,
                title: self.title.clone(),
            });
        }
        Ok(&self.name)
    }

    /// Whether the title carries the specialized-connector marker.
    /// `prefix_lower` must already be lowercase.
    pub fn has_title_prefix(&self, prefix_lower: &str) -> bool {
        self.title.to_lowercase().starts_with(prefix_lower)
    }
}

/// Where the next step is going to be inserted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertionContext {
    /// Parent definition name; `None` when inserting a route source
    pub parent: Option<String>,
    pub accepts_nested_steps: bool,
}

impl InsertionContext {
    pub fn root() -> Self {
        InsertionContext {
            parent: None,
            accepts_nested_steps: true,
        }
    }

    pub fn child_of(parent: impl Into<String>) -> Self {
        InsertionContext {
            parent: Some(parent.into()),
            accepts_nested_steps: true,
        }
    }

    pub fn with_nested_steps(mut self, accepts: bool) -> Self {
        self.accepts_nested_steps = accepts;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_route_configuration(&self) -> bool {
        self.parent.as_deref() == Some(ROUTE_CONFIGURATION_DEFINITION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connector(name: &str, uri: Option<&str>) -> SelectableElement {
        SelectableElement {
            name: name.to_string(),
            title: name.to_string(),
            uri: uri.map(str::to_string),
            category: Category::Connector,
            ..Default::default()
        }
    }

    #[test]
    fn connector_identity_prefers_uri() {
        let el = connector("timer", Some("timer:tick"));
        assert_eq!(el.identity().unwrap(), "timer:tick");
    }

    #[test]
    fn connector_identity_falls_back_to_name() {
        assert_eq!(connector("timer", None).identity().unwrap(), "timer");
        assert_eq!(connector("timer", Some("")).identity().unwrap(), "timer");
    }

    #[test]
    fn connector_without_uri_or_name_fails_fast() {
        let err = connector("", None).identity().unwrap_err();
        assert!(matches!(
            err,
            PaletteError::MissingIdentity {
                category: Category::Connector,
                ..
            }
        ));
    }

    #[test]
    fn message_flow_identity_is_definition_name() {
        let el = SelectableElement {
            name: "filter".to_string(),
            title: "Filter".to_string(),
            dsl: "FilterDefinition".to_string(),
            category: Category::MessageFlow,
            ..Default::default()
        };
        assert_eq!(el.identity().unwrap(), "FilterDefinition");
        assert_eq!(el.name_identity().unwrap(), "filter");
    }

    #[test]
    fn title_prefix_is_case_insensitive() {
        let mut el = connector("zs", None);
        el.title = "ZSegmentHttp".to_string();
        assert!(el.has_title_prefix("zsegment"));
        el.title = "Http zsegment".to_string();
        assert!(!el.has_title_prefix("zsegment"));
    }

    #[test]
    fn element_deserializes_with_defaults() {
        let json = r#"{"name":"log","title":"Log","category":"component"}"#;
        let el: SelectableElement = serde_json::from_str(json).unwrap();
        assert_eq!(el.category, Category::Connector);
        assert_eq!(el.kind, DefinitionKind::Step);
        assert!(el.uri.is_none());
        assert!(!el.custom);
    }

    #[test]
    fn route_configuration_context() {
        assert!(InsertionContext::child_of(ROUTE_CONFIGURATION_DEFINITION).is_route_configuration());
        assert!(!InsertionContext::root().is_route_configuration());
        assert!(InsertionContext::root().is_root());
    }
}
