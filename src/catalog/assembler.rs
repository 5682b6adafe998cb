//! Catalog assembly for one insertion
//!
//! Pulls every category from the provider, applies the blocklists and the
//! specialized-connector split, and concatenates the result in display order:
//! message-flow, connector, snippet, specialized connector, interface source,
//! interface target.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::engine::pin_identity;
use crate::error::Result;

use super::provider::{Blocklist, CatalogProvider};
use super::types::{Category, InsertionContext, SelectableElement};

/// Build the working set of selectable elements for `context`.
///
/// `specialized_prefix` is the title marker that moves a connector into the
/// specialized bucket; it is compared case-insensitively. Fails if an
/// element lacks the identity it would be pinned under.
#[instrument(level = "debug", skip_all, fields(parent = ?context.parent))]
pub fn assemble(
    provider: &dyn CatalogProvider,
    context: &InsertionContext,
    blocked: &Blocklist,
    specialized_prefix: &str,
) -> Result<Vec<Arc<SelectableElement>>> {
    let prefix = specialized_prefix.to_lowercase();

    // Message-flow steps never start a route
    let message_flow = if context.is_root() {
        Vec::new()
    } else {
        provider.list_for(context, Category::MessageFlow)
    };

    let mut connectors = Vec::new();
    for element in provider.list_for(context, Category::Connector) {
        if blocked.connectors.contains(element.identity()?) || element.has_title_prefix(&prefix) {
            continue;
        }
        connectors.push(element);
    }

    let mut snippets = Vec::new();
    for element in provider.list_for(context, Category::Snippet) {
        if !blocked.snippets.contains(element.name_identity()?) {
            snippets.push(element);
        }
    }

    // The specialized bucket ignores the connector blocklist
    let specialized: Vec<SelectableElement> = provider
        .list_for(context, Category::Connector)
        .into_iter()
        .filter(|e| e.has_title_prefix(&prefix))
        .collect();

    let sources = provider.list_for(context, Category::InterfaceSource);
    let targets = provider.list_for(context, Category::InterfaceTarget);

    debug!(
        message_flow = message_flow.len(),
        connectors = connectors.len(),
        snippets = snippets.len(),
        specialized = specialized.len(),
        sources = sources.len(),
        targets = targets.len(),
        "Assembled catalog"
    );

    message_flow
        .into_iter()
        .chain(connectors)
        .chain(snippets)
        .chain(specialized)
        .chain(sources)
        .chain(targets)
        .map(|element| {
            check_identity(&element, &prefix)?;
            Ok(Arc::new(element))
        })
        .collect()
}

/// Every key the fast list or a pin may look the element up by must exist.
/// Message-flow steps are looked up by definition name or plain name
/// depending on the message-flow toggle, so they need both.
fn check_identity(element: &SelectableElement, prefix: &str) -> Result<()> {
    pin_identity(element, prefix)?;
    if element.category == Category::MessageFlow {
        element.name_identity()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::provider::StaticCatalog;
    use crate::catalog::types::DefinitionKind;
    use crate::error::PaletteError;

    fn el(name: &str, title: &str, category: Category) -> SelectableElement {
        SelectableElement {
            name: name.to_string(),
            title: title.to_string(),
            dsl: format!("{}Definition", title),
            category,
            ..Default::default()
        }
    }

    fn source(mut e: SelectableElement) -> SelectableElement {
        e.kind = DefinitionKind::Source;
        e
    }

    fn names(elements: &[Arc<SelectableElement>]) -> Vec<&str> {
        elements.iter().map(|e| e.name.as_str()).collect()
    }

    fn mixed_catalog() -> StaticCatalog {
        StaticCatalog::new(vec![
            el("target-a", "Target A", Category::InterfaceTarget),
            el("zs-http", "zsegmentHttp", Category::Connector),
            el("kafka-sink", "Kafka Sink", Category::Snippet),
            el("timer", "Timer", Category::Connector),
            el("source-a", "Source A", Category::InterfaceSource),
            el("filter", "Filter", Category::MessageFlow),
        ])
    }

    #[test]
    fn concatenates_in_display_order() {
        let ctx = InsertionContext::child_of("RouteDefinition");
        let out = assemble(&mixed_catalog(), &ctx, &Blocklist::default(), "zsegment").unwrap();
        assert_eq!(
            names(&out),
            vec!["filter", "timer", "kafka-sink", "zs-http", "source-a", "target-a"]
        );
    }

    #[test]
    fn root_context_excludes_message_flow() {
        let catalog = StaticCatalog::new(vec![
            source(el("filter", "Filter", Category::MessageFlow)),
            source(el("timer", "Timer", Category::Connector)),
        ]);
        let out = assemble(&catalog, &InsertionContext::root(), &Blocklist::default(), "zsegment")
            .unwrap();
        assert_eq!(names(&out), vec!["timer"]);
    }

    #[test]
    fn blocked_connectors_and_snippets_are_dropped() {
        let mut timer = el("timer", "Timer", Category::Connector);
        timer.uri = Some("timer:tick".to_string());
        let catalog = StaticCatalog::new(vec![
            timer,
            el("log", "Log", Category::Connector),
            el("kafka-sink", "Kafka Sink", Category::Snippet),
            el("http-sink", "Http Sink", Category::Snippet),
        ]);
        let blocked = Blocklist::new(["timer:tick"], ["kafka-sink"]);
        let ctx = InsertionContext::child_of("RouteDefinition");
        let out = assemble(&catalog, &ctx, &blocked, "zsegment").unwrap();
        assert_eq!(names(&out), vec!["log", "http-sink"]);
    }

    #[test]
    fn blocking_by_name_only_applies_without_uri() {
        let mut timer = el("timer", "Timer", Category::Connector);
        timer.uri = Some("timer:tick".to_string());
        let catalog = StaticCatalog::new(vec![timer]);
        let blocked = Blocklist::new(["timer"], Vec::<String>::new());
        let ctx = InsertionContext::child_of("RouteDefinition");
        let out = assemble(&catalog, &ctx, &blocked, "zsegment").unwrap();
        assert_eq!(names(&out), vec!["timer"]);
    }

    #[test]
    fn specialized_prefix_is_case_insensitive() {
        let catalog = StaticCatalog::new(vec![
            el("a", "ZSEGMENT Atlas", Category::Connector),
            el("b", "Zsegment Transformer", Category::Connector),
            el("c", "Http", Category::Connector),
        ]);
        let ctx = InsertionContext::child_of("RouteDefinition");
        let out = assemble(&catalog, &ctx, &Blocklist::default(), "ZSegment").unwrap();
        assert_eq!(names(&out), vec!["c", "a", "b"]);
    }

    #[test]
    fn connector_without_identity_fails() {
        let catalog = StaticCatalog::new(vec![el("", "Nameless", Category::Connector)]);
        let ctx = InsertionContext::child_of("RouteDefinition");
        let err = assemble(&catalog, &ctx, &Blocklist::default(), "zsegment").unwrap_err();
        assert!(matches!(err, PaletteError::MissingIdentity { .. }));
    }

    #[test]
    fn message_flow_without_definition_name_fails() {
        let mut filter = el("filter", "Filter", Category::MessageFlow);
        filter.dsl.clear();
        let catalog = StaticCatalog::new(vec![
            filter,
            el("kafka-sink", "Kafka Sink", Category::Snippet),
        ]);
        let ctx = InsertionContext::child_of("RouteDefinition");
        let err = assemble(&catalog, &ctx, &Blocklist::default(), "zsegment").unwrap_err();
        assert!(matches!(
            err,
            PaletteError::MissingIdentity {
                category: Category::MessageFlow,
                ..
            }
        ));
    }

    #[test]
    fn message_flow_without_name_fails() {
        let mut filter = el("", "Filter", Category::MessageFlow);
        filter.dsl = "FilterDefinition".to_string();
        let catalog = StaticCatalog::new(vec![filter]);
        let ctx = InsertionContext::child_of("RouteDefinition");
        assert!(assemble(&catalog, &ctx, &Blocklist::default(), "zsegment").is_err());
    }

    #[test]
    fn nameless_interface_and_specialized_elements_fail() {
        let ctx = InsertionContext::child_of("RouteDefinition");
        for element in [
            el("", "Orders Out", Category::InterfaceTarget),
            el("", "zsegmentHttp", Category::Connector),
        ] {
            let catalog = StaticCatalog::new(vec![element]);
            assert!(assemble(&catalog, &ctx, &Blocklist::default(), "zsegment").is_err());
        }
    }

    #[test]
    fn empty_provider_yields_empty_set() {
        let ctx = InsertionContext::child_of("RouteDefinition");
        let out = assemble(&StaticCatalog::default(), &ctx, &Blocklist::default(), "zsegment")
            .unwrap();
        assert!(out.is_empty());
    }
}
