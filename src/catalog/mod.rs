//! Catalog module - palette elements and where they come from
//!
//! # Module Structure
//!
//! - `types` - Core data types (SelectableElement, Category, InsertionContext)
//! - `provider` - Catalog provider trait, blocklists, JSON-backed catalog
//! - `assembler` - Builds the ordered working set for one insertion

mod assembler;
mod provider;
mod types;

pub use assembler::assemble;
pub use provider::{Blocklist, CatalogProvider, StaticCatalog};
pub use types::{
    Category, DefinitionKind, InsertionContext, SelectableElement, ROUTE_CONFIGURATION_DEFINITION,
};
