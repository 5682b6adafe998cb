//! Step Palette - categorized, filterable palette of route building blocks
//!
//! Assembles the elements insertable at a point in a route (message-flow
//! steps, connectors, snippets, interface endpoints), filters and counts them
//! by category toggle and free-text query, and surfaces a short list of
//! pinned elements.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod preferences;
pub mod search;
pub mod selector;
