//! Configuration module - palette settings
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - PaletteConfig
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{DEFAULT_CONFIG_PATH, DEFAULT_FAST_LIST_LIMIT, DEFAULT_SPECIALIZED_PREFIX};
pub use loader::{load_config, load_config_from};
pub use types::PaletteConfig;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
