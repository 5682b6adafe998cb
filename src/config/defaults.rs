//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Maximum number of pinned elements shown above the palette
pub const DEFAULT_FAST_LIST_LIMIT: usize = 7;

/// Title marker of specialized connectors (compared case-insensitively)
pub const DEFAULT_SPECIALIZED_PREFIX: &str = "zsegment";

/// Default config file location
pub const DEFAULT_CONFIG_PATH: &str = "~/.step-palette/config.json";
