//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::catalog::Blocklist;
use crate::search::MatchMode;

use super::defaults::*;

/// Palette settings, read from `~/.step-palette/config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteConfig {
    /// Maximum number of pinned elements in the fast list (default: 7)
    #[serde(default = "default_fast_list_limit")]
    pub fast_list_limit: usize,
    /// Title prefix that moves a connector into its own bucket (default: "zsegment")
    #[serde(default = "default_specialized_prefix")]
    pub specialized_prefix: String,
    /// "substring" (default) or "fuzzy"
    #[serde(default)]
    pub match_mode: MatchMode,
    /// Where pinned elements are stored (default: ~/.step-palette/preferences.json)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences_path: Option<String>,
    /// Connector URIs (or names) never offered
    #[serde(default)]
    pub blocked_connectors: Vec<String>,
    /// Snippet names never offered
    #[serde(default)]
    pub blocked_snippets: Vec<String>,
}

fn default_fast_list_limit() -> usize {
    DEFAULT_FAST_LIST_LIMIT
}
fn default_specialized_prefix() -> String {
    DEFAULT_SPECIALIZED_PREFIX.to_string()
}

impl Default for PaletteConfig {
    fn default() -> Self {
        PaletteConfig {
            fast_list_limit: DEFAULT_FAST_LIST_LIMIT,
            specialized_prefix: default_specialized_prefix(),
            match_mode: MatchMode::default(),
            preferences_path: None,
            blocked_connectors: Vec::new(),
            blocked_snippets: Vec::new(),
        }
    }
}

impl PaletteConfig {
    /// Snapshot of the configured blocklists
    pub fn blocklist(&self) -> Blocklist {
        Blocklist::new(
            self.blocked_connectors.iter().cloned(),
            self.blocked_snippets.iter().cloned(),
        )
    }

    /// Preference file path with `~` expanded, if configured
    pub fn preferences_path(&self) -> Option<std::path::PathBuf> {
        self.preferences_path
            .as_deref()
            .map(|p| std::path::PathBuf::from(shellexpand::tilde(p).as_ref()))
    }
}
