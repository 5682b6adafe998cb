//! Pinned ("preferred") palette elements
//!
//! The store keeps one set of identities per `CategoryToken`. Membership is
//! all the engine reads; the fast list orders by catalog position, not by
//! when something was pinned.
//!
//! `JsonPreferenceStore` persists to `~/.step-palette/preferences.json` with
//! write-through atomic saves. `InMemoryPreferenceStore` backs tests and
//! embedders that persist elsewhere.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::catalog::InsertionContext;
use crate::engine::CategoryToken;
use crate::error::{PaletteError, Result};

/// Read/add/remove access to pinned identities
pub trait PreferenceStore {
    fn list_preferred(&self, token: CategoryToken) -> Result<BTreeSet<String>>;
    fn add_preferred(&mut self, token: CategoryToken, identity: &str) -> Result<()>;
    /// Returns whether something was removed
    fn remove_preferred(&mut self, token: CategoryToken, identity: &str) -> Result<bool>;
}

/// Union of every partition the fast list may draw from in `context`.
///
/// Message-flow pins are only read when inserting inside a route.
pub fn load_preferred_identities(
    store: &dyn PreferenceStore,
    context: &InsertionContext,
) -> Result<HashSet<String>> {
    let mut tokens = vec![
        CategoryToken::Snippet,
        CategoryToken::Connector,
        CategoryToken::SpecializedConnector,
        CategoryToken::InterfaceSource,
        CategoryToken::InterfaceTarget,
    ];
    if !context.is_root() {
        tokens.push(CategoryToken::MessageFlow);
    }

    let mut preferred = HashSet::new();
    for token in tokens {
        preferred.extend(store.list_preferred(token)?);
    }
    debug!(count = preferred.len(), "Loaded preferred identities");
    Ok(preferred)
}

/// Volatile store
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    entries: HashMap<CategoryToken, BTreeSet<String>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn list_preferred(&self, token: CategoryToken) -> Result<BTreeSet<String>> {
        Ok(self.entries.get(&token).cloned().unwrap_or_default())
    }

    fn add_preferred(&mut self, token: CategoryToken, identity: &str) -> Result<()> {
        self.entries
            .entry(token)
            .or_default()
            .insert(identity.to_string());
        Ok(())
    }

    fn remove_preferred(&mut self, token: CategoryToken, identity: &str) -> Result<bool> {
        Ok(self
            .entries
            .get_mut(&token)
            .is_some_and(|set| set.remove(identity)))
    }
}

/// One pinned element on disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecord {
    pub identity: String,
    pub pinned_at: DateTime<Utc>,
}

/// Raw data format for JSON serialization
#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceData {
    #[serde(default)]
    preferences: BTreeMap<CategoryToken, Vec<PreferenceRecord>>,
}

/// File-backed store; every write is saved before returning
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    entries: BTreeMap<CategoryToken, Vec<PreferenceRecord>>,
    file_path: PathBuf,
}

impl JsonPreferenceStore {
    /// Open the store at the default path (~/.step-palette/preferences.json)
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path())
    }

    /// Open the store at `path`, loading whatever is there
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut store = JsonPreferenceStore {
            entries: BTreeMap::new(),
            file_path: path.into(),
        };
        store.load()?;
        Ok(store)
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde("~/.step-palette/preferences.json").as_ref())
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Records of one partition, in pin order
    pub fn records(&self, token: CategoryToken) -> &[PreferenceRecord] {
        self.entries.get(&token).map(Vec::as_slice).unwrap_or(&[])
    }

    fn io_error(&self, source: std::io::Error) -> PaletteError {
        PaletteError::PreferenceIo {
            path: self.file_path.clone(),
            source,
        }
    }

    /// Creates an empty store if the file doesn't exist.
    #[instrument(name = "preferences_load", skip(self), fields(path = %self.file_path.display()))]
    fn load(&mut self) -> Result<()> {
        if !self.file_path.exists() {
            info!("Preference file not found, starting fresh");
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.file_path).map_err(|e| self.io_error(e))?;
        let data: PreferenceData =
            serde_json::from_str(&content).map_err(PaletteError::PreferenceParse)?;
        self.entries = data.preferences;

        info!(
            partitions = self.entries.len(),
            records = self.entries.values().map(Vec::len).sum::<usize>(),
            "Loaded preferences"
        );
        Ok(())
    }

    /// Atomic write: temp file, then rename
    #[instrument(name = "preferences_save", skip(self), fields(path = %self.file_path.display()))]
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(&PreferenceData {
            preferences: self.entries.clone(),
        })
        .map_err(PaletteError::PreferenceParse)?;

        let temp_path = self.file_path.with_extension("json.tmp");
        std::fs::write(&temp_path, &json).map_err(|e| self.io_error(e))?;
        std::fs::rename(&temp_path, &self.file_path).map_err(|e| self.io_error(e))?;

        debug!(bytes = json.len(), "Saved preferences");
        Ok(())
    }

    /// Apply `change`, persist, and roll back if persisting fails.
    fn write_through(&mut self, change: impl FnOnce(&mut Self) -> bool) -> Result<bool> {
        let snapshot = self.entries.clone();
        if !change(self) {
            return Ok(false);
        }
        if let Err(e) = self.save() {
            self.entries = snapshot;
            return Err(e);
        }
        Ok(true)
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn list_preferred(&self, token: CategoryToken) -> Result<BTreeSet<String>> {
        Ok(self
            .records(token)
            .iter()
            .map(|r| r.identity.clone())
            .collect())
    }

    #[instrument(name = "preferences_add", skip(self))]
    fn add_preferred(&mut self, token: CategoryToken, identity: &str) -> Result<()> {
        self.write_through(|store| {
            let records = store.entries.entry(token).or_default();
            if records.iter().any(|r| r.identity == identity) {
                return false;
            }
            records.push(PreferenceRecord {
                identity: identity.to_string(),
                pinned_at: Utc::now(),
            });
            true
        })?;
        Ok(())
    }

    #[instrument(name = "preferences_remove", skip(self))]
    fn remove_preferred(&mut self, token: CategoryToken, identity: &str) -> Result<bool> {
        self.write_through(|store| {
            let Some(records) = store.entries.get_mut(&token) else {
                return false;
            };
            let before = records.len();
            records.retain(|r| r.identity != identity);
            let removed = records.len() != before;
            if records.is_empty() {
                store.entries.remove(&token);
            }
            removed
        })
    }
}
