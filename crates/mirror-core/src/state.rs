//! Persisted sync state
//!
//! The state is the durable record of a mirror: the continuation cursor,
//! where each entry was written, and the last raw snapshot of every entry
//! and asset observed. It is mutated in memory during a pass and written
//! back as a whole only after the pass succeeds.
//!
//! Only one process may run a pass against a given state file at a time;
//! nothing here enforces that.

use std::collections::{BTreeMap, BTreeSet};

use mirror_fs::{NormalizedPath, PathKind, io};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Asset, Entry};
use crate::{Error, Result};

/// In-memory sync state.
///
/// Serialized as a JSON document with the keys `cursor`, `entryFiles`,
/// `entries` and `assets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StateDocument")]
pub struct SyncState {
    /// `None` means the next pass starts from scratch
    #[serde(default)]
    cursor: Option<String>,
    /// Entry id -> file path relative to the data directory
    #[serde(default, rename = "entryFiles")]
    entry_files: BTreeMap<String, NormalizedPath>,
    #[serde(default, rename = "entries")]
    entry_cache: BTreeMap<String, Entry>,
    #[serde(default, rename = "assets")]
    asset_cache: BTreeMap<String, Asset>,
    /// File path -> ids recorded there; the inverse of `entry_files`
    #[serde(skip)]
    path_owners: BTreeMap<NormalizedPath, BTreeSet<String>>,
}

/// On-disk shape of [`SyncState`]; the path index is rebuilt on load.
#[derive(Deserialize)]
struct StateDocument {
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default, rename = "entryFiles")]
    entry_files: BTreeMap<String, NormalizedPath>,
    #[serde(default)]
    entries: BTreeMap<String, Entry>,
    #[serde(default)]
    assets: BTreeMap<String, Asset>,
}

impl From<StateDocument> for SyncState {
    fn from(document: StateDocument) -> Self {
        let mut path_owners: BTreeMap<NormalizedPath, BTreeSet<String>> = BTreeMap::new();
        for (id, path) in &document.entry_files {
            path_owners.entry(path.clone()).or_default().insert(id.clone());
        }

        Self {
            cursor: document.cursor,
            entry_files: document.entry_files,
            entry_cache: document.entries,
            asset_cache: document.assets,
            path_owners,
        }
    }
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn entry_path(&self, id: &str) -> Option<&NormalizedPath> {
        self.entry_files.get(id)
    }

    pub fn cached_entry(&self, id: &str) -> Option<&Entry> {
        self.entry_cache.get(id)
    }

    pub fn cached_asset(&self, id: &str) -> Option<&Asset> {
        self.asset_cache.get(id)
    }

    pub fn entry_files(&self) -> &BTreeMap<String, NormalizedPath> {
        &self.entry_files
    }

    pub fn entry_cache(&self) -> &BTreeMap<String, Entry> {
        &self.entry_cache
    }

    pub fn asset_cache(&self) -> &BTreeMap<String, Asset> {
        &self.asset_cache
    }

    /// Whether any entry other than `except_id` is recorded at `path`.
    pub fn path_in_use(&self, path: &NormalizedPath, except_id: &str) -> bool {
        self.path_owners
            .get(path)
            .is_some_and(|ids| ids.iter().any(|id| id != except_id))
    }

    /// Record that `entry` was written to `path`.
    ///
    /// Returns the path previously recorded for the entry, if any.
    pub fn record_entry(&mut self, entry: Entry, path: NormalizedPath) -> Option<NormalizedPath> {
        let id = entry.id().to_string();
        self.entry_cache.insert(id.clone(), entry);
        self.path_owners
            .entry(path.clone())
            .or_default()
            .insert(id.clone());

        let previous = self.entry_files.insert(id.clone(), path.clone());
        if let Some(previous) = &previous
            && *previous != path
        {
            self.release_path(previous, &id);
        }
        previous
    }

    /// Drop an entry from both the path map and the cache.
    ///
    /// Returns the path that was recorded for it, if any.
    pub fn forget_entry(&mut self, id: &str) -> Option<NormalizedPath> {
        self.entry_cache.remove(id);
        let path = self.entry_files.remove(id)?;
        self.release_path(&path, id);
        Some(path)
    }

    fn release_path(&mut self, path: &NormalizedPath, id: &str) {
        if let Some(ids) = self.path_owners.get_mut(path) {
            ids.remove(id);
            if ids.is_empty() {
                self.path_owners.remove(path);
            }
        }
    }

    pub fn record_asset(&mut self, asset: Asset) {
        self.asset_cache.insert(asset.id().to_string(), asset);
    }

    /// Returns `true` if the asset was cached.
    pub fn forget_asset(&mut self, id: &str) -> bool {
        self.asset_cache.remove(id).is_some()
    }

    pub fn advance_cursor(&mut self, cursor: impl Into<String>) {
        self.cursor = Some(cursor.into());
    }
}

/// Loads and saves a [`SyncState`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SyncStateStore {
    path: NormalizedPath,
}

impl SyncStateStore {
    pub fn new(path: NormalizedPath) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Load the state, or an empty one if nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<SyncState> {
        if self.path.kind()? == PathKind::Absent {
            debug!(path = %self.path, "no sync state yet, starting empty");
            return Ok(SyncState::new());
        }

        let content = io::read_text(&self.path)?;
        serde_json::from_str(&content).map_err(|e| Error::StateCorrupt {
            path: self.path.to_native(),
            message: e.to_string(),
        })
    }

    /// Replace the persisted state as a whole.
    ///
    /// Uses write-to-temp-then-rename so a crash never leaves a partial file.
    pub fn save(&self, state: &SyncState) -> Result<()> {
        let content = serde_json::to_string_pretty(state)?;
        io::write_text(&self.path, &content)?;
        debug!(path = %self.path, cursor = ?state.cursor(), "sync state saved");
        Ok(())
    }
}
