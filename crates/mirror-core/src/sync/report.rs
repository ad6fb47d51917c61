use mirror_fs::NormalizedPath;
use serde::Serialize;

/// Outcome of one sync pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncReport {
    /// Cursor the state was (or, on a dry run, would have been) advanced to
    pub next_cursor: String,
    /// Entry files written, in delta order
    pub written: Vec<NormalizedPath>,
    /// Entry files removed, by deletion or by a changed file name
    pub deleted: Vec<NormalizedPath>,
    /// Deleted entry ids that had no recorded file
    pub skipped_deletions: Vec<String>,
    pub assets_cached: usize,
    pub assets_forgotten: usize,
    pub dry_run: bool,
}

impl SyncReport {
    pub fn new(next_cursor: impl Into<String>) -> Self {
        Self {
            next_cursor: next_cursor.into(),
            ..Self::default()
        }
    }

    /// Whether the pass changed nothing on disk.
    pub fn is_empty(&self) -> bool {
        self.written.is_empty() && self.deleted.is_empty()
    }
}
