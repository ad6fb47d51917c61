//! File-write collaborator
//!
//! The engine hands every filesystem mutation to an [`EntryWriter`], with
//! paths relative to the data directory. [`FrontMatterWriter`] performs
//! them; [`DryRunWriter`] only records what would happen.

use std::sync::Mutex;

use mirror_content::FrontMatterDocument;
use mirror_fs::{NormalizedPath, io};
use tracing::debug;

use crate::Result;
use crate::resolve::Record;

/// Filesystem operations needed by a sync pass.
pub trait EntryWriter: Send + Sync {
    /// Make sure `path` is a directory; fail if a file occupies it.
    fn ensure_directory(&self, path: &NormalizedPath) -> Result<()>;

    /// Serialize `metadata` and `body` into one file, replacing it whole.
    fn write_record(&self, path: &NormalizedPath, metadata: &Record, body: &str) -> Result<()>;

    /// Remove a file. An absent path is not an error.
    ///
    /// Returns `true` if a file was removed.
    fn delete_file(&self, path: &NormalizedPath) -> Result<bool>;
}

/// Writes entries as YAML front matter + body files below a root directory.
#[derive(Debug, Clone)]
pub struct FrontMatterWriter {
    root: NormalizedPath,
}

impl FrontMatterWriter {
    pub fn new(root: NormalizedPath) -> Self {
        Self { root }
    }

    fn resolve(&self, path: &NormalizedPath) -> NormalizedPath {
        self.root.join(path.as_str())
    }
}

impl EntryWriter for FrontMatterWriter {
    fn ensure_directory(&self, path: &NormalizedPath) -> Result<()> {
        io::ensure_dir(&self.resolve(path))?;
        Ok(())
    }

    fn write_record(&self, path: &NormalizedPath, metadata: &Record, body: &str) -> Result<()> {
        let content = FrontMatterDocument::new(metadata.clone(), body).render()?;
        io::write_text(&self.resolve(path), &content)?;
        debug!(path = %path, "wrote entry file");
        Ok(())
    }

    fn delete_file(&self, path: &NormalizedPath) -> Result<bool> {
        let removed = io::remove_file(&self.resolve(path))?;
        debug!(path = %path, removed, "deleted entry file");
        Ok(removed)
    }
}

/// Records the actions a pass would take without touching the filesystem.
#[derive(Debug, Default)]
pub struct DryRunWriter {
    actions: Mutex<Vec<String>>,
}

impl DryRunWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions recorded so far, in the order they were requested.
    pub fn actions(&self) -> Vec<String> {
        self.actions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn push(&self, action: String) {
        self.actions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(action);
    }
}

impl EntryWriter for DryRunWriter {
    fn ensure_directory(&self, path: &NormalizedPath) -> Result<()> {
        self.push(format!("[dry-run] Would ensure directory {path}"));
        Ok(())
    }

    fn write_record(&self, path: &NormalizedPath, _metadata: &Record, _body: &str) -> Result<()> {
        self.push(format!("[dry-run] Would write {path}"));
        Ok(())
    }

    fn delete_file(&self, path: &NormalizedPath) -> Result<bool> {
        self.push(format!("[dry-run] Would delete {path}"));
        Ok(true)
    }
}
