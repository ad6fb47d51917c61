//! Normalized path handling and typed existence queries

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Paths recorded in the sync state are stored in this form so the state
/// file reads the same on every platform; conversion to a native path
/// happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedPath {
    inner: String,
}

/// What currently occupies a path on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Absent,
    File,
    Directory,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let joined = if self.inner.is_empty() {
            segment
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner: joined }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// Query what is at this path without following a failed stat into an error.
    ///
    /// Only a missing path maps to [`PathKind::Absent`]; any other stat
    /// failure (permissions, broken mounts) is reported as an error.
    pub fn kind(&self) -> Result<PathKind> {
        let native = self.to_native();
        match std::fs::metadata(&native) {
            Ok(meta) if meta.is_dir() => Ok(PathKind::Directory),
            Ok(_) => Ok(PathKind::File),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PathKind::Absent),
            Err(e) => Err(Error::io(native, e)),
        }
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_onto_empty_root_yields_segment() {
        let root = NormalizedPath::new("");
        assert_eq!(root.join("entries").as_str(), "entries");
    }

    #[test]
    fn join_avoids_double_slash() {
        let root = NormalizedPath::new("data/");
        assert_eq!(root.join("entries").as_str(), "data/entries");
    }

    #[test]
    fn backslashes_are_normalized() {
        let path = NormalizedPath::new("entries\\post\\e1.md");
        assert_eq!(path.as_str(), "entries/post/e1.md");
        assert_eq!(path.file_name(), Some("e1.md"));
        assert_eq!(path.extension(), Some("md"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let path = NormalizedPath::new("entries/post/e1.md");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"entries/post/e1.md\"");
    }

    #[test]
    fn kind_reports_absent_file_and_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = NormalizedPath::new(temp.path());
        let file = dir.join("note.md");

        assert_eq!(file.kind().unwrap(), PathKind::Absent);
        std::fs::write(file.to_native(), "x").unwrap();
        assert_eq!(file.kind().unwrap(), PathKind::File);
        assert_eq!(dir.kind().unwrap(), PathKind::Directory);
    }
}
