//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;
use tracing::debug;

use crate::{Error, NormalizedPath, PathKind, Result};

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never observe a partial file.
/// An advisory lock is held on the temp file while it is written.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file lives in the same directory so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    let written = write_locked(&mut temp_file, content, &native_path, &temp_path)
        .and_then(|()| fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e)));

    if written.is_err() {
        drop(temp_file);
        if let Err(e) = fs::remove_file(&temp_path) {
            debug!(path = %temp_path.display(), error = %e, "could not remove temp file");
        }
    }

    written
}

fn write_locked(
    file: &mut fs::File,
    content: &[u8],
    native_path: &Path,
    temp_path: &Path,
) -> Result<()> {
    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.to_path_buf(),
    })?;

    file.write_all(content).map_err(|e| Error::io(temp_path, e))?;
    file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    FileExt::unlock(file).map_err(|_| Error::LockFailed {
        path: native_path.to_path_buf(),
    })
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Make sure `path` is a directory, creating it (and its parents) if absent.
///
/// Fails with [`Error::NotADirectory`] when something other than a
/// directory already occupies the path.
pub fn ensure_dir(path: &NormalizedPath) -> Result<()> {
    match path.kind()? {
        PathKind::Directory => Ok(()),
        PathKind::File => Err(Error::NotADirectory {
            path: path.to_native(),
        }),
        PathKind::Absent => {
            debug!(path = %path, "creating directory");
            let native = path.to_native();
            fs::create_dir_all(&native).map_err(|e| Error::io(native, e))
        }
    }
}

/// Remove a file, treating an already-absent path as success.
///
/// Returns `true` if a file was removed.
pub fn remove_file(path: &NormalizedPath) -> Result<bool> {
    match path.kind()? {
        PathKind::Absent => Ok(false),
        PathKind::Directory => Err(Error::io(
            path.to_native(),
            std::io::Error::other("refusing to remove a directory"),
        )),
        PathKind::File => {
            let native = path.to_native();
            fs::remove_file(&native).map_err(|e| Error::io(native, e))?;
            Ok(true)
        }
    }
}
