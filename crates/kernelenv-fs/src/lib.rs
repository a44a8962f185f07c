//! Guarded file operations for kernel descriptors.
//!
//! Every helper here touches at most one file or one directory. None of them
//! lock: the caller is assumed to be a single interactive user.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Returns `false` if something already exists at `path`. Otherwise makes sure
/// the parent directory exists (intermediates included) and returns `true`.
///
/// Check-then-act: two concurrent callers can both see `true`.
pub fn confirm_path_is_safe_to_write(path: &Path) -> io::Result<bool> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "write target already exists");
        return Ok(false);
    }
    if let Some(dir) = path.parent() {
        if !dir.is_dir() {
            fs::create_dir_all(dir)?;
            tracing::debug!(dir = %dir.display(), "created parent directory");
        }
    }
    Ok(true)
}

/// Write `contents` to a file that must not exist yet.
///
/// Returns `Ok(false)` instead of overwriting when the file shows up between
/// the guard and the write.
pub fn write_new(path: &Path, contents: &[u8]) -> io::Result<bool> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e),
    };
    file.write_all(contents)?;
    file.sync_all()?;
    Ok(true)
}

/// Read a file to a string, mapping "not found" to `None`.
pub fn read_if_exists(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Recursively remove the directory holding `file`, not just the file.
///
/// Returns the removed directory, or `None` when `file` has no parent.
pub fn remove_containing_dir(file: &Path) -> io::Result<Option<PathBuf>> {
    let Some(dir) = file.parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(None);
    };
    fs::remove_dir_all(dir)?;
    tracing::debug!(dir = %dir.display(), "removed directory");
    Ok(Some(dir.to_path_buf()))
}
