//! Atomic file writes using a temp-file-and-rename strategy.
//!
//! Every document this crate saves (`.cartridgerc`, `package.json`,
//! `_config/project.json`, the README) goes through [`atomic_write`], so a reader
//! sees either the old or the new content and never a truncated file.

use crate::core::ModuleError;
use crate::utils::fs::dirs::ensure_dir;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Atomically writes a string to a file.
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically writes bytes to a file.
///
/// The content is written to a temporary file in the same directory, synced to
/// disk, then renamed over `path`. Parent directories are created when missing.
/// Failures surface as [`ModuleError::WriteError`].
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let write_error = |reason: String| ModuleError::WriteError {
        file: path.display().to_string(),
        reason,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| write_error(e.to_string()))?;
    temp.write_all(content).map_err(|e| write_error(e.to_string()))?;
    temp.as_file().sync_all().map_err(|e| write_error(e.to_string()))?;
    temp.persist(path).map_err(|e| write_error(e.error.to_string()))?;

    tracing::trace!(target: "fs::atomic", "wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
