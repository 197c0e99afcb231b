//! Directory and path operations used when staging module files.

use crate::core::ModuleError;
use anyhow::Result;
use std::fs;
use std::path::Path;

fn io_error(operation: &str, path: &Path, error: &std::io::Error) -> ModuleError {
    ModuleError::IoError {
        operation: operation.to_string(),
        path: path.display().to_string(),
        reason: error.to_string(),
    }
}

/// Ensures a directory exists, creating it and all parents if necessary.
///
/// Fails when `path` exists but is not a directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| io_error("create directory", path, &e))?;
    } else if !path.is_dir() {
        return Err(ModuleError::IoError {
            operation: "create directory".to_string(),
            path: path.display().to_string(),
            reason: "path exists but is not a directory".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Copies a directory recursively. Symlinks and special files are skipped.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    ensure_dir(dst)?;

    for entry in fs::read_dir(src).map_err(|e| io_error("read directory", src, &e))? {
        let entry = entry.map_err(|e| io_error("read directory", src, &e))?;
        let file_type = entry.file_type().map_err(|e| io_error("inspect", &entry.path(), &e))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if file_type.is_dir() {
            copy_dir(&src_path, &dst_path)?;
        } else if file_type.is_file() {
            fs::copy(&src_path, &dst_path).map_err(|e| io_error("copy", &src_path, &e))?;
        }
    }

    Ok(())
}

/// Copies a file or a directory tree to `dst`.
pub fn copy_path(src: &Path, dst: &Path) -> Result<()> {
    let metadata = fs::metadata(src).map_err(|e| io_error("copy", src, &e))?;
    if metadata.is_dir() {
        copy_dir(src, dst)
    } else {
        if let Some(parent) = dst.parent() {
            ensure_dir(parent)?;
        }
        fs::copy(src, dst).map_err(|e| io_error("copy", src, &e))?;
        Ok(())
    }
}

/// Removes a file or a directory tree. A missing path is not an error.
pub fn remove_path(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(io_error("remove", path, &e).into()),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(io_error("remove", path, &e).into()),
    }
}
