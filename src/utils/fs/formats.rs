//! Reading and writing the text and JSON documents of a host project.
//!
//! Reads are async so a lifecycle script suspends on disk I/O; writes go through
//! [`super::atomic::safe_write`]. Missing files surface as
//! [`ModuleError::FileNotFound`] and malformed JSON as [`ModuleError::JsonParseError`],
//! which is what the guard and error reporting rely on.

use crate::core::ModuleError;
use anyhow::Result;
use std::path::Path;

/// Reads a UTF-8 text file.
pub async fn read_text_file(path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ModuleError::FileNotFound {
            path: path.display().to_string(),
        }
        .into()),
        Err(e) => Err(ModuleError::IoError {
            operation: "read".to_string(),
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()),
    }
}

/// Reads and parses a JSON file.
pub async fn read_json_file<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = read_text_file(path).await?;
    serde_json::from_str(&content).map_err(|e| {
        ModuleError::JsonParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Writes a text file atomically.
pub fn write_text_file(path: &Path, content: &str) -> Result<()> {
    super::atomic::safe_write(path, content)
}

/// Serializes `data` as pretty JSON (two-space indent, trailing newline) and
/// writes it atomically.
pub fn write_json_file<T>(path: &Path, data: &T) -> Result<()>
where
    T: serde::Serialize,
{
    let mut json = serde_json::to_string_pretty(data).map_err(|e| ModuleError::WriteError {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    json.push('\n');

    write_text_file(path, &json)
}
