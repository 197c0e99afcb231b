//! Loading and saving `.cartridgerc`.

use anyhow::Result;
use std::path::Path;

use super::Manifest;
use crate::utils::{read_json_file, write_json_file};

impl Manifest {
    /// Read and parse the manifest.
    ///
    /// A missing file is [`crate::core::ModuleError::FileNotFound`]; malformed
    /// JSON is [`crate::core::ModuleError::JsonParseError`].
    pub async fn load(path: &Path) -> Result<Self> {
        let manifest: Self = read_json_file(path).await?;
        tracing::debug!(
            "loaded {} with {} module(s)",
            path.display(),
            manifest.modules().len()
        );
        Ok(manifest)
    }

    /// Write the manifest as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json_file(path, self)?;
        tracing::debug!("saved {} with {} module(s)", path.display(), self.modules().len());
        Ok(())
    }
}
