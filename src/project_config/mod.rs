//! The host build configuration (`_config/project.json`).
//!
//! Modules register their source and destination paths under `paths.src` and
//! `paths.dest`. Before a module's transform runs, [`ProjectConfig::ensure_shape`]
//! guarantees both mappings exist without dropping anything already there.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::core::ModuleError;
use crate::utils::{read_json_file, write_json_file};

const PATHS_KEY: &str = "paths";
const SRC_KEY: &str = "src";
const DEST_KEY: &str = "dest";

/// `_config/project.json` as an ordered JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectConfig(pub Map<String, Value>);

impl ProjectConfig {
    /// Read and parse the document.
    pub async fn load(path: &Path) -> Result<Self> {
        read_json_file(path).await
    }

    /// Write the document as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json_file(path, self)
    }

    /// Make sure `paths`, `paths.src` and `paths.dest` exist as objects.
    ///
    /// Each key is defaulted independently; sibling keys are kept. A key that
    /// exists with a non-object value is an [`ModuleError::InvalidConfigShape`]
    /// rather than being overwritten.
    pub fn ensure_shape(mut self, file: &str) -> Result<Self> {
        let paths = self
            .0
            .entry(PATHS_KEY)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| shape_error(file, PATHS_KEY))?;

        for key in [SRC_KEY, DEST_KEY] {
            let value = paths.entry(key).or_insert_with(|| Value::Object(Map::new()));
            if !value.is_object() {
                return Err(shape_error(file, &format!("{PATHS_KEY}.{key}")).into());
            }
        }

        Ok(self)
    }

    /// `paths.src`, once the shape is ensured.
    pub fn src_paths_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.paths_entry_mut(SRC_KEY)
    }

    /// `paths.dest`, once the shape is ensured.
    pub fn dest_paths_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.paths_entry_mut(DEST_KEY)
    }

    fn paths_entry_mut(&mut self, key: &str) -> Option<&mut Map<String, Value>> {
        self.0.get_mut(PATHS_KEY)?.as_object_mut()?.get_mut(key)?.as_object_mut()
    }
}

fn shape_error(file: &str, key: &str) -> ModuleError {
    ModuleError::InvalidConfigShape {
        file: file.to_string(),
        key: key.to_string(),
    }
}

/// Run a caller transform; its return value is what gets persisted.
pub fn apply<F>(config: ProjectConfig, transform: F) -> ProjectConfig
where
    F: FnOnce(ProjectConfig) -> ProjectConfig,
{
    transform(config)
}

/// `load -> ensure_shape -> transform -> save` on the document at `path`.
pub async fn update_project_config<F>(path: &Path, transform: F) -> Result<ProjectConfig>
where
    F: FnOnce(ProjectConfig) -> ProjectConfig,
{
    let config = ProjectConfig::load(path).await?;
    let config = config.ensure_shape(&path.display().to_string())?;
    let config = apply(config, transform);
    config.save(path)?;
    tracing::debug!("updated {}", path.display());
    Ok(config)
}
