//! The module's own `package.json`.

use anyhow::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

use crate::constants::{DEFAULT_MAIN_ENTRY, PACKAGE_FILE_NAME};
use crate::core::ModuleError;
use crate::utils::read_json_file;

/// Identity of the module running a lifecycle script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackageConfig {
    /// Package name; also the key of its manifest entry
    pub name: String,
    /// Package version
    #[serde(default)]
    pub version: String,
    /// Homepage, recorded as the entry's `site`
    #[serde(default)]
    pub homepage: Option<String>,
    /// Main entry file, recorded in the entry's `task`
    #[serde(default)]
    pub main: Option<String>,
    /// Runtime dependencies the module wants merged into the host project
    #[serde(default)]
    pub dependencies: Map<String, Value>,
}

impl PackageConfig {
    /// Minimal config with only a name and version, mostly for tests and tooling.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            homepage: None,
            main: None,
            dependencies: Map::new(),
        }
    }

    /// Load `package.json` from the module directory.
    pub async fn load(module_dir: &Path) -> Result<Self> {
        let path = module_dir.join(PACKAGE_FILE_NAME);
        let config: Self = match read_json_file(&path).await {
            Ok(config) => config,
            Err(e) => {
                let reason = match crate::core::find_module_error(&e) {
                    Some(ModuleError::JsonParseError { reason, .. }) => Some(reason.clone()),
                    _ => None,
                };
                return Err(match reason {
                    Some(reason) => ModuleError::InvalidPackageConfig {
                        file: path.display().to_string(),
                        reason,
                    }
                    .into(),
                    None => e,
                });
            }
        };

        if config.name.trim().is_empty() {
            return Err(ModuleError::InvalidPackageConfig {
                file: path.display().to_string(),
                reason: "'name' must not be empty".to_string(),
            }
            .into());
        }

        Ok(config)
    }

    /// Main entry, defaulting to `index.js`.
    #[must_use]
    pub fn main_entry(&self) -> &str {
        self.main.as_deref().unwrap_or(DEFAULT_MAIN_ENTRY)
    }

    /// Task path recorded in the manifest: `<name>/<main>`.
    #[must_use]
    pub fn task(&self) -> String {
        format!("{}/{}", self.name, self.main_entry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_package_config() {
        let temp = tempdir().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{
                "name": "cartridge-sass",
                "version": "2.1.0",
                "homepage": "https://example.com/sass",
                "main": "task.js",
                "dependencies": {"gulp-sass": "^3.0.0"},
                "scripts": {"postinstall": "cartridge-module postinstall"}
            }"#,
        )
        .unwrap();

        let config = PackageConfig::load(temp.path()).await.unwrap();
        assert_eq!(config.name, "cartridge-sass");
        assert_eq!(config.homepage.as_deref(), Some("https://example.com/sass"));
        assert_eq!(config.task(), "cartridge-sass/task.js");
        assert_eq!(config.dependencies.len(), 1);
    }

    #[test]
    fn test_task_defaults_main() {
        let config = PackageConfig::new("foo", "1.0.0");
        assert_eq!(config.task(), "foo/index.js");
    }

    #[tokio::test]
    async fn test_load_without_name_is_invalid() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("package.json"), r#"{"version": "1.0.0"}"#).unwrap();

        let error = PackageConfig::load(temp.path()).await.unwrap_err();
        assert!(matches!(
            crate::core::find_module_error(&error),
            Some(ModuleError::InvalidPackageConfig { .. })
        ));
    }
}
