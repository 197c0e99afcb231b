//! Well-known locations inside a host project.

use anyhow::Result;
use std::path::{Component, Path, PathBuf};

use crate::constants::{
    CARTRIDGE_DIR_NAME, CONFIG_DIR_NAME, MODULES_TEMPLATE_FILE_NAME, NODE_MODULES_DIR_NAME,
    PACKAGE_FILE_NAME, PROJECT_CONFIG_FILE_NAME, RC_FILE_NAME, README_FILE_NAME,
};
use crate::core::ModuleError;

/// Absolute paths of every document a lifecycle script touches.
///
/// Built once per invocation and passed to each component, so tests can point a
/// whole run at a temporary directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// Host project root
    pub project: PathBuf,
    /// `_config` directory
    pub config: PathBuf,
    /// `readme.md`
    pub readme: PathBuf,
    /// `_cartridge` directory
    pub cartridge: PathBuf,
    /// `.cartridgerc`
    pub rc: PathBuf,
    /// `package.json`
    pub package: PathBuf,
    /// `node_modules`
    pub node_modules: PathBuf,
}

impl ProjectPaths {
    /// Resolve every location relative to `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project = project_root.into();
        Self {
            config: project.join(CONFIG_DIR_NAME),
            readme: project.join(README_FILE_NAME),
            cartridge: project.join(CARTRIDGE_DIR_NAME),
            rc: project.join(RC_FILE_NAME),
            package: project.join(PACKAGE_FILE_NAME),
            node_modules: project.join(NODE_MODULES_DIR_NAME),
            project,
        }
    }

    /// Resolve the project from a module installed at `<project>/node_modules/<module>`.
    pub fn from_module_dir(module_dir: &Path) -> Result<Self> {
        let absolute = std::path::absolute(module_dir).map_err(|e| ModuleError::IoError {
            operation: "resolve".to_string(),
            path: module_dir.display().to_string(),
            reason: e.to_string(),
        })?;
        let absolute = normalize(&absolute);

        let project = absolute.parent().and_then(Path::parent).ok_or_else(|| ModuleError::Other {
            message: format!(
                "Module directory {} is not inside a project's node_modules",
                absolute.display()
            ),
        })?;

        tracing::debug!("resolved project root {} from {}", project.display(), absolute.display());
        Ok(Self::new(project))
    }

    /// `_config/project.json`
    #[must_use]
    pub fn project_config(&self) -> PathBuf {
        self.config.join(PROJECT_CONFIG_FILE_NAME)
    }

    /// `_cartridge/modules.tpl`
    #[must_use]
    pub fn modules_template(&self) -> PathBuf {
        self.cartridge.join(MODULES_TEMPLATE_FILE_NAME)
    }

    /// Installed copy of a package under `node_modules`.
    #[must_use]
    pub fn installed_package(&self, name: &str) -> PathBuf {
        self.node_modules.join(name)
    }
}

/// Fold `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(
                    normalized.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                ) {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
