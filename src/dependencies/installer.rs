//! Hands dependency names to the package manager.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::constants::INSTALLER_COMMAND;
use crate::core::ModuleError;

/// Runs `<program> install <names...>` in the host project.
#[derive(Debug, Clone)]
pub struct DependencyInstaller {
    program: String,
}

impl Default for DependencyInstaller {
    fn default() -> Self {
        Self::new(INSTALLER_COMMAND)
    }
}

impl DependencyInstaller {
    /// Installer invoking `program` (looked up on `PATH` unless it is a path).
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn resolve(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|e| {
            ModuleError::ExternalToolError {
                tool: self.program.clone(),
                reason: format!("not found on PATH ({e})"),
            }
            .into()
        })
    }

    /// Install `names` into `project_dir`. An empty list runs nothing.
    pub async fn install(&self, project_dir: &Path, names: &[String]) -> Result<()> {
        if names.is_empty() {
            tracing::debug!("no dependencies to install");
            return Ok(());
        }

        let program = self.resolve()?;
        tracing::debug!("running {} install {} in {}", program.display(), names.join(" "), project_dir.display());

        let status = Command::new(&program)
            .arg("install")
            .args(names)
            .current_dir(project_dir)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| ModuleError::ExternalToolError {
                tool: self.program.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(ModuleError::ExternalToolError {
                tool: self.program.clone(),
                reason: status.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
