//! Preconditions checked at the top of every lifecycle script.
//!
//! Two guards exist:
//!
//! - [`ensure_ready`]: the project must have a `.cartridgerc`. Without it the
//!   script fails with [`ModuleError::CartridgeNotInstalled`].
//! - [`bypass_if_development`]: with `NODE_ENV=development` the script stops
//!   early and successfully, so installing a module inside its own development
//!   checkout does not touch any project.
//!
//! Neither guard ends the process. They return `Result` / [`Flow`] and the
//! binary decides the exit code.

use anyhow::Result;
use std::path::Path;

use crate::config::ProjectPaths;
use crate::constants::{DEVELOPMENT_ENV, NODE_ENV_VAR};
use crate::core::{Flow, ModuleError};
use crate::reporter::Reporter;

/// Lifecycle readiness of a host project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectState {
    /// No `.cartridgerc` at the project root.
    Uninitialized,
    /// `.cartridgerc` exists.
    Ready,
}

impl ProjectState {
    /// Inspect the manifest location.
    #[must_use]
    pub fn of(rc_path: &Path) -> Self {
        if rc_path.is_file() {
            Self::Ready
        } else {
            Self::Uninitialized
        }
    }
}

/// Fail unless the project has a module manifest. Silent on success.
pub fn ensure_ready(paths: &ProjectPaths) -> Result<()> {
    match ProjectState::of(&paths.rc) {
        ProjectState::Ready => Ok(()),
        ProjectState::Uninitialized => {
            tracing::debug!("no manifest at {}", paths.rc.display());
            Err(ModuleError::CartridgeNotInstalled {
                path: paths.rc.display().to_string(),
            }
            .into())
        }
    }
}

/// Stop the script when `node_env` is exactly `"development"`.
///
/// On bypass, two lines naming the skipped step and the package are reported,
/// followed by a blank line. Any other value (or none) is silent.
pub fn bypass_if_development(node_env: Option<&str>, package_name: &str, reporter: &dyn Reporter) -> Flow {
    if node_env != Some(DEVELOPMENT_ENV) {
        return Flow::Continue;
    }

    reporter.info(&format!("{NODE_ENV_VAR} is set to {DEVELOPMENT_ENV}"));
    reporter.info(&format!("Skipping postinstall.js for {package_name}"));
    reporter.info("");
    Flow::Exit
}

/// Read `NODE_ENV` from the process environment.
#[must_use]
pub fn node_env() -> Option<String> {
    std::env::var(NODE_ENV_VAR).ok()
}
