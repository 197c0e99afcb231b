//! Copying module files into the host project and removing them again.
//!
//! A copy never overwrites: when the destination already exists the copy is
//! skipped and reported as such, so files a user has edited survive a
//! reinstall. Removal is idempotent. Batches fan out onto the blocking pool
//! through [`run_parallel`]; the order of their report lines is not defined and
//! a failed batch is not rolled back.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ProjectPaths;
use crate::constants::CONFIG_DIR_NAME;
use crate::core::ModuleError;
use crate::reporter::Reporter;
use crate::utils::{copy_path, project_path, remove_path, run_parallel};

/// One entry of a batch copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    /// File or directory to copy.
    pub source: PathBuf,
    /// Project-relative destination directory; the project root when `None`.
    pub dest_dir: Option<PathBuf>,
}

impl CopyRequest {
    /// Copy `source` into the project root.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest_dir: None,
        }
    }

    /// Copy into `dest_dir` instead of the project root.
    #[must_use]
    pub fn into_dir(mut self, dest_dir: impl Into<PathBuf>) -> Self {
        self.dest_dir = Some(dest_dir.into());
        self
    }
}

/// What a single copy did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The destination was created.
    Copied,
    /// The destination already existed and was left alone.
    Skipped,
}

/// Stages files for one module.
#[derive(Clone)]
pub struct FileStager {
    project: PathBuf,
    config_dir: PathBuf,
    package_name: String,
    reporter: Arc<dyn Reporter>,
}

impl FileStager {
    /// Create a stager for `package_name` in the project described by `paths`.
    pub fn new(paths: &ProjectPaths, package_name: impl Into<String>, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            project: paths.project.clone(),
            config_dir: paths.config.clone(),
            package_name: package_name.into(),
            reporter,
        }
    }

    /// Where `source` lands: `<project>[/<dest_dir>]/<basename of source>`.
    pub fn destination_for(&self, source: &Path, dest_dir: Option<&Path>) -> Result<PathBuf> {
        let file_name = source.file_name().ok_or_else(|| ModuleError::IoError {
            operation: "copy".to_string(),
            path: source.display().to_string(),
            reason: "source has no file name".to_string(),
        })?;

        let dir = match dest_dir {
            Some(dir) => project_path(&self.project, dir)?,
            None => self.project.clone(),
        };
        Ok(dir.join(file_name))
    }

    /// Copy one file or directory, skipping it if the destination exists.
    pub async fn copy_one(&self, source: &Path, dest_dir: Option<&Path>) -> Result<CopyOutcome> {
        let request = CopyRequest {
            source: source.to_path_buf(),
            dest_dir: dest_dir.map(Path::to_path_buf),
        };
        let mut outcomes = self.copy_many(vec![request]).await?;
        Ok(outcomes.pop().unwrap_or(CopyOutcome::Skipped))
    }

    /// Copy every request concurrently. Outcomes are returned in input order.
    pub async fn copy_many(&self, requests: Vec<CopyRequest>) -> Result<Vec<CopyOutcome>> {
        let jobs: Vec<_> = requests
            .into_iter()
            .map(|request| {
                let stager = self.clone();
                move || stager.copy_blocking(&request.source, request.dest_dir.as_deref())
            })
            .collect();

        run_parallel(jobs).await
    }

    fn copy_blocking(&self, source: &Path, dest_dir: Option<&Path>) -> Result<CopyOutcome> {
        let destination = self.destination_for(source, dest_dir)?;
        let file_name = display_name(source);

        if destination.exists() {
            tracing::debug!("{} exists, not copying {}", destination.display(), source.display());
            self.reporter.info(&format!("Skipping: Copying {file_name} file as it already exists"));
            return Ok(CopyOutcome::Skipped);
        }

        copy_path(source, &destination)
            .with_context(|| format!("Failed to copy {} for {}", file_name, self.package_name))?;
        self.reporter.info(&format!("Finished: Copying {} for {}", file_name, self.package_name));
        Ok(CopyOutcome::Copied)
    }

    /// Remove a project-relative file or directory. Missing paths are fine.
    pub async fn remove_one(&self, relative: &Path) -> Result<()> {
        self.remove_many(vec![relative.to_path_buf()]).await
    }

    /// Remove every project-relative path concurrently.
    pub async fn remove_many(&self, paths: Vec<PathBuf>) -> Result<()> {
        let jobs: Vec<_> = paths
            .into_iter()
            .map(|relative| {
                let stager = self.clone();
                move || stager.remove_blocking(&relative)
            })
            .collect();

        run_parallel(jobs).await?;
        Ok(())
    }

    fn remove_blocking(&self, relative: &Path) -> Result<()> {
        let target = project_path(&self.project, relative)?;
        if target == self.project {
            return Err(ModuleError::IoError {
                operation: "remove".to_string(),
                path: relative.display().to_string(),
                reason: "refusing to remove the project root".to_string(),
            }
            .into());
        }
        remove_path(&target)?;
        self.reporter.info(&format!(
            "Finished: Removing {} for {}",
            display_name(relative),
            self.package_name
        ));
        Ok(())
    }

    /// Copy a module config file into `_config`.
    pub async fn add_module_config(&self, source: &Path) -> Result<CopyOutcome> {
        self.copy_one(source, Some(Path::new(CONFIG_DIR_NAME))).await
    }

    /// Remove the file named like `source` from `_config`.
    pub async fn remove_module_config(&self, source: &Path) -> Result<()> {
        let file_name = source.file_name().ok_or_else(|| ModuleError::IoError {
            operation: "remove".to_string(),
            path: source.display().to_string(),
            reason: "config path has no file name".to_string(),
        })?;
        let target = self.config_dir.join(file_name);

        tokio::task::spawn_blocking(move || remove_path(&target))
            .await
            .context("Failed to join filesystem task")??;

        self.reporter.info(&format!("Finished: Removed {} config files", self.package_name));
        Ok(())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
