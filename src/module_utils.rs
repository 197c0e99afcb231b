//! The per-module lifecycle API.
//!
//! A postinstall script for a Cartridge module is a short sequence of calls on
//! [`ModuleUtils`]:
//!
//! ```rust,no_run
//! use cartridge_module_utils::{ModuleUtils, core::Flow, reporter::ConsoleReporter};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let utils = ModuleUtils::from_module_dir(Path::new("."), Arc::new(ConsoleReporter::new())).await?;
//!
//! utils.ensure_cartridge_exists()?;
//! if utils.exit_if_dev_environment().is_exit() {
//!     return Ok(());
//! }
//! utils.add_to_rc().await?;
//! utils.add_module_config(Path::new("_config/task.sass.js")).await?;
//! utils.finish_install();
//! # Ok(())
//! # }
//! ```
//!
//! Every mutating step is a whole-file read-modify-write. A failing step returns
//! an error whose outermost context is a short operation label such as
//! `addToRc error`; steps that already persisted are not undone.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{PackageConfig, ProjectPaths};
use crate::constants::RC_FILE_NAME;
use crate::core::Flow;
use crate::dependencies::{DependencyInstaller, PackageManifest, to_install_list};
use crate::guard;
use crate::manifest::{Manifest, ModuleEntry};
use crate::project_config::{ProjectConfig, update_project_config};
use crate::readme::{TemplateEngine, TeraTemplateEngine, update_readme};
use crate::reporter::Reporter;
use crate::staging::{CopyOutcome, CopyRequest, FileStager};
use crate::utils::remove_path;

/// Operation labels reported above the error detail when a step fails.
pub mod labels {
    /// Registering the module in `.cartridgerc`.
    pub const ADD_TO_RC: &str = "addToRc error";
    /// Unregistering the module from `.cartridgerc`.
    pub const REMOVE_FROM_RC: &str = "removeFromRc error";
    /// Re-rendering the README module region.
    pub const UPDATE_README: &str = "updateReadme error";
    /// Transforming `_config/project.json`.
    pub const MODIFY_PROJECT_CONFIG: &str = "modifyProjectConfig error";
    /// Merging into the host `package.json`.
    pub const MODIFY_PACKAGE_JSON: &str = "modifyPackageJson error";
    /// Removing the module from the host `package.json` and `node_modules`.
    pub const CLEAN_EXPANSION_PACK: &str = "cleanExpansionPack error";
    /// Running the package installer.
    pub const INSTALL_DEPENDENCIES: &str = "installDependencies error";
    /// Copying module files into the project.
    pub const COPY_TO_PROJECT: &str = "copyToProjectDir error";
    /// Removing staged files from the project.
    pub const REMOVE_FROM_PROJECT: &str = "removeFromProjectDir error";
}

/// Lifecycle helpers bound to one module and one host project.
pub struct ModuleUtils {
    paths: ProjectPaths,
    package: PackageConfig,
    reporter: Arc<dyn Reporter>,
    engine: Arc<dyn TemplateEngine>,
    installer: DependencyInstaller,
    stager: FileStager,
}

impl ModuleUtils {
    /// Bind `package` to the project at `paths`, rendering with Tera and
    /// installing with npm.
    pub fn new(paths: ProjectPaths, package: PackageConfig, reporter: Arc<dyn Reporter>) -> Self {
        let stager = FileStager::new(&paths, package.name.clone(), Arc::clone(&reporter));
        Self {
            paths,
            package,
            reporter,
            engine: Arc::new(TeraTemplateEngine::new()),
            installer: DependencyInstaller::default(),
            stager,
        }
    }

    /// Load the module's `package.json` from `module_dir` and resolve the
    /// project two levels above it.
    pub async fn from_module_dir(module_dir: &Path, reporter: Arc<dyn Reporter>) -> Result<Self> {
        let package = PackageConfig::load(module_dir).await?;
        let paths = ProjectPaths::from_module_dir(module_dir)?;
        Ok(Self::new(paths, package, reporter))
    }

    /// Use another template engine for the README module list.
    #[must_use]
    pub fn with_template_engine(mut self, engine: Arc<dyn TemplateEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Use another package installer.
    #[must_use]
    pub fn with_installer(mut self, installer: DependencyInstaller) -> Self {
        self.installer = installer;
        self
    }

    /// Project locations.
    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// The module's package config.
    pub fn package(&self) -> &PackageConfig {
        &self.package
    }

    /// Print one user-facing line.
    pub fn log_message(&self, message: &str) {
        self.reporter.info(message);
    }

    /// Fail unless the project has a `.cartridgerc`.
    pub fn ensure_cartridge_exists(&self) -> Result<()> {
        guard::ensure_ready(&self.paths)
    }

    /// Stop when `NODE_ENV` is `development`.
    pub fn exit_if_dev_environment(&self) -> Flow {
        self.exit_if_dev_environment_with(guard::node_env().as_deref())
    }

    /// [`Self::exit_if_dev_environment`] with an explicit `NODE_ENV` value.
    pub fn exit_if_dev_environment_with(&self, node_env: Option<&str>) -> Flow {
        guard::bypass_if_development(node_env, &self.package.name, self.reporter.as_ref())
    }

    /// Register the module in `.cartridgerc` and refresh the README.
    pub async fn add_to_rc(&self) -> Result<()> {
        let name = &self.package.name;
        self.log_message(&format!("Adding {name} to {RC_FILE_NAME}"));

        let entry = ModuleEntry::from_package(&self.package);
        self.rewrite_rc(|manifest| {
            manifest.upsert_module(entry);
        })
        .await
        .context(labels::ADD_TO_RC)?;

        self.log_message(&format!("Finished: adding {name} to {RC_FILE_NAME}"));
        Ok(())
    }

    /// Unregister the module from `.cartridgerc` and refresh the README.
    pub async fn remove_from_rc(&self) -> Result<()> {
        let name = &self.package.name;
        self.log_message(&format!("Removing {name} from {RC_FILE_NAME}"));

        self.rewrite_rc(|manifest| {
            manifest.remove_module(name);
        })
        .await
        .context(labels::REMOVE_FROM_RC)?;

        self.log_message(&format!("Finished: Removing {name} from {RC_FILE_NAME}"));
        Ok(())
    }

    async fn rewrite_rc(&self, change: impl FnOnce(&mut Manifest)) -> Result<Manifest> {
        let mut manifest = Manifest::load(&self.paths.rc).await?;
        change(&mut manifest);
        manifest.save(&self.paths.rc)?;

        // The manifest is already saved if this fails.
        update_readme(&self.paths, self.engine.as_ref(), &manifest)
            .await
            .context(labels::UPDATE_README)?;
        Ok(manifest)
    }

    /// Apply `transform` to `_config/project.json` once `paths.src` and
    /// `paths.dest` are guaranteed to exist.
    pub async fn modify_project_config<F>(&self, transform: F) -> Result<()>
    where
        F: FnOnce(ProjectConfig) -> ProjectConfig,
    {
        let name = &self.package.name;
        self.log_message(&format!("Updating project config for {name}"));

        update_project_config(&self.paths.project_config(), transform)
            .await
            .context(labels::MODIFY_PROJECT_CONFIG)?;

        self.log_message(&format!("Finished: modifying project config for {name}"));
        Ok(())
    }

    /// Copy a config file into `_config`, unless one with that name exists.
    pub async fn add_module_config(&self, source: &Path) -> Result<CopyOutcome> {
        self.stager.add_module_config(source).await.context(labels::COPY_TO_PROJECT)
    }

    /// Remove the same-named file from `_config`.
    pub async fn remove_module_config(&self, source: &Path) -> Result<()> {
        self.stager.remove_module_config(source).await.context(labels::REMOVE_FROM_PROJECT)
    }

    /// Copy one file or directory into the project.
    pub async fn copy_file_to_project(&self, source: &Path, dest_dir: Option<&Path>) -> Result<CopyOutcome> {
        self.stager.copy_one(source, dest_dir).await.context(labels::COPY_TO_PROJECT)
    }

    /// Copy a batch concurrently.
    pub async fn copy_to_project_dir(&self, requests: Vec<CopyRequest>) -> Result<Vec<CopyOutcome>> {
        self.stager.copy_many(requests).await.context(labels::COPY_TO_PROJECT)
    }

    /// Remove project-relative paths concurrently.
    pub async fn remove_from_project_dir(&self, paths: Vec<PathBuf>) -> Result<()> {
        self.stager.remove_many(paths).await.context(labels::REMOVE_FROM_PROJECT)
    }

    /// Merge `incoming` into the host `dependencies`, skipping `excluded` names.
    pub async fn add_to_package<S: AsRef<str>>(&self, incoming: &Map<String, Value>, excluded: &[S]) -> Result<()> {
        async {
            let mut package = PackageManifest::load(&self.paths.package).await?;
            let written = package.merge_dependencies(incoming, excluded);
            package.save(&self.paths.package)?;
            tracing::debug!("merged {written} dependencies into {}", self.paths.package.display());
            anyhow::Ok(())
        }
        .await
        .context(labels::MODIFY_PACKAGE_JSON)?;

        self.log_message(&format!("Finished: modifying package.json for {}", self.package.name));
        Ok(())
    }

    /// Remove this module from the host `dependencies` and from `node_modules`.
    pub async fn clean_expansion_pack(&self) -> Result<()> {
        let name = self.package.name.clone();
        async {
            let mut package = PackageManifest::load(&self.paths.package).await?;
            if package.remove_dependency(&name) {
                package.save(&self.paths.package)?;
            }

            let installed = self.paths.installed_package(&name);
            tokio::task::spawn_blocking(move || remove_path(&installed))
                .await
                .context("Failed to join filesystem task")??;
            anyhow::Ok(())
        }
        .await
        .context(labels::CLEAN_EXPANSION_PACK)?;

        self.log_message(&format!("Finished: cleaned packages for {name}"));
        Ok(())
    }

    /// Install `incoming` minus `excluded` into the host project.
    pub async fn install_dependencies<S: AsRef<str>>(
        &self,
        incoming: &Map<String, Value>,
        excluded: &[S],
    ) -> Result<()> {
        let names = to_install_list(incoming, excluded);
        self.installer
            .install(&self.paths.project, &names)
            .await
            .context(labels::INSTALL_DEPENDENCIES)?;

        self.log_message(&format!("Finished: installing dependencies for {}", self.package.name));
        Ok(())
    }

    /// Report the end of a postinstall script.
    pub fn finish_install(&self) -> Flow {
        self.log_message(&format!("Finished: post install of {}", self.package.name));
        Flow::Exit
    }

    /// Report the end of a postuninstall script.
    pub fn finish_uninstall(&self) -> Flow {
        self.log_message(&format!("Finished: post uninstall of {}", self.package.name));
        Flow::Exit
    }
}
