//! Command-line interface for Cartridge module lifecycle scripts
//!
//! A module's `package.json` wires its lifecycle hooks to this binary:
//!
//! ```json
//! {
//!   "scripts": {
//!     "postinstall": "cartridge-module postinstall --config _config/task.sass.js",
//!     "postuninstall": "cartridge-module postuninstall --config _config/task.sass.js"
//!   }
//! }
//! ```
//!
//! npm runs lifecycle scripts from the module directory, so `--module-dir`
//! defaults to the current directory and the project root is resolved two
//! levels up (`<project>/node_modules/<module>`). Every step is also available as
//! its own subcommand for scripts that need a different order.
//!
//! # Exit codes
//!
//! - `0`: success, development bypass, or finished install/uninstall
//! - `1`: any failure; the operation label is printed, then the error

mod args;
mod lifecycle;

#[cfg(test)]
mod tests;

pub use args::{CopySpec, DependencyArgs, parse_copy_spec, parse_key_value};
pub use lifecycle::{PostinstallCommand, PostuninstallCommand};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::{PackageConfig, ProjectPaths};
use crate::core::Flow;
use crate::module_utils::{ModuleUtils, labels};
use crate::project_config::ProjectConfig;
use crate::reporter::{ConsoleReporter, Reporter};

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// `tracing` filter directive
    pub log_level: String,
    /// Suppress step lines on stdout
    pub quiet: bool,
}

impl CliConfig {
    /// Install the `tracing` subscriber on stderr.
    ///
    /// `RUST_LOG` wins over the flag-derived level when set.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Main CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "cartridge-module",
    about = "Lifecycle helpers for Cartridge modules",
    version,
    author,
    long_about = "Registers a Cartridge module in the host project's .cartridgerc, keeps the README \
                  module list in sync, stages config and asset files, and merges dependencies into \
                  the host package.json."
)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Directory of the module running the script
    #[arg(long, global = true, default_value = ".")]
    module_dir: PathBuf,

    /// Host project root; defaults to two levels above the module directory
    #[arg(long, global = true)]
    project_root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fail unless the project has a .cartridgerc
    EnsureReady,

    /// Stop successfully when NODE_ENV is development
    BypassDev,

    /// Register the module in .cartridgerc and refresh the README
    AddToRc,

    /// Unregister the module from .cartridgerc and refresh the README
    RemoveFromRc,

    /// Copy config files into _config, skipping existing ones
    AddConfig {
        /// Files relative to the module directory
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Remove config files from _config
    RemoveConfig {
        /// Files named like the ones to remove
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Copy files or directories into the project, skipping existing ones
    Copy {
        /// `<src>[:<dest-dir>]`, src relative to the module directory
        #[arg(required = true, value_name = "SRC[:DEST]", value_parser = parse_copy_spec)]
        specs: Vec<CopySpec>,
    },

    /// Remove project-relative files or directories
    Remove {
        /// Paths relative to the project root
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Add entries to paths.src / paths.dest in _config/project.json
    SetPaths(SetPathsArgs),

    /// Merge dependencies into the host package.json
    AddDependencies(DependencyArgs),

    /// Install dependencies into the host project with npm
    InstallDependencies(DependencyArgs),

    /// Remove the module from the host package.json and node_modules
    CleanPackage,

    /// Report the end of a postinstall script
    FinishInstall,

    /// Report the end of a postuninstall script
    FinishUninstall,

    /// Run the standard postinstall sequence
    Postinstall(PostinstallCommand),

    /// Run the standard postuninstall sequence
    Postuninstall(PostuninstallCommand),
}

/// `--src key=value` / `--dest key=value` pairs for `_config/project.json`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SetPathsArgs {
    /// Entry for paths.src
    #[arg(long = "src", value_name = "KEY=PATH", value_parser = parse_key_value)]
    pub src: Vec<(String, String)>,

    /// Entry for paths.dest
    #[arg(long = "dest", value_name = "KEY=PATH", value_parser = parse_key_value)]
    pub dest: Vec<(String, String)>,
}

impl SetPathsArgs {
    /// Whether any pair was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.src.is_empty() && self.dest.is_empty()
    }

    /// Insert every pair, overwriting existing keys.
    #[must_use]
    pub fn apply(&self, mut config: ProjectConfig) -> ProjectConfig {
        if let Some(src) = config.src_paths_mut() {
            for (key, value) in &self.src {
                src.insert(key.clone(), Value::String(value.clone()));
            }
        }
        if let Some(dest) = config.dest_paths_mut() {
            for (key, value) in &self.dest {
                dest.insert(key.clone(), Value::String(value.clone()));
            }
        }
        config
    }
}

impl Cli {
    /// Run the command with console output.
    pub async fn execute(self) -> Result<Flow> {
        let config = self.build_config();
        let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter::new().quiet(config.quiet));
        self.execute_with_reporter(reporter).await
    }

    /// Settings derived from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            quiet: self.quiet,
        }
    }

    /// Run the command, sending step lines to `reporter`.
    pub async fn execute_with_reporter(self, reporter: Arc<dyn Reporter>) -> Result<Flow> {
        let utils = self.module_utils(reporter).await?;
        self.command.run(&utils, &self.module_dir).await
    }

    async fn module_utils(&self, reporter: Arc<dyn Reporter>) -> Result<ModuleUtils> {
        let package = PackageConfig::load(&self.module_dir).await?;
        let paths = match &self.project_root {
            Some(root) => ProjectPaths::new(root.clone()),
            None => ProjectPaths::from_module_dir(&self.module_dir)?,
        };
        tracing::debug!("module {} in project {}", package.name, paths.project.display());
        Ok(ModuleUtils::new(paths, package, reporter))
    }
}

impl Commands {
    async fn run(self, utils: &ModuleUtils, module_dir: &Path) -> Result<Flow> {
        match self {
            Self::EnsureReady => utils.ensure_cartridge_exists()?,
            Self::BypassDev => return Ok(utils.exit_if_dev_environment()),
            Self::AddToRc => utils.add_to_rc().await?,
            Self::RemoveFromRc => utils.remove_from_rc().await?,
            Self::AddConfig {
                files,
            } => {
                for file in files {
                    utils.add_module_config(&module_dir.join(file)).await?;
                }
            }
            Self::RemoveConfig {
                files,
            } => {
                for file in files {
                    utils.remove_module_config(&file).await?;
                }
            }
            Self::Copy {
                specs,
            } => {
                let requests = specs.iter().map(|spec| spec.to_request(module_dir)).collect();
                utils.copy_to_project_dir(requests).await?;
            }
            Self::Remove {
                paths,
            } => utils.remove_from_project_dir(paths).await?,
            Self::SetPaths(args) => utils.modify_project_config(|config| args.apply(config)).await?,
            Self::AddDependencies(args) => {
                let incoming = args.incoming(utils.package()).await.context(labels::MODIFY_PACKAGE_JSON)?;
                utils.add_to_package(&incoming, &args.excluded).await?;
            }
            Self::InstallDependencies(args) => {
                let incoming = args.incoming(utils.package()).await.context(labels::INSTALL_DEPENDENCIES)?;
                utils.install_dependencies(&incoming, &args.excluded).await?;
            }
            Self::CleanPackage => utils.clean_expansion_pack().await?,
            Self::FinishInstall => return Ok(utils.finish_install()),
            Self::FinishUninstall => return Ok(utils.finish_uninstall()),
            Self::Postinstall(cmd) => return cmd.execute(utils, module_dir).await,
            Self::Postuninstall(cmd) => return cmd.execute(utils).await,
        }
        Ok(Flow::Continue)
    }
}
