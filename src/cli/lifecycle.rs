//! The standard postinstall and postuninstall sequences.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use super::SetPathsArgs;
use super::args::{CopySpec, parse_copy_spec};
use crate::core::Flow;
use crate::module_utils::ModuleUtils;

/// `ensure-ready -> bypass-dev -> add-to-rc -> set-paths -> add-config -> copy -> finish-install`
#[derive(Args, Debug, Clone, Default)]
pub struct PostinstallCommand {
    /// Config file to copy into _config (repeatable)
    #[arg(long = "config", value_name = "FILE")]
    pub configs: Vec<PathBuf>,

    /// File or directory to copy into the project (repeatable)
    #[arg(long = "copy", value_name = "SRC[:DEST]", value_parser = parse_copy_spec)]
    pub copies: Vec<CopySpec>,

    #[command(flatten)]
    pub paths: SetPathsArgs,
}

impl PostinstallCommand {
    /// Run the sequence, stopping at the first failure or at the development bypass.
    pub async fn execute(self, utils: &ModuleUtils, module_dir: &Path) -> Result<Flow> {
        utils.ensure_cartridge_exists()?;
        if utils.exit_if_dev_environment().is_exit() {
            return Ok(Flow::Exit);
        }

        utils.add_to_rc().await?;

        if !self.paths.is_empty() {
            utils.modify_project_config(|config| self.paths.apply(config)).await?;
        }

        for config in &self.configs {
            utils.add_module_config(&module_dir.join(config)).await?;
        }

        if !self.copies.is_empty() {
            let requests = self.copies.iter().map(|spec| spec.to_request(module_dir)).collect();
            utils.copy_to_project_dir(requests).await?;
        }

        Ok(utils.finish_install())
    }
}

/// `bypass-dev -> remove-from-rc -> remove-config -> remove -> finish-uninstall`
#[derive(Args, Debug, Clone, Default)]
pub struct PostuninstallCommand {
    /// Config file to remove from _config (repeatable)
    #[arg(long = "config", value_name = "FILE")]
    pub configs: Vec<PathBuf>,

    /// Project-relative path to remove (repeatable)
    #[arg(long = "remove", value_name = "PATH")]
    pub removals: Vec<PathBuf>,
}

impl PostuninstallCommand {
    /// Run the sequence, stopping at the first failure or at the development bypass.
    pub async fn execute(self, utils: &ModuleUtils) -> Result<Flow> {
        if utils.exit_if_dev_environment().is_exit() {
            return Ok(Flow::Exit);
        }

        utils.remove_from_rc().await?;

        for config in &self.configs {
            utils.remove_module_config(config).await?;
        }

        if !self.removals.is_empty() {
            utils.remove_from_project_dir(self.removals).await?;
        }

        Ok(utils.finish_uninstall())
    }
}
