//! cartridge-module-utils - lifecycle helpers for Cartridge modules
//!
//! Cartridge modules are npm packages that plug into a Cartridge-scaffolded
//! project. Their postinstall and postuninstall scripts use this crate to
//! register themselves in the project manifest, keep the README module list in
//! sync, stage config and asset files, and merge their dependencies into the
//! host `package.json`.
//!
//! # Architecture Overview
//!
//! Every operation is a whole-file read-modify-write:
//!
//! ```text
//! load document -> pure transform -> save document -> report
//! ```
//!
//! Operations that touch `.cartridgerc` always re-render the README region
//! afterwards, so the README reflects the manifest. Library code never exits the
//! process: failures are `anyhow` errors carrying a [`core::ModuleError`], and
//! early successful stops are [`core::Flow::Exit`]. Only the binary maps these to
//! exit codes `0` and `1`.
//!
//! # Project Layout
//!
//! ```text
//! <project>/
//!   .cartridgerc            module manifest
//!   package.json            host dependencies
//!   readme.md               contains the generated module region
//!   _cartridge/modules.tpl  template for that region
//!   _config/project.json    build paths
//!   node_modules/<module>/  the module running the script
//! ```
//!
//! # Modules
//!
//! ## Documents
//! - [`manifest`] - `.cartridgerc` entries, upsert and remove by name
//! - [`readme`] - template rendering and marker-region splicing
//! - [`dependencies`] - `package.json` dependency merge and removal, npm invocation
//! - [`project_config`] - `_config/project.json` shape and transforms
//!
//! ## Lifecycle
//! - [`module_utils`] - the per-module API used by lifecycle scripts
//! - [`staging`] - copying and removing module files in the project
//! - [`guard`] - the `.cartridgerc` precondition and the development bypass
//! - [`cli`] - the `cartridge-module` command line
//!
//! ## Supporting Modules
//! - [`config`] - project locations and the module's package config
//! - [`core`] - error types and [`core::Flow`]
//! - [`reporter`] - user-facing output
//! - [`utils`] - atomic writes, JSON I/O and concurrent filesystem batches
//!
//! # Command-Line Usage
//!
//! ```bash
//! # From node_modules/<module>, as a postinstall script
//! cartridge-module postinstall --config _config/task.sass.js --copy _source/styles:_source
//!
//! # Individual steps
//! cartridge-module add-to-rc
//! cartridge-module set-paths --src sass=_source/styles/ --dest sass=public/_client/styles/
//! cartridge-module add-dependencies --exclude cartridge-module-utils
//! ```

// Documents
pub mod dependencies;
pub mod manifest;
pub mod project_config;
pub mod readme;

// Lifecycle
pub mod cli;
pub mod guard;
pub mod module_utils;
pub mod staging;

// Supporting modules
pub mod config;
pub mod constants;
pub mod core;
pub mod reporter;
pub mod utils;

pub use module_utils::ModuleUtils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
