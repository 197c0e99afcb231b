//! Fixed names and literals shared across the crate.
//!
//! The host project layout is created by the Cartridge scaffolding tool, so
//! every file name here is part of the contract with that tool and must not
//! drift.

/// Module manifest file at the project root.
pub const RC_FILE_NAME: &str = ".cartridgerc";

/// Host package manifest at the project root.
pub const PACKAGE_FILE_NAME: &str = "package.json";

/// README file holding the generated module section.
pub const README_FILE_NAME: &str = "readme.md";

/// Directory holding project configuration and module config files.
pub const CONFIG_DIR_NAME: &str = "_config";

/// Project configuration document inside [`CONFIG_DIR_NAME`].
pub const PROJECT_CONFIG_FILE_NAME: &str = "project.json";

/// Directory holding Cartridge's own support files.
pub const CARTRIDGE_DIR_NAME: &str = "_cartridge";

/// Template used to render the README module list.
pub const MODULES_TEMPLATE_FILE_NAME: &str = "modules.tpl";

/// Directory where the package installer places modules.
pub const NODE_MODULES_DIR_NAME: &str = "node_modules";

/// Line opening the generated region of the README.
pub const README_START_MARKER: &str = "[//]: <> (Modules start)";

/// Line closing the generated region of the README.
pub const README_END_MARKER: &str = "[//]: <> (Modules end)";

/// Environment variable consulted by the development bypass.
pub const NODE_ENV_VAR: &str = "NODE_ENV";

/// Value of [`NODE_ENV_VAR`] that skips lifecycle scripts.
pub const DEVELOPMENT_ENV: &str = "development";

/// Entry point assumed when a module's package.json has no `main`.
pub const DEFAULT_MAIN_ENTRY: &str = "index.js";

/// Executable used for dependency installation.
pub const INSTALLER_COMMAND: &str = "npm";

/// Process exit code for success and benign early exits.
pub const EXIT_OK: u8 = 0;

/// Process exit code for every failure.
pub const EXIT_FAIL: u8 = 1;
