//! cartridge-module CLI entry point
//!
//! Runs one lifecycle step (or a whole postinstall/postuninstall sequence) for
//! the Cartridge module in `--module-dir`. See [`cartridge_module_utils::cli`]
//! for the available subcommands.
//!
//! This is the only place where outcomes become process exit codes: `0` for
//! success and early successful stops, `1` for any error.

use cartridge_module_utils::cli;
use cartridge_module_utils::core::error::user_friendly_error;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = cli::Cli::parse();
    cli.build_config().init_logging();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(flow) => ExitCode::from(flow.exit_code()),
        Err(e) => {
            // The outermost context names the failed operation, e.g. "addToRc error"
            let label = e.to_string();
            let error_ctx = user_friendly_error(e);
            if !error_ctx.error.to_string().starts_with(&label) {
                println!("{label}");
            }
            error_ctx.display();
            ExitCode::from(error_ctx.error.exit_code())
        }
    }
}
