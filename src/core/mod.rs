//! Core types shared by every lifecycle operation
//!
//! - [`ModuleError`] - the failure taxonomy (precondition, not found, parse, marker,
//!   write, external tool)
//! - [`ErrorContext`] and [`user_friendly_error`] - terminal rendering with suggestions
//! - [`Flow`] - the non-error outcome of a guard or finishing step, so that only the
//!   binary decides whether the process ends

pub mod error;

pub use error::{ErrorContext, ModuleError, find_module_error, user_friendly_error};

use crate::constants::EXIT_OK;

/// What a lifecycle script should do after a step that may end it early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Run the next step.
    Continue,
    /// Stop here and exit successfully.
    Exit,
}

impl Flow {
    /// Exit code to use when this flow ends the process.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        EXIT_OK
    }

    /// Whether the script should stop.
    #[must_use]
    pub const fn is_exit(self) -> bool {
        matches!(self, Self::Exit)
    }
}
