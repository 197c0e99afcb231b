//! Error handling for Cartridge module lifecycle scripts
//!
//! This module provides the error taxonomy shared by every lifecycle operation and
//! the user-facing rendering used by the `cartridge-module` binary. The design
//! follows two rules:
//! 1. **Strongly-typed errors** ([`ModuleError`]) so callers can match on the failure
//! 2. **User-friendly messages** ([`ErrorContext`]) with a suggestion for the person
//!    running `npm install`
//!
//! Library code never terminates the process. Operations return
//! [`anyhow::Result`] with a [`ModuleError`] somewhere in the chain, and only the
//! binary maps a failure to exit code `1`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cartridge_module_utils::core::{ModuleError, user_friendly_error};
//!
//! let error = anyhow::Error::from(ModuleError::MarkerNotFound {
//!     file: "readme.md".to_string(),
//! });
//! let ctx = user_friendly_error(error);
//! ctx.display(); // colored error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::constants::{EXIT_FAIL, README_END_MARKER, README_START_MARKER};

/// The failure modes of a module lifecycle operation.
///
/// Every variant maps to exit code `1` at the binary boundary. String payloads
/// keep the type `Clone` so it can be re-wrapped in an [`ErrorContext`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModuleError {
    /// The project has no `.cartridgerc`, so Cartridge was never set up here.
    #[error("Cartridge is not set up in this directory. Please set it up first before installing this module")]
    CartridgeNotInstalled {
        /// Expected location of the manifest
        path: String,
    },

    /// A document that must already exist is missing.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Missing file
        path: String,
    },

    /// A JSON document could not be parsed.
    #[error("Invalid JSON in {file}: {reason}")]
    JsonParseError {
        /// File that failed to parse
        file: String,
        /// Parser message
        reason: String,
    },

    /// The README has no generated region.
    #[error("Module markers not found in {file}")]
    MarkerNotFound {
        /// README path
        file: String,
    },

    /// Persisting a document failed.
    #[error("Failed to write {file}: {reason}")]
    WriteError {
        /// Target file
        file: String,
        /// Underlying I/O message
        reason: String,
    },

    /// The package installer could not be run or exited unsuccessfully.
    #[error("{tool} failed: {reason}")]
    ExternalToolError {
        /// Executable name
        tool: String,
        /// Exit status or lookup failure
        reason: String,
    },

    /// The module list template could not be rendered.
    #[error("Failed to render module template: {reason}")]
    TemplateError {
        /// Tera message including its cause chain
        reason: String,
    },

    /// A key that must hold a JSON object holds something else.
    #[error("Invalid shape in {file}: '{key}' must be an object")]
    InvalidConfigShape {
        /// Document path
        file: String,
        /// Dotted key path, e.g. `paths.src`
        key: String,
    },

    /// The module's own package.json is unusable.
    #[error("Invalid module package config {file}: {reason}")]
    InvalidPackageConfig {
        /// Path of the module's package.json
        file: String,
        /// What is wrong with it
        reason: String,
    },

    /// A filesystem operation other than a document save failed.
    #[error("Failed to {operation} {path}: {reason}")]
    IoError {
        /// Short verb, e.g. `copy`, `remove`
        operation: String,
        /// Path involved
        path: String,
        /// Underlying I/O message
        reason: String,
    },

    /// Anything without a dedicated variant.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl ModuleError {
    /// Process exit code used when this error reaches the binary.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        EXIT_FAIL
    }
}

/// A [`ModuleError`] with optional details and a suggestion for the user.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ModuleError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with no suggestion or details.
    #[must_use]
    pub const fn new(error: ModuleError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Find the first [`ModuleError`] anywhere in an error chain.
#[must_use]
pub fn find_module_error(error: &anyhow::Error) -> Option<&ModuleError> {
    error.chain().find_map(|cause| cause.downcast_ref::<ModuleError>())
}

/// Convert any error into an [`ErrorContext`] suitable for the terminal.
///
/// The chain is searched for a [`ModuleError`] first; I/O errors get generic
/// filesystem advice; anything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(module_error) = find_module_error(&error) {
        return create_error_context(module_error.clone());
    }

    if let Some(io_error) = error.chain().find_map(|c| c.downcast_ref::<std::io::Error>()) {
        let reason = io_error.to_string();
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(ModuleError::IoError {
                    operation: "access".to_string(),
                    path: "unknown".to_string(),
                    reason,
                })
                .with_suggestion("Check file ownership of the project directory")
                .with_details(error.to_string());
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(ModuleError::IoError {
                    operation: "access".to_string(),
                    path: "unknown".to_string(),
                    reason,
                })
                .with_suggestion("Check that the file or directory exists and the path is correct")
                .with_details(error.to_string());
            }
            _ => {}
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(ModuleError::Other {
        message,
    })
}

fn create_error_context(error: ModuleError) -> ErrorContext {
    let help = match &error {
        ModuleError::FileNotFound { path } => Some((
            "Check that the project was scaffolded by Cartridge and the file was not deleted".to_string(),
            format!("Missing: {path}"),
        )),
        ModuleError::JsonParseError { file, .. } => Some((
            format!("Fix the JSON syntax in {file}"),
            "The document must be a well-formed JSON object".to_string(),
        )),
        ModuleError::MarkerNotFound { file } => Some((
            format!(
                "Add the lines '{README_START_MARKER}' and '{README_END_MARKER}' to {file}"
            ),
            "The module list is generated between these two marker lines".to_string(),
        )),
        ModuleError::WriteError { file, .. } => Some((
            format!("Check that {file} is writable"),
            "The document may have been left unchanged".to_string(),
        )),
        ModuleError::ExternalToolError { tool, .. } => Some((
            format!("Make sure '{tool}' is installed and on PATH, then run it manually to see its output"),
            "Dependency installation is delegated to the package manager".to_string(),
        )),
        ModuleError::TemplateError { .. } => Some((
            "Check the syntax of _cartridge/modules.tpl: loops use {% for module in modules %}".to_string(),
            "The template is rendered with the full .cartridgerc as context".to_string(),
        )),
        ModuleError::InvalidConfigShape { key, .. } => Some((
            format!("Make '{key}' a JSON object or remove it"),
            "Only objects can hold path mappings".to_string(),
        )),
        ModuleError::InvalidPackageConfig { .. } => Some((
            "Run the script from the module directory, or pass --module-dir".to_string(),
            "The module's package.json must at least have a 'name'".to_string(),
        )),
        ModuleError::IoError { path, .. } => Some((
            format!("Check permissions on {path}"),
            "A filesystem operation failed".to_string(),
        )),
        // Already a complete sentence for the user.
        ModuleError::CartridgeNotInstalled { .. } | ModuleError::Other { .. } => None,
    };

    match help {
        Some((suggestion, details)) => {
            ErrorContext::new(error).with_suggestion(suggestion).with_details(details)
        }
        None => ErrorContext::new(error),
    }
}
