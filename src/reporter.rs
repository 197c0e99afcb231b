//! User-facing step output.
//!
//! Lifecycle scripts print one line per meaningful step ("Adding foo to
//! .cartridgerc", "Finished: ...", "Skipping: ..."). Those lines are part of the
//! observable behavior, so they go through [`Reporter`] instead of `println!`.
//! Internal diagnostics use `tracing` and never appear here.

use colored::Colorize;

/// Sink for the human-readable lines a lifecycle step emits.
pub trait Reporter: Send + Sync {
    /// An informational line. An empty message prints a blank line.
    fn info(&self, message: &str);

    /// An error line.
    fn error(&self, message: &str);
}

/// Writes info lines to stdout and error lines to stderr in red.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    /// Create a reporter that prints every line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            quiet: false,
        }
    }

    /// Suppress info lines; errors are still printed.
    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }

    fn error(&self, message: &str) {
        eprintln!("{}", message.red());
    }
}
