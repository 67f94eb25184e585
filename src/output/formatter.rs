//! Message formatting and display.
//!
//! Status messages normally go to stdout. Commands whose stdout carries
//! data (`dump PDF -`, `check --json`) route them to stderr instead, so the
//! data stays clean. Warnings always go to stderr; errors are printed once
//! by the binary.
//!
//! # Examples
//!
//! ```
//! use pdftoc::output::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, true);
//! formatter.debug("Dumping metadata...");
//! formatter.success("Wrote 12 bookmarks");
//! formatter.warning("Page 40 is beyond the last page");
//! ```

use crate::config::Config;
use std::io::{self, IsTerminal, Write};

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Debug/verbose message.
    Debug,
}

impl MessageLevel {
    fn decoration(self) -> (&'static str, &'static str) {
        match self {
            Self::Success => ("✓ ", "\x1b[32m"), // Green
            Self::Warning => ("⚠ ", "\x1b[33m"), // Yellow
            Self::Debug => ("→ ", "\x1b[36m"),   // Cyan
        }
    }
}

/// Output formatter with configurable verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    /// Whether to suppress non-warning output.
    quiet: bool,
    /// Whether to show verbose output.
    verbose: bool,
    /// Whether status messages go to stderr.
    status_to_stderr: bool,
}

impl OutputFormatter {
    /// Create a new output formatter writing status messages to stdout.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            status_to_stderr: false,
        }
    }

    /// Create a formatter from configuration.
    ///
    /// Status messages move to stderr when the command prints data on stdout.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet, config.verbose).with_status_to_stderr(config.writes_to_stdout())
    }

    /// Route status messages to stderr.
    pub fn with_status_to_stderr(mut self, enabled: bool) -> Self {
        self.status_to_stderr = enabled;
        self
    }

    /// Create a quiet formatter (only warnings).
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Print a success message. Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Success, message);
        }
    }

    /// Print a warning message, even in quiet mode.
    pub fn warning(&self, message: &str) {
        self.print_message(MessageLevel::Warning, message);
    }

    /// Print a debug message. Only displayed in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.print_message(MessageLevel::Debug, message);
        }
    }

    /// Print a labelled value. Only displayed in verbose mode.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            self.emit(self.status_to_stderr, &format!("  {label}: {value}"));
        }
    }

    /// Whether messages of `level` are written to stderr.
    pub fn uses_stderr(&self, level: MessageLevel) -> bool {
        level == MessageLevel::Warning || self.status_to_stderr
    }

    fn print_message(&self, level: MessageLevel, message: &str) {
        let (prefix, color_code) = level.decoration();
        let to_stderr = self.uses_stderr(level);

        let line = if should_use_color(to_stderr) {
            format!("{color_code}{prefix}{message}\x1b[0m")
        } else {
            format!("{prefix}{message}")
        };
        self.emit(to_stderr, &line);
    }

    fn emit(&self, to_stderr: bool, line: &str) {
        if to_stderr {
            let _ = writeln!(io::stderr().lock(), "{line}");
        } else {
            let _ = writeln!(io::stdout().lock(), "{line}");
        }
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

/// Colour only when the target stream is a terminal and TERM is set.
fn should_use_color(to_stderr: bool) -> bool {
    let terminal = if to_stderr {
        io::stderr().is_terminal()
    } else {
        io::stdout().is_terminal()
    };
    terminal && std::env::var_os("TERM").is_some()
}
