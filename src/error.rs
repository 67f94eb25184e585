//! Error types for pdftoc.
//!
//! Errors fall into a few categories:
//!
//! - **Usage errors**: bad or missing arguments
//! - **File access errors**: missing, unreadable or non-PDF inputs
//! - **Format errors**: malformed bookmark stanzas or TOC lines, reported
//!   with every offending line at once
//! - **Subprocess errors**: the external metadata tool could not be run or
//!   exited with a failure status

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for pdftoc operations.
pub type Result<T> = std::result::Result<T, PdfTocError>;

/// A problem found on a specific line of a metadata dump or TOC file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based line number.
    pub line: usize,
    /// What is wrong with the line.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic for a 1-based line number.
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Main error type for pdftoc operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfTocError {
    /// Invalid or missing command-line arguments.
    #[error("Invalid usage: {message}")]
    Usage {
        /// What is wrong with the arguments.
        message: String,
    },

    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Offending path.
        path: PathBuf,
    },

    /// Input file does not carry a PDF header.
    #[error("Not a PDF file: {}", .path.display())]
    NotAPdf {
        /// Offending path.
        path: PathBuf,
    },

    /// Input file exists but cannot be read.
    #[error("Cannot access file: {}\n  Reason: {source}", .path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Output file could not be written, renamed or backed up.
    #[error("Failed to write file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The metadata dump contains malformed bookmark stanzas.
    #[error("Malformed bookmark metadata{}:\n{}", origin(.path), list(.diagnostics))]
    MetadataFormat {
        /// Metadata file, when the text came from one.
        path: Option<PathBuf>,
        /// One entry per defect, in line order.
        diagnostics: Vec<Diagnostic>,
    },

    /// The TOC file contains malformed lines.
    #[error("Invalid TOC file{}:\n{}", origin(.path), list(.diagnostics))]
    TocValidation {
        /// TOC file, when the text came from one.
        path: Option<PathBuf>,
        /// One entry per defect, in line order.
        diagnostics: Vec<Diagnostic>,
    },

    /// The metadata dump has no `NumberOfPages:` line to anchor bookmarks on.
    #[error("Metadata has no NumberOfPages line; cannot place bookmarks")]
    MissingPageCount,

    /// A bookmark title would break the line structure of the metadata.
    #[error("Invalid bookmark title {title:?}: {reason}")]
    InvalidTitle {
        /// The rejected title.
        title: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The external metadata tool could not be started.
    #[error("Failed to run metadata tool '{}': {source}\n  Hint: install pdftk or pass --tool", .tool.display())]
    ToolNotFound {
        /// Program that was invoked.
        tool: PathBuf,
        /// Underlying spawn error.
        source: io::Error,
    },

    /// The external metadata tool exited with a failure status.
    #[error("Metadata tool '{}' failed ({status}): {stderr}", .tool.display())]
    ToolFailed {
        /// Program that was invoked.
        tool: PathBuf,
        /// Exit status description.
        status: String,
        /// Trimmed standard error output.
        stderr: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

fn origin(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

fn list(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("  {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl PdfTocError {
    /// Create a Usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a NotAPdf error.
    pub fn not_a_pdf(path: PathBuf) -> Self {
        Self::NotAPdf { path }
    }

    /// Create an InvalidTitle error.
    pub fn invalid_title(title: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTitle {
            title: title.into(),
            reason: reason.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Attach the originating file to a format or validation error.
    ///
    /// Other errors are returned unchanged.
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            Self::MetadataFormat { diagnostics, .. } => Self::MetadataFormat {
                path: Some(file.into()),
                diagnostics,
            },
            Self::TocValidation { diagnostics, .. } => Self::TocValidation {
                path: Some(file.into()),
                diagnostics,
            },
            other => other,
        }
    }

    /// Line diagnostics carried by this error, if any.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::MetadataFormat { diagnostics, .. } | Self::TocValidation { diagnostics, .. } => {
                diagnostics
            }
            _ => &[],
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolNotFound { .. } | Self::ToolFailed { .. } => 2,
            Self::FailedToWrite { .. } | Self::Io { .. } => 2,
            _ => 1,
        }
    }
}
