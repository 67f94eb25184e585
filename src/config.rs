//! Configuration module for pdftoc.
//!
//! Turns parsed CLI arguments into a validated [`Config`]: default file
//! paths are derived from the PDF path, the bookmark for `add` is built
//! and checked, and argument combinations that would clobber the PDF are
//! rejected before anything touches the disk.

use std::path::{Component, Path, PathBuf};

use crate::PdfTocError;
use crate::bookmark::Bookmark;
use crate::cli::{BatchAction, Cli, CliCommand};
use crate::error::Result;

/// Where `dump` sends the metadata text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataTarget {
    /// Write to a file (atomically, keeping a backup).
    File(PathBuf),
    /// Print to standard output.
    Stdout,
}

/// A fully resolved command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write the PDF's metadata dump.
    Dump {
        /// Source PDF.
        pdf: PathBuf,
        /// Destination of the dump.
        target: MetadataTarget,
    },
    /// Install a metadata file into the PDF.
    Update {
        /// PDF to update in place.
        pdf: PathBuf,
        /// Metadata text to install.
        metadata: PathBuf,
    },
    /// Insert one bookmark.
    Add {
        /// PDF the bookmark belongs to.
        pdf: PathBuf,
        /// Cached metadata file that is edited.
        metadata: PathBuf,
        /// Dump fresh metadata even if the cache exists.
        refresh: bool,
        /// Write the result back into the PDF.
        update: bool,
        /// The new entry.
        bookmark: Bookmark,
    },
    /// Write all bookmarks to a TOC file.
    BatchDump {
        /// Source PDF.
        pdf: PathBuf,
        /// TOC file to write.
        toc: PathBuf,
    },
    /// Replace all bookmarks with the entries of a TOC file.
    BatchUpdate {
        /// PDF to update in place.
        pdf: PathBuf,
        /// TOC file to read.
        toc: PathBuf,
        /// Where the merged metadata is saved before installing it.
        metadata: PathBuf,
    },
    /// Validate a TOC file only.
    Check {
        /// TOC file to check.
        toc: PathBuf,
        /// Print the report as JSON.
        json: bool,
    },
}

impl Command {
    /// The PDF the command operates on, if any.
    pub fn pdf(&self) -> Option<&Path> {
        match self {
            Self::Dump { pdf, .. }
            | Self::Update { pdf, .. }
            | Self::Add { pdf, .. }
            | Self::BatchDump { pdf, .. }
            | Self::BatchUpdate { pdf, .. } => Some(pdf),
            Self::Check { .. } => None,
        }
    }

    /// Short name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dump { .. } => "dump",
            Self::Update { .. } => "update",
            Self::Add { .. } => "add",
            Self::BatchDump { .. } => "batch dump",
            Self::BatchUpdate { .. } => "batch update",
            Self::Check { .. } => "check",
        }
    }
}

/// Validated settings for one pdftoc run.
#[derive(Debug, Clone)]
pub struct Config {
    /// What to do.
    pub command: Command,
    /// External metadata tool program.
    pub tool: PathBuf,
    /// Show detailed progress.
    pub verbose: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Default metadata file for a PDF: `book.pdf` → `book.metadata`.
pub fn default_metadata_path(pdf: &Path) -> PathBuf {
    pdf.with_extension("metadata")
}

/// Default TOC file for a PDF: `book.pdf` → `book.toc`.
pub fn default_toc_path(pdf: &Path) -> PathBuf {
    pdf.with_extension("toc")
}

/// Resolve `path` for comparison with another path.
///
/// The path is made absolute with `.` and `..` folded away, then its
/// existing part is resolved on disk, so `book.pdf`, `./book.pdf` and
/// `docs/../book.pdf` all name the same file.
fn resolved(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut lexical = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                lexical.pop();
            }
            other => lexical.push(other),
        }
    }

    if let Ok(real) = lexical.canonicalize() {
        return real;
    }
    match (lexical.parent(), lexical.file_name()) {
        (Some(parent), Some(name)) => match parent.canonicalize() {
            Ok(parent) => parent.join(name),
            Err(_) => lexical,
        },
        _ => lexical,
    }
}

/// Whether two paths name the same file.
fn same_file(a: &Path, b: &Path) -> bool {
    a == b || resolved(a) == resolved(b)
}

impl Config {
    /// Whether the command prints its data on stdout.
    pub fn writes_to_stdout(&self) -> bool {
        matches!(
            self.command,
            Command::Dump {
                target: MetadataTarget::Stdout,
                ..
            } | Command::Check { json: true, .. }
        )
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PdfTocError::Usage`] if a side file would overwrite the PDF
    /// or the tool path is empty.
    pub fn validate(&self) -> Result<()> {
        if self.tool.as_os_str().is_empty() {
            return Err(PdfTocError::usage("The metadata tool path is empty"));
        }

        let side_files: Vec<&Path> = match &self.command {
            Command::Dump {
                target: MetadataTarget::File(metadata),
                ..
            }
            | Command::Update { metadata, .. }
            | Command::Add { metadata, .. } => vec![metadata],
            Command::BatchDump { toc, .. } => vec![toc],
            Command::BatchUpdate { toc, metadata, .. } => vec![toc, metadata],
            Command::Dump { .. } | Command::Check { .. } => vec![],
        };

        if let Some(pdf) = self.command.pdf() {
            if pdf.as_os_str().is_empty() {
                return Err(PdfTocError::usage("No PDF file specified"));
            }
            if let Some(clash) = side_files.iter().find(|side| same_file(side, pdf)) {
                return Err(PdfTocError::usage(format!(
                    "{} would overwrite the PDF itself; choose another file name",
                    clash.display()
                )));
            }
        }

        if let Command::BatchUpdate { toc, metadata, .. } = &self.command
            && same_file(toc, metadata)
        {
            return Err(PdfTocError::usage(
                "The TOC file and the metadata file must differ",
            ));
        }

        Ok(())
    }
}

impl TryFrom<&Cli> for Config {
    type Error = PdfTocError;

    fn try_from(cli: &Cli) -> Result<Self> {
        let command = match &cli.command {
            CliCommand::Dump(args) => Command::Dump {
                pdf: args.pdf.clone(),
                target: match &args.metadata {
                    Some(path) if path.as_os_str() == "-" => MetadataTarget::Stdout,
                    Some(path) => MetadataTarget::File(path.clone()),
                    None => MetadataTarget::File(default_metadata_path(&args.pdf)),
                },
            },
            CliCommand::Update(args) => Command::Update {
                pdf: args.pdf.clone(),
                metadata: args
                    .metadata
                    .clone()
                    .unwrap_or_else(|| default_metadata_path(&args.pdf)),
            },
            CliCommand::Add(args) => {
                let title = args.description.join(" ");
                let title = title.trim();
                if title.is_empty() {
                    return Err(PdfTocError::usage("The bookmark description is empty"));
                }
                Command::Add {
                    pdf: args.pdf.clone(),
                    metadata: args
                        .metadata
                        .clone()
                        .unwrap_or_else(|| default_metadata_path(&args.pdf)),
                    refresh: args.dump,
                    update: args.update,
                    bookmark: Bookmark::new(args.page, args.level, title)?,
                }
            }
            CliCommand::Batch(args) => {
                let toc = args
                    .toc
                    .clone()
                    .unwrap_or_else(|| default_toc_path(&args.pdf));
                match args.action {
                    BatchAction::Dump => Command::BatchDump {
                        pdf: args.pdf.clone(),
                        toc,
                    },
                    BatchAction::Update => Command::BatchUpdate {
                        pdf: args.pdf.clone(),
                        toc,
                        metadata: default_metadata_path(&args.pdf),
                    },
                }
            }
            CliCommand::Check(args) => Command::Check {
                toc: args.toc.clone(),
                json: args.json,
            },
        };

        let config = Config {
            command,
            tool: cli.tool.clone(),
            verbose: cli.verbose,
            quiet: cli.quiet,
        };
        config.validate()?;

        Ok(config)
    }
}
