//! CLI argument parsing for pdftoc.
//!
//! This module only declares the command-line surface with `clap`; turning
//! the parsed arguments into a validated [`Config`](crate::config::Config)
//! happens in the `config` module. Keeping this file free of crate imports
//! lets `build.rs` include it to render the man page.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Edit the bookmarks (table of contents) of a PDF file.
///
/// pdftoc reads and writes PDF metadata through an external metadata tool
/// (pdftk or a compatible program) and edits the bookmark entries in it,
/// either all at once through a simple TOC file or one entry at a time.
#[derive(Parser, Debug)]
#[command(name = "pdftoc")]
#[command(version)]
#[command(about = "Dump, edit and update the bookmarks of PDF files", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: CliCommand,

    /// Show detailed information about each step
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// External metadata tool used to read and write PDF metadata
    ///
    /// Must understand the pdftk command syntax for `dump_data_utf8`
    /// and `update_info_utf8`.
    #[arg(long, global = true, value_name = "PATH", env = "PDFTOC_TOOL", default_value = "pdftk")]
    pub tool: PathBuf,
}

/// pdftoc subcommands.
#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Write the full metadata of a PDF to a text file
    ///
    /// Use '-' as METADATA_FILE to print the metadata to stdout.
    Dump(DumpArgs),

    /// Write a metadata text file into a PDF
    ///
    /// The original PDF is kept as PDF.bak.
    Update(UpdateArgs),

    /// Insert a single bookmark into the metadata of a PDF
    ///
    /// The new entry is placed after every existing entry for the same
    /// or an earlier page.
    ///
    /// Example:
    ///   pdftoc add book.pdf --update -p 12 -l 2 Related work
    Add(AddArgs),

    /// Dump all bookmarks to a TOC file, or replace them from one
    ///
    /// A TOC file holds one bookmark per line: PAGE LEVEL DESCRIPTION.
    ///
    /// Examples:
    ///   pdftoc batch book.pdf dump
    ///   pdftoc batch book.pdf update book.toc
    Batch(BatchArgs),

    /// Check a TOC file for malformed lines without touching any PDF
    Check(CheckArgs),
}

/// Arguments of `dump`.
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// PDF file to read
    #[arg(value_name = "PDF")]
    pub pdf: PathBuf,

    /// Metadata output file [default: PDF with extension .metadata]
    #[arg(value_name = "METADATA_FILE")]
    pub metadata: Option<PathBuf>,
}

/// Arguments of `update`.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// PDF file to update
    #[arg(value_name = "PDF")]
    pub pdf: PathBuf,

    /// Metadata input file [default: PDF with extension .metadata]
    #[arg(value_name = "METADATA_FILE")]
    pub metadata: Option<PathBuf>,
}

/// Arguments of `add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// PDF file the bookmark belongs to
    #[arg(value_name = "PDF")]
    pub pdf: PathBuf,

    /// Dump fresh metadata from the PDF instead of using the cached file
    #[arg(long)]
    pub dump: bool,

    /// Write the edited metadata back into the PDF
    #[arg(long)]
    pub update: bool,

    /// Cached metadata file [default: PDF with extension .metadata]
    #[arg(short, long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Page the bookmark points to (1-based)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Nesting level of the bookmark (1 = top level)
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub level: u32,

    /// Bookmark title; several words are joined with single spaces
    #[arg(required = true, value_name = "DESCRIPTION", num_args = 1.., trailing_var_arg = true)]
    pub description: Vec<String>,
}

/// Arguments of `batch`.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// PDF file whose bookmarks are dumped or replaced
    #[arg(value_name = "PDF")]
    pub pdf: PathBuf,

    /// Direction of the batch operation
    #[arg(value_enum, value_name = "ACTION")]
    pub action: BatchAction,

    /// TOC file [default: PDF with extension .toc]
    #[arg(value_name = "TOC_FILE")]
    pub toc: Option<PathBuf>,
}

/// What `batch` does with the TOC file.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchAction {
    /// Write the PDF's bookmarks to the TOC file
    Dump,
    /// Replace the PDF's bookmarks with the TOC file's entries
    Update,
}

/// Arguments of `check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// TOC file to check
    #[arg(value_name = "TOC_FILE")]
    pub toc: PathBuf,

    /// Print the validation report as JSON
    #[arg(long)]
    pub json: bool,
}
