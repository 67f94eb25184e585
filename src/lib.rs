//! pdftoc - Edit the bookmarks (table of contents) of PDF files.
//!
//! pdftoc works on the text metadata dump produced by pdftk-compatible
//! tools. It can project the bookmark stanzas of a dump onto a simple
//! one-line-per-entry TOC file, merge an edited TOC file back into a dump,
//! and insert single entries in page order.
//!
//! # Examples
//!
//! ## Editing a dump in memory
//!
//! ```
//! use pdftoc::bookmark::Bookmark;
//! use pdftoc::metadata::{extract_toc, insert_bookmark};
//!
//! # fn example() -> pdftoc::Result<()> {
//! let dump = "NumberOfPages: 12\n";
//! let edited = insert_bookmark(dump, &Bookmark::new(3, 1, "Chapter One")?)?;
//!
//! let toc = extract_toc(&edited)?;
//! assert_eq!(toc.render(), "3 1 Chapter One\n");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Running a workflow
//!
//! ```no_run
//! use pdftoc::ops::Workflow;
//! use pdftoc::output::OutputFormatter;
//! use pdftoc::tool::MetadataTool;
//! use std::path::Path;
//!
//! # async fn example() -> pdftoc::Result<()> {
//! let workflow = Workflow::new(MetadataTool::default(), OutputFormatter::default());
//! workflow
//!     .batch_dump(Path::new("book.pdf"), Path::new("book.toc"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bookmark;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod metadata;
pub mod ops;
pub mod output;
pub mod toc;
pub mod tool;
pub mod validation;

pub use config::Config;
pub use error::{Diagnostic, PdfTocError, Result};

use crate::cli::Cli;
use crate::output::OutputFormatter;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Resolve the parsed command line and run it.
pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::try_from(&cli)?;
    let formatter = OutputFormatter::from_config(&config);

    formatter.debug(&format!("{NAME} v{VERSION}"));
    ops::execute(&config).await
}
