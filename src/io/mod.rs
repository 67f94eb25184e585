//! File I/O for pdftoc.
//!
//! - [`FileReader`]: existence checks, PDF header sniffing, reading text
//! - [`TextWriter`]: atomic writes with a `.bak` copy of the previous version
//!
//! # Examples
//!
//! ```no_run
//! use pdftoc::io::{FileReader, TextWriter};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let toc = FileReader::new().read_text(Path::new("book.toc")).await?;
//! TextWriter::new().write(Path::new("copy.toc"), &toc).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::FileReader;
pub use writer::{TextWriter, WriteStatistics};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Append `suffix` to the file name of `path` (`book.pdf` → `book.pdf.bak`).
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Path of the backup copy kept for `path`.
pub fn backup_path(path: &Path) -> PathBuf {
    with_suffix(path, ".bak")
}

/// Path of the temporary file written before replacing `path`.
pub fn temp_path(path: &Path) -> PathBuf {
    with_suffix(path, ".tmp")
}
