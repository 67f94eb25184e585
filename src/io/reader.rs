//! Reading inputs and checking that they are what they claim to be.

use std::io::ErrorKind;
use std::path::Path;
use tokio::io::AsyncReadExt;

use crate::error::{PdfTocError, Result};

/// Number of leading bytes searched for the `%PDF-` header.
const HEADER_WINDOW: usize = 1024;

/// Reads input files.
#[derive(Debug, Clone, Default)]
pub struct FileReader;

impl FileReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Check that `path` exists and is a regular file.
    ///
    /// # Errors
    ///
    /// - [`PdfTocError::FileNotFound`] if nothing exists at `path`
    /// - [`PdfTocError::NotAFile`] if `path` is a directory or similar
    /// - [`PdfTocError::FileNotAccessible`] if its metadata cannot be read
    pub async fn check_file(&self, path: &Path) -> Result<()> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                PdfTocError::file_not_found(path.to_path_buf())
            } else {
                PdfTocError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        if !metadata.is_file() {
            return Err(PdfTocError::not_a_file(path.to_path_buf()));
        }

        Ok(())
    }

    /// Check that `path` is a readable file starting with a PDF header.
    ///
    /// Only the first kilobyte is inspected; the document itself is never
    /// parsed.
    ///
    /// # Errors
    ///
    /// Everything [`check_file`](Self::check_file) reports, plus
    /// [`PdfTocError::NotAPdf`] if no `%PDF-` marker is found.
    pub async fn check_pdf(&self, path: &Path) -> Result<()> {
        self.check_file(path).await?;

        let access = |source| PdfTocError::FileNotAccessible {
            path: path.to_path_buf(),
            source,
        };

        let file = tokio::fs::File::open(path).await.map_err(access)?;
        let mut head = Vec::with_capacity(HEADER_WINDOW);
        file.take(HEADER_WINDOW as u64)
            .read_to_end(&mut head)
            .await
            .map_err(access)?;

        if !head.windows(5).any(|window| window == b"%PDF-") {
            return Err(PdfTocError::not_a_pdf(path.to_path_buf()));
        }

        Ok(())
    }

    /// Read a whole UTF-8 text file.
    ///
    /// # Errors
    ///
    /// Everything [`check_file`](Self::check_file) reports; a read or
    /// decoding failure becomes [`PdfTocError::FileNotAccessible`].
    pub async fn read_text(&self, path: &Path) -> Result<String> {
        self.check_file(path).await?;

        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PdfTocError::FileNotAccessible {
                path: path.to_path_buf(),
                source: e,
            })
    }

    /// Whether something exists at `path`.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}
