//! Safe replacement of files on disk.
//!
//! Every write goes to `<path>.tmp` first and is renamed into place only
//! once complete, so a failed run never leaves a half-written TOC or
//! metadata file behind that looks finished. When the target already
//! exists it is copied to `<path>.bak` before being replaced.

use std::path::{Path, PathBuf};

use super::{backup_path, temp_path};
use crate::error::{PdfTocError, Result};

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Where the previous version was saved, if there was one.
    pub backup_path: Option<PathBuf>,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writes text files through a temporary file, keeping a backup.
#[derive(Debug, Clone, Default)]
pub struct TextWriter;

impl TextWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self
    }

    /// Write `contents` to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfTocError::FailedToWrite`] if the backup, the write or
    /// the final rename fails. The target is left untouched in that case.
    pub async fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.write_with_stats(path, contents).await.map(|_| ())
    }

    /// Write `contents` to `path` and report what was done.
    pub async fn write_with_stats(&self, path: &Path, contents: &str) -> Result<WriteStatistics> {
        let backup_path = self.backup(path).await?;

        let staged = temp_path(path);
        if let Err(e) = tokio::fs::write(&staged, contents).await {
            let _ = tokio::fs::remove_file(&staged).await;
            return Err(PdfTocError::FailedToWrite {
                path: staged,
                source: e,
            });
        }
        self.replace(path, &staged).await?;

        Ok(WriteStatistics {
            file_size: contents.len() as u64,
            backup_path,
        })
    }

    /// Copy `path` to `<path>.bak` if it exists.
    ///
    /// Returns the backup path when a copy was made.
    pub async fn backup(&self, path: &Path) -> Result<Option<PathBuf>> {
        if tokio::fs::metadata(path).await.is_err() {
            return Ok(None);
        }

        let backup = backup_path(path);
        tokio::fs::copy(path, &backup)
            .await
            .map_err(|e| PdfTocError::FailedToWrite {
                path: backup.clone(),
                source: e,
            })?;

        Ok(Some(backup))
    }

    /// Move a finished temporary file over `path`.
    ///
    /// The temporary file is removed if the rename fails.
    pub async fn replace(&self, path: &Path, finished: &Path) -> Result<()> {
        if let Err(e) = tokio::fs::rename(finished, path).await {
            let _ = tokio::fs::remove_file(finished).await;
            return Err(PdfTocError::FailedToWrite {
                path: path.to_path_buf(),
                source: e,
            });
        }
        Ok(())
    }

    /// Safely remove a file if it exists.
    pub async fn remove_if_exists(&self, path: &Path) -> Result<()> {
        if tokio::fs::metadata(path).await.is_ok() {
            tokio::fs::remove_file(path)
                .await
                .map_err(|e| PdfTocError::FailedToWrite {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
