//! Wrapper around the external PDF metadata tool.
//!
//! pdftoc never parses PDF files itself. Reading and writing the metadata
//! block is delegated to pdftk, or any program accepting the same syntax:
//!
//! ```text
//! <tool> IN.pdf dump_data_utf8                          # metadata on stdout
//! <tool> IN.pdf update_info_utf8 META output OUT.pdf    # write new PDF
//! ```

use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;

use crate::error::{PdfTocError, Result};

/// Default program name of the metadata tool.
pub const DEFAULT_TOOL: &str = "pdftk";

/// Runs the external metadata tool.
#[derive(Debug, Clone)]
pub struct MetadataTool {
    program: PathBuf,
}

impl MetadataTool {
    /// Use `program` as the metadata tool.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The program being invoked.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Read the full metadata dump of `pdf`.
    ///
    /// # Errors
    ///
    /// - [`PdfTocError::ToolNotFound`] if the program cannot be started
    /// - [`PdfTocError::ToolFailed`] if it exits unsuccessfully
    /// - [`PdfTocError::Other`] if its output is not valid UTF-8
    pub async fn dump(&self, pdf: &Path) -> Result<String> {
        let output = self
            .run(Command::new(&self.program).arg(pdf).arg("dump_data_utf8"))
            .await?;

        String::from_utf8(output.stdout).map_err(|e| {
            PdfTocError::other(format!(
                "Metadata tool '{}' produced invalid UTF-8: {e}",
                self.program.display()
            ))
        })
    }

    /// Write a copy of `pdf` with `metadata` installed to `output`.
    ///
    /// `output` must differ from `pdf`.
    pub async fn update(&self, pdf: &Path, metadata: &Path, output: &Path) -> Result<()> {
        self.run(
            Command::new(&self.program)
                .arg(pdf)
                .arg("update_info_utf8")
                .arg(metadata)
                .arg("output")
                .arg(output),
        )
        .await?;
        Ok(())
    }

    async fn run(&self, command: &mut Command) -> Result<Output> {
        let output = command
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| PdfTocError::ToolNotFound {
                tool: self.program.clone(),
                source: e,
            })?;

        if output.status.success() {
            return Ok(output);
        }

        let status = output
            .status
            .code()
            .map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {c}"));

        Err(PdfTocError::ToolFailed {
            tool: self.program.clone(),
            status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

impl Default for MetadataTool {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL)
    }
}
