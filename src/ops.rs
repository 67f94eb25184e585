//! The pdftoc workflows.
//!
//! Each workflow strings together the same few steps: check the inputs,
//! ask the metadata tool for a dump, run one of the text transformations
//! and write the result back safely. The transformations themselves live in
//! [`crate::metadata`] and [`crate::toc`]; nothing here inspects stanza
//! lines directly.

use std::path::Path;
use tokio::io::AsyncWriteExt;

use crate::bookmark::Bookmark;
use crate::config::{Command, Config, MetadataTarget};
use crate::error::{PdfTocError, Result};
use crate::io::{FileReader, TextWriter, temp_path};
use crate::metadata::{self, MetadataDocument, extract_toc, insert_bookmark, merge_toc};
use crate::output::{OutputFormatter, display_validation_report};
use crate::toc::TocFile;
use crate::tool::MetadataTool;
use crate::validation::{TocValidator, ValidationReport};

/// Options of the `add` workflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddOptions {
    /// Dump fresh metadata even when a cached file exists.
    pub refresh: bool,
    /// Install the edited metadata into the PDF afterwards.
    pub update: bool,
}

/// Runs pdftoc workflows against one metadata tool.
#[derive(Debug, Clone)]
pub struct Workflow {
    tool: MetadataTool,
    reader: FileReader,
    writer: TextWriter,
    formatter: OutputFormatter,
}

impl Workflow {
    /// Create a workflow runner.
    pub fn new(tool: MetadataTool, formatter: OutputFormatter) -> Self {
        Self {
            tool,
            reader: FileReader::new(),
            writer: TextWriter::new(),
            formatter,
        }
    }

    /// Create a workflow runner from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            MetadataTool::new(&config.tool),
            OutputFormatter::from_config(config),
        )
    }

    /// Run the command described by `command`.
    pub async fn execute(&self, command: &Command) -> Result<()> {
        self.formatter
            .debug(&format!("Running {} with '{}'", command.name(), self.tool.program().display()));

        match command {
            Command::Dump { pdf, target } => self.dump(pdf, target).await,
            Command::Update { pdf, metadata } => self.update(pdf, metadata).await,
            Command::Add {
                pdf,
                metadata,
                refresh,
                update,
                bookmark,
            } => {
                let options = AddOptions {
                    refresh: *refresh,
                    update: *update,
                };
                self.add(pdf, metadata, bookmark, options).await
            }
            Command::BatchDump { pdf, toc } => self.batch_dump(pdf, toc).await.map(|_| ()),
            Command::BatchUpdate { pdf, toc, metadata } => {
                self.batch_update(pdf, toc, metadata).await
            }
            Command::Check { toc, json } => self.check(toc, *json).await.map(|_| ()),
        }
    }

    /// Write the full metadata dump of `pdf` to `target`.
    pub async fn dump(&self, pdf: &Path, target: &MetadataTarget) -> Result<()> {
        self.reader.check_pdf(pdf).await?;
        let text = self.tool.dump(pdf).await?;

        match target {
            MetadataTarget::Stdout => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(text.as_bytes()).await?;
                stdout.flush().await?;
            }
            MetadataTarget::File(path) => {
                let stats = self.writer.write_with_stats(path, &text).await?;
                let bookmarks = MetadataDocument::parse(&text).bookmarks().count();

                self.formatter.success(&format!(
                    "Wrote metadata of {} to {} ({bookmarks} bookmarks, {})",
                    pdf.display(),
                    path.display(),
                    stats.format_file_size()
                ));
                if let Some(backup) = &stats.backup_path {
                    self.formatter
                        .detail("Previous version", &backup.display().to_string());
                }
            }
        }

        Ok(())
    }

    /// Install the metadata file `metadata` into `pdf`.
    ///
    /// The metadata must be well formed; a broken stanza is reported before
    /// the PDF is touched.
    pub async fn update(&self, pdf: &Path, metadata: &Path) -> Result<()> {
        self.reader.check_pdf(pdf).await?;

        let text = self.reader.read_text(metadata).await?;
        let bookmarks = MetadataDocument::parse_checked(&text)
            .map_err(|e| e.with_path(metadata))?
            .bookmarks()
            .count();

        self.install(pdf, metadata).await?;
        self.formatter.success(&format!(
            "Updated {} from {} ({bookmarks} bookmarks)",
            pdf.display(),
            metadata.display()
        ));

        Ok(())
    }

    /// Insert `bookmark` into the metadata file of `pdf`.
    ///
    /// The cached metadata file is used when it exists, unless
    /// `options.refresh` asks for a fresh dump.
    pub async fn add(
        &self,
        pdf: &Path,
        metadata: &Path,
        bookmark: &Bookmark,
        options: AddOptions,
    ) -> Result<()> {
        self.reader.check_pdf(pdf).await?;

        let (text, source) = if options.refresh || !self.reader.exists(metadata).await {
            self.formatter
                .debug(&format!("Dumping fresh metadata from {}", pdf.display()));
            (self.tool.dump(pdf).await?, pdf)
        } else {
            self.formatter
                .debug(&format!("Using cached metadata {}", metadata.display()));
            (self.reader.read_text(metadata).await?, metadata)
        };

        match metadata::page_count(&text) {
            Some(pages) if bookmark.page > pages => self.formatter.warning(&format!(
                "Page {} is beyond the last page of {} ({pages} pages)",
                bookmark.page,
                pdf.display()
            )),
            Some(_) => {}
            None => self
                .formatter
                .warning(&format!("{} does not state a page count", source.display())),
        }

        let edited = insert_bookmark(&text, bookmark).map_err(|e| e.with_path(source))?;
        self.writer.write(metadata, &edited).await?;
        self.formatter.success(&format!(
            "Added \"{}\" at page {}, level {} to {}",
            bookmark.title,
            bookmark.page,
            bookmark.level,
            metadata.display()
        ));

        if options.update {
            self.install(pdf, metadata).await?;
            self.formatter.success(&format!("Updated {}", pdf.display()));
        }

        Ok(())
    }

    /// Extract every bookmark of `pdf` into the TOC file `toc`.
    pub async fn batch_dump(&self, pdf: &Path, toc: &Path) -> Result<TocFile> {
        self.reader.check_pdf(pdf).await?;

        let text = self.tool.dump(pdf).await?;
        let toc_file = extract_toc(&text).map_err(|e| e.with_path(pdf))?;

        self.writer.write(toc, &toc_file.render()).await?;
        self.formatter.success(&format!(
            "Wrote {} entries to {}",
            toc_file.len(),
            toc.display()
        ));

        Ok(toc_file)
    }

    /// Replace every bookmark of `pdf` with the entries of `toc`.
    ///
    /// The TOC is validated before the metadata tool runs at all. The
    /// merged dump is saved to `metadata` and then installed.
    pub async fn batch_update(&self, pdf: &Path, toc: &Path, metadata: &Path) -> Result<()> {
        self.reader.check_pdf(pdf).await?;

        let toc_text = self.reader.read_text(toc).await?;
        let toc_file = TocFile::parse(&toc_text).map_err(|e| e.with_path(toc))?;
        self.formatter.debug(&format!(
            "{} is valid ({} entries)",
            toc.display(),
            toc_file.len()
        ));

        let text = self.tool.dump(pdf).await?;
        let merged = merge_toc(&toc_file, &text)?;

        self.writer.write(metadata, &merged).await?;
        self.formatter
            .detail("Merged metadata", &metadata.display().to_string());

        self.install(pdf, metadata).await?;
        self.formatter.success(&format!(
            "Updated {} with {} entries from {}",
            pdf.display(),
            toc_file.len(),
            toc.display()
        ));

        Ok(())
    }

    /// Validate the TOC file `toc` without touching any PDF.
    ///
    /// With `json` the report is printed to stdout in JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`PdfTocError::TocValidation`] if any line is malformed.
    pub async fn check(&self, toc: &Path, json: bool) -> Result<ValidationReport> {
        let text = self.reader.read_text(toc).await?;
        let report = TocValidator::new().validate(&text);

        if json {
            let rendered = serde_json::to_string_pretty(&report)
                .map_err(|e| PdfTocError::other(format!("Failed to render report: {e}")))?;
            let mut stdout = tokio::io::stdout();
            stdout.write_all(rendered.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        } else {
            display_validation_report(&self.formatter, &report);
        }

        report.into_result().map_err(|e| e.with_path(toc))
    }

    /// Have the tool write `<pdf>.tmp` and move it over `pdf`, keeping
    /// `<pdf>.bak`. The PDF is untouched if the tool fails.
    async fn install(&self, pdf: &Path, metadata: &Path) -> Result<()> {
        if let Some(backup) = self.writer.backup(pdf).await? {
            self.formatter
                .detail("Backup", &backup.display().to_string());
        }

        let staged = temp_path(pdf);
        if let Err(e) = self.tool.update(pdf, metadata, &staged).await {
            self.writer.remove_if_exists(&staged).await?;
            return Err(e);
        }

        self.writer.replace(pdf, &staged).await
    }
}

/// Run the configured command.
pub async fn execute(config: &Config) -> Result<()> {
    Workflow::from_config(config).execute(&config.command).await
}
