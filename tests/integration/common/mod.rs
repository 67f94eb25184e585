//! Shared fixtures for the integration tests.
//!
//! A sandbox holds a stand-in PDF and a fake metadata tool. The "PDF" is a
//! `%PDF-1.4` header line followed by plain metadata text; the fake tool
//! dumps everything after the header and "updates" by writing a new header
//! plus the given metadata file. That is enough to drive every workflow
//! end to end without pdftk installed.

use clap::Parser;
use pdftoc::cli::Cli;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Header line of every stand-in PDF.
pub const PDF_HEADER: &str = "%PDF-1.4\n";

/// Metadata of the stand-in PDF, in the layout pdftk dumps.
pub const SAMPLE_METADATA: &str = "\
InfoBegin
InfoKey: Title
InfoValue: Field Guide
PdfID0: 1f2e
NumberOfPages: 20
BookmarkBegin
BookmarkTitle: Preface
BookmarkLevel: 1
BookmarkPageNumber: 1
BookmarkBegin
BookmarkTitle: Birds
BookmarkLevel: 1
BookmarkPageNumber: 5
BookmarkBegin
BookmarkTitle: Owls
BookmarkLevel: 2
BookmarkPageNumber: 9
PageMediaBegin
PageMediaNumber: 1
";

/// TOC file matching [`SAMPLE_METADATA`].
pub const SAMPLE_TOC: &str = "1 1 Preface\n5 1 Birds\n9 2 Owls\n";

const FAKE_TOOL: &str = r#"#!/bin/sh
case "$2" in
  dump_data_utf8) tail -n +2 "$1" ;;
  update_info_utf8) { printf '%%PDF-1.4\n'; cat "$3"; } > "$5" ;;
  *) echo "unknown operation $2" >&2; exit 9 ;;
esac
"#;

/// Temporary directory with a stand-in PDF and a fake metadata tool.
pub struct Sandbox {
    pub dir: TempDir,
    pub pdf: PathBuf,
    pub tool: PathBuf,
}

impl Sandbox {
    /// A sandbox whose PDF carries [`SAMPLE_METADATA`].
    pub fn new() -> Self {
        Self::with_metadata(SAMPLE_METADATA)
    }

    /// A sandbox whose PDF carries `metadata`.
    pub fn with_metadata(metadata: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let pdf = dir.path().join("guide.pdf");
        std::fs::write(&pdf, format!("{PDF_HEADER}{metadata}")).unwrap();

        let sandbox = Self {
            tool: dir.path().join("fake-pdftk"),
            dir,
            pdf,
        };
        sandbox.install_tool(FAKE_TOOL);
        sandbox
    }

    /// Replace the fake tool with `script`.
    pub fn install_tool(&self, script: &str) {
        std::fs::write(&self.tool, script).unwrap();
        std::fs::set_permissions(&self.tool, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Path of `name` inside the sandbox.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Metadata currently stored in the stand-in PDF.
    pub fn pdf_metadata(&self) -> String {
        let contents = read(&self.pdf);
        contents
            .strip_prefix(PDF_HEADER)
            .expect("stand-in PDF lost its header")
            .to_string()
    }

    /// Run pdftoc quietly with `args` against the fake tool.
    pub async fn run(&self, args: &[&str]) -> pdftoc::Result<()> {
        let tool = self.tool.display().to_string();
        let mut argv = vec!["pdftoc", "--quiet", "--tool", tool.as_str()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        pdftoc::run(cli).await
    }

    /// The PDF path as a string argument.
    pub fn pdf_arg(&self) -> String {
        self.pdf.display().to_string()
    }
}

/// Read a file that must exist.
pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}
