//! The TOC file: one bookmark per line as `PAGE LEVEL DESCRIPTION`.
//!
//! Everything after the second field is the description; on parsing,
//! its words are joined back with single spaces.

use crate::bookmark::Bookmark;
use crate::error::Result;
use crate::validation::TocValidator;

/// An ordered list of bookmarks in TOC file form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocFile {
    entries: Vec<Bookmark>,
}

impl TocFile {
    /// Wrap bookmarks in their given order.
    pub fn new(entries: Vec<Bookmark>) -> Self {
        Self { entries }
    }

    /// Parse a TOC file, validating every line first.
    ///
    /// Blank lines are skipped; entry order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`PdfTocError::TocValidation`](crate::PdfTocError::TocValidation)
    /// listing every malformed line.
    pub fn parse(text: &str) -> Result<Self> {
        TocValidator::new().validate(text).into_result()?;

        let entries = text
            .lines()
            .filter_map(|line| {
                let mut fields = line.split_whitespace();
                let page = fields.next()?.parse().ok()?;
                let level = fields.next()?.parse().ok()?;
                let title = fields.collect::<Vec<_>>().join(" ");
                Some(Bookmark { page, level, title })
            })
            .collect();

        Ok(Self { entries })
    }

    /// Entries in file order.
    pub fn entries(&self) -> &[Bookmark] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render one line per entry, newline-terminated.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.to_toc_line() + "\n")
            .collect()
    }
}
