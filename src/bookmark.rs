//! The bookmark value type and its four-line stanza encoding.
//!
//! In a metadata dump every bookmark is written as:
//!
//! ```text
//! BookmarkBegin
//! BookmarkTitle: <text>
//! BookmarkLevel: <integer>
//! BookmarkPageNumber: <integer>
//! ```

use std::fmt;

use crate::error::{PdfTocError, Result};

/// Line that opens a bookmark stanza.
pub const BEGIN_MARKER: &str = "BookmarkBegin";

/// Label of the title line.
pub const TITLE_LABEL: &str = "BookmarkTitle:";

/// Label of the nesting level line.
pub const LEVEL_LABEL: &str = "BookmarkLevel:";

/// Label of the target page line.
pub const PAGE_LABEL: &str = "BookmarkPageNumber:";

/// Label of the line holding the total page count.
pub const PAGE_COUNT_LABEL: &str = "NumberOfPages:";

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    /// 1-based page the bookmark points to.
    pub page: u32,
    /// Nesting depth, 1 is top level.
    pub level: u32,
    /// Display text.
    pub title: String,
}

impl Bookmark {
    /// Create a bookmark, rejecting titles that would break the stanza layout.
    ///
    /// # Errors
    ///
    /// Returns [`PdfTocError::InvalidTitle`] if the title contains a line
    /// break or another control character.
    pub fn new(page: u32, level: u32, title: impl Into<String>) -> Result<Self> {
        let title = title.into();
        check_title(&title)?;
        Ok(Self { page, level, title })
    }

    /// Render the four-line stanza, newline-terminated.
    pub fn to_stanza(&self) -> String {
        format!(
            "{BEGIN_MARKER}\n{TITLE_LABEL} {}\n{LEVEL_LABEL} {}\n{PAGE_LABEL} {}\n",
            self.title, self.level, self.page
        )
    }

    /// Render the entry as one TOC file line (without newline).
    pub fn to_toc_line(&self) -> String {
        format!("{} {} {}", self.page, self.level, self.title)
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' (page {}, level {})",
            self.title, self.page, self.level
        )
    }
}

/// Check that a title can sit on a single `BookmarkTitle:` line.
pub fn check_title(title: &str) -> Result<()> {
    if title.contains(['\n', '\r']) {
        return Err(PdfTocError::invalid_title(title, "contains a line break"));
    }
    if title.chars().any(|c| c.is_control() && c != '\t') {
        return Err(PdfTocError::invalid_title(
            title,
            "contains a control character",
        ));
    }
    Ok(())
}

/// Whether a metadata line is one of the four stanza lines.
pub fn is_stanza_line(line: &str) -> bool {
    line.trim_end() == BEGIN_MARKER
        || line.starts_with(TITLE_LABEL)
        || line.starts_with(LEVEL_LABEL)
        || line.starts_with(PAGE_LABEL)
}
