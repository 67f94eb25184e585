//! Insertion of a single bookmark into an existing metadata dump.

use super::{MetadataDocument, Segment, is_page_count_line};
use crate::bookmark::Bookmark;
use crate::error::{PdfTocError, Result};

/// Where the new stanza goes, as an index into the segment list.
fn insertion_point(doc: &MetadataDocument<'_>, page: u32) -> Result<usize> {
    let segments = doc.segments();

    // Before the first stanza for a later page.
    let later = segments.iter().position(|segment| {
        matches!(segment, Segment::Stanza(stanza) if stanza.bookmark.page > page)
    });
    if let Some(index) = later {
        return Ok(index);
    }

    // After the last stanza.
    let last = segments
        .iter()
        .rposition(|segment| matches!(segment, Segment::Stanza(_)));
    if let Some(index) = last {
        return Ok(index + 1);
    }

    // No bookmarks yet: right after the page count.
    segments
        .iter()
        .position(|segment| matches!(segment, Segment::Line(line) if is_page_count_line(line)))
        .map(|index| index + 1)
        .ok_or(PdfTocError::MissingPageCount)
}

/// Insert `bookmark` as a new stanza, keeping page order.
///
/// The stanza lands after every existing entry whose page is less than or
/// equal to `bookmark.page` and before the first entry for a later page.
/// When no entry has a later page it follows the last stanza, and in a
/// dump without bookmarks it follows the `NumberOfPages:` line. Everything
/// else is copied through unchanged and the stanza is written exactly once.
///
/// # Errors
///
/// - [`PdfTocError::MetadataFormat`] if the dump has malformed stanzas,
///   since page order cannot be trusted then.
/// - [`PdfTocError::MissingPageCount`] if the dump has neither bookmarks
///   nor a page-count line to anchor the new entry.
pub fn insert_bookmark(text: &str, bookmark: &Bookmark) -> Result<String> {
    let doc = MetadataDocument::parse_checked(text)?;
    let at = insertion_point(&doc, bookmark.page)?;

    let mut out = String::with_capacity(text.len() + 96);
    for (index, segment) in doc.segments().iter().enumerate() {
        if index == at {
            out.push_str(&bookmark.to_stanza());
        }
        match segment {
            Segment::Line(line) => {
                out.push_str(line);
                out.push('\n');
            }
            Segment::Stanza(stanza) => stanza.write_to(&mut out),
        }
    }
    if at == doc.segments().len() {
        out.push_str(&bookmark.to_stanza());
    }

    Ok(out)
}
