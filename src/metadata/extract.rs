//! Projection of a metadata dump onto the one-line-per-entry TOC format.

use super::MetadataDocument;
use crate::error::{Diagnostic, PdfTocError, Result};
use crate::toc::TocFile;

/// Collect every bookmark of a metadata dump into a [`TocFile`].
///
/// Entries keep document order. A stanza with an empty title cannot be
/// expressed as a TOC line and is reported like any other defect.
///
/// # Errors
///
/// Returns [`PdfTocError::MetadataFormat`] listing every malformed stanza
/// if the dump has at least one; no partial TOC is produced.
pub fn extract_toc(text: &str) -> Result<TocFile> {
    let doc = MetadataDocument::parse(text);
    let mut diagnostics = doc.diagnostics().to_vec();

    for stanza in doc.stanzas() {
        if stanza.bookmark.title.trim().is_empty() {
            diagnostics.push(Diagnostic::new(
                stanza.line_number + 1,
                "BookmarkTitle is empty",
            ));
        }
    }

    if !diagnostics.is_empty() {
        diagnostics.sort_by_key(|d| d.line);
        return Err(PdfTocError::MetadataFormat {
            path: None,
            diagnostics,
        });
    }

    Ok(TocFile::new(doc.bookmarks().cloned().collect()))
}
