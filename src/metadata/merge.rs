//! Replacement of every bookmark in a metadata dump by the entries of a TOC file.

use super::is_page_count_line;
use crate::bookmark::{PAGE_LABEL, is_stanza_line};
use crate::error::{PdfTocError, Result};
use crate::toc::TocFile;

/// Drop all bookmark stanzas from `text` and write one stanza per TOC
/// entry right after the `NumberOfPages:` line.
///
/// New stanzas appear in TOC order, not sorted by page. Every line that
/// belongs to an old stanza is dropped, including stray lines of broken
/// stanzas and the blank separator after a stanza; all other lines are
/// copied through unchanged.
///
/// # Errors
///
/// Returns [`PdfTocError::MissingPageCount`] if the dump has no
/// `NumberOfPages:` line, since there would be nowhere to put the entries.
pub fn merge_toc(toc: &TocFile, text: &str) -> Result<String> {
    let stanzas: String = toc.entries().iter().map(|b| b.to_stanza()).collect();

    let mut out = String::with_capacity(text.len() + stanzas.len());
    let mut anchored = false;
    let mut after_stanza = false;

    for line in text.lines() {
        if after_stanza && line.trim().is_empty() {
            after_stanza = false;
            continue;
        }
        after_stanza = false;

        if is_stanza_line(line) {
            after_stanza = line.starts_with(PAGE_LABEL);
            continue;
        }

        out.push_str(line);
        out.push('\n');

        if !anchored && is_page_count_line(line) {
            out.push_str(&stanzas);
            anchored = true;
        }
    }

    if !anchored {
        return Err(PdfTocError::MissingPageCount);
    }

    Ok(out)
}
