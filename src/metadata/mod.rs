//! Parsing of the metadata text dump produced by the external metadata tool.
//!
//! A dump is a sequence of opaque `Key: value` lines with bookmark stanzas
//! interleaved. [`MetadataDocument::parse`] splits it into [`Segment`]s with
//! a small state machine, keeping every opaque line verbatim so a document
//! can be written back without disturbing anything but bookmarks.
//!
//! Malformed stanzas do not stop the scan: each defect is recorded as a
//! [`Diagnostic`] and the offending line is rescanned as ordinary text, so
//! one broken entry never hides the ones after it.

pub mod extract;
pub mod insert;
pub mod merge;

pub use extract::extract_toc;
pub use insert::insert_bookmark;
pub use merge::merge_toc;

use crate::bookmark::{
    BEGIN_MARKER, Bookmark, LEVEL_LABEL, PAGE_COUNT_LABEL, PAGE_LABEL, TITLE_LABEL,
};
use crate::error::{Diagnostic, PdfTocError, Result};
use crate::validation::is_integer;

/// A complete, well-formed bookmark stanza.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stanza<'a> {
    /// Decoded entry.
    pub bookmark: Bookmark,
    /// The four raw lines, as they appeared in the dump.
    pub lines: [&'a str; 4],
    /// Blank separator line that followed the stanza, if any.
    pub separator: Option<&'a str>,
    /// 1-based line number of `BookmarkBegin`.
    pub line_number: usize,
}

impl Stanza<'_> {
    /// Append the stanza's original text to `out`.
    pub fn write_to(&self, out: &mut String) {
        for line in self.lines.iter().chain(self.separator.iter()) {
            out.push_str(line);
            out.push('\n');
        }
    }
}

/// A piece of a metadata dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Any line that is not part of a well-formed stanza.
    Line(&'a str),
    /// A well-formed bookmark stanza.
    Stanza(Stanza<'a>),
}

/// A metadata dump split into opaque lines and bookmark stanzas.
#[derive(Debug, Clone)]
pub struct MetadataDocument<'a> {
    segments: Vec<Segment<'a>>,
    diagnostics: Vec<Diagnostic>,
}

enum State<'a> {
    Outside,
    AfterStanza,
    ExpectTitle {
        start: usize,
        begin: &'a str,
    },
    ExpectLevel {
        start: usize,
        lines: [&'a str; 2],
        title: String,
    },
    ExpectPage {
        start: usize,
        lines: [&'a str; 3],
        title: String,
        level: u32,
    },
}

/// Strip the field label, returning the raw value or `None` if absent.
fn field<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.strip_prefix(label)
}

/// Parse a digits-only number field, or describe what is wrong with it.
fn integer_field(value: &str) -> std::result::Result<u32, &'static str> {
    let value = value.trim();
    if !is_integer(value) {
        return Err("is not an integer");
    }
    value.parse().map_err(|_| "is out of range")
}

struct Scanner<'a> {
    segments: Vec<Segment<'a>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Scanner<'a> {
    fn abandon(&mut self, lines: &[&'a str]) {
        self.segments.extend(lines.iter().copied().map(Segment::Line));
    }

    fn missing(&mut self, number: usize, label: &str) {
        let name = label.trim_end_matches(':');
        self.diagnostics
            .push(Diagnostic::new(number, format!("expected {name}")));
    }

    fn bad_number(&mut self, number: usize, label: &str, problem: &str, value: &str) {
        let name = label.trim_end_matches(':');
        self.diagnostics.push(Diagnostic::new(
            number,
            format!("{name} {problem}: '{}'", value.trim()),
        ));
    }

    /// Feed one line. Returns the next state and whether the line must be
    /// scanned again from that state.
    fn step(&mut self, state: State<'a>, number: usize, line: &'a str) -> (State<'a>, bool) {
        match state {
            State::Outside => {
                if line.trim_end() == BEGIN_MARKER {
                    (
                        State::ExpectTitle {
                            start: number,
                            begin: line,
                        },
                        false,
                    )
                } else {
                    self.segments.push(Segment::Line(line));
                    (State::Outside, false)
                }
            }
            State::AfterStanza => {
                if line.trim().is_empty()
                    && let Some(Segment::Stanza(stanza)) = self.segments.last_mut()
                {
                    stanza.separator = Some(line);
                    return (State::Outside, false);
                }
                (State::Outside, true)
            }
            State::ExpectTitle { start, begin } => match field(line, TITLE_LABEL) {
                Some(value) => {
                    let title = value.strip_prefix(' ').unwrap_or(value).to_string();
                    (
                        State::ExpectLevel {
                            start,
                            lines: [begin, line],
                            title,
                        },
                        false,
                    )
                }
                None => {
                    self.missing(number, TITLE_LABEL);
                    self.abandon(&[begin]);
                    (State::Outside, true)
                }
            },
            State::ExpectLevel {
                start,
                lines,
                title,
            } => match field(line, LEVEL_LABEL) {
                Some(value) => match integer_field(value) {
                    Ok(level) => (
                        State::ExpectPage {
                            start,
                            lines: [lines[0], lines[1], line],
                            title,
                            level,
                        },
                        false,
                    ),
                    Err(problem) => {
                        self.bad_number(number, LEVEL_LABEL, problem, value);
                        self.abandon(&[lines[0], lines[1], line]);
                        (State::Outside, false)
                    }
                },
                None => {
                    self.missing(number, LEVEL_LABEL);
                    self.abandon(&lines);
                    (State::Outside, true)
                }
            },
            State::ExpectPage {
                start,
                lines,
                title,
                level,
            } => match field(line, PAGE_LABEL) {
                Some(value) => match integer_field(value) {
                    Ok(page) => {
                        self.segments.push(Segment::Stanza(Stanza {
                            bookmark: Bookmark { page, level, title },
                            lines: [lines[0], lines[1], lines[2], line],
                            separator: None,
                            line_number: start,
                        }));
                        (State::AfterStanza, false)
                    }
                    Err(problem) => {
                        self.bad_number(number, PAGE_LABEL, problem, value);
                        self.abandon(&[lines[0], lines[1], lines[2], line]);
                        (State::Outside, false)
                    }
                },
                None => {
                    self.missing(number, PAGE_LABEL);
                    self.abandon(&lines);
                    (State::Outside, true)
                }
            },
        }
    }

    fn finish(&mut self, state: State<'a>) {
        let (start, expected, lines): (usize, &str, Vec<&'a str>) = match state {
            State::Outside | State::AfterStanza => return,
            State::ExpectTitle { start, begin } => (start, TITLE_LABEL, vec![begin]),
            State::ExpectLevel { start, lines, .. } => (start, LEVEL_LABEL, lines.to_vec()),
            State::ExpectPage { start, lines, .. } => (start, PAGE_LABEL, lines.to_vec()),
        };
        self.diagnostics.push(Diagnostic::new(
            start,
            format!(
                "bookmark ends early, expected {} before end of input",
                expected.trim_end_matches(':')
            ),
        ));
        self.abandon(&lines);
    }
}

impl<'a> MetadataDocument<'a> {
    /// Split a metadata dump into segments, collecting stanza defects.
    ///
    /// Never fails; check [`diagnostics`](Self::diagnostics) or use
    /// [`into_checked`](Self::into_checked).
    pub fn parse(text: &'a str) -> Self {
        let mut scanner = Scanner {
            segments: Vec::new(),
            diagnostics: Vec::new(),
        };
        let mut state = State::Outside;

        for (index, line) in text.lines().enumerate() {
            let number = index + 1;
            loop {
                let (next, rescan) = scanner.step(state, number, line);
                state = next;
                if !rescan {
                    break;
                }
            }
        }
        scanner.finish(state);

        Self {
            segments: scanner.segments,
            diagnostics: scanner.diagnostics,
        }
    }

    /// Parse and fail with every collected defect if any stanza is malformed.
    ///
    /// # Errors
    ///
    /// Returns [`PdfTocError::MetadataFormat`] listing all diagnostics.
    pub fn parse_checked(text: &'a str) -> Result<Self> {
        Self::parse(text).into_checked()
    }

    /// Turn collected diagnostics into an error.
    pub fn into_checked(self) -> Result<Self> {
        if self.diagnostics.is_empty() {
            Ok(self)
        } else {
            Err(PdfTocError::MetadataFormat {
                path: None,
                diagnostics: self.diagnostics,
            })
        }
    }

    /// All segments in document order.
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Defects found while scanning, in line order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Well-formed stanzas in document order.
    pub fn stanzas(&self) -> impl Iterator<Item = &Stanza<'a>> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Stanza(stanza) => Some(stanza),
            Segment::Line(_) => None,
        })
    }

    /// Bookmarks of all well-formed stanzas in document order.
    pub fn bookmarks(&self) -> impl Iterator<Item = &Bookmark> {
        self.stanzas().map(|stanza| &stanza.bookmark)
    }

    /// Value of the `NumberOfPages:` line, if present and numeric.
    pub fn page_count(&self) -> Option<u32> {
        self.segments.iter().find_map(|segment| match segment {
            Segment::Line(line) => page_count_value(line),
            Segment::Stanza(_) => None,
        })
    }
}

/// Whether `line` is the page-count marker.
pub(crate) fn is_page_count_line(line: &str) -> bool {
    line.starts_with(PAGE_COUNT_LABEL)
}

fn page_count_value(line: &str) -> Option<u32> {
    line.strip_prefix(PAGE_COUNT_LABEL)
        .and_then(|value| value.trim().parse().ok())
}

/// Read the page count straight from a metadata dump.
pub fn page_count(text: &str) -> Option<u32> {
    text.lines().find_map(page_count_value)
}
