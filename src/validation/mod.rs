//! Validation of TOC files.
//!
//! A TOC line must read `PAGE LEVEL DESCRIPTION...`: at least three
//! whitespace-separated fields, the first two made of ASCII digits only
//! and at least 1.
//! Blank lines are ignored. Validation never stops at the first problem;
//! every offending line is reported.
//!
//! # Examples
//!
//! ```
//! use pdftoc::validation::TocValidator;
//!
//! let report = TocValidator::new().validate("12 1 Chapter One\nabc 1 Title\n");
//! assert!(!report.is_valid());
//! assert_eq!(report.diagnostics[0].line, 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Diagnostic, PdfTocError, Result};

/// Outcome of validating a whole TOC file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Number of lines read, blank ones included.
    pub lines_checked: usize,

    /// Number of well-formed entries.
    pub entries: usize,

    /// One diagnostic per violation, in line order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Whether no violation was found.
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Convert the report into an error if any violation was found.
    ///
    /// # Errors
    ///
    /// Returns [`PdfTocError::TocValidation`] carrying every diagnostic.
    pub fn into_result(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(PdfTocError::TocValidation {
                path: None,
                diagnostics: self.diagnostics,
            })
        }
    }
}

/// Checks TOC files line by line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TocValidator;

impl TocValidator {
    /// Create a validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate every line of a TOC file.
    pub fn validate(&self, text: &str) -> ValidationReport {
        let mut report = ValidationReport::default();

        for (index, line) in text.lines().enumerate() {
            report.lines_checked += 1;
            if line.trim().is_empty() {
                continue;
            }

            let found = check_line(index + 1, line);
            if found.is_empty() {
                report.entries += 1;
            }
            report.diagnostics.extend(found);
        }

        report
    }
}

/// Whether `field` is a plain run of ASCII digits (no sign).
pub(crate) fn is_integer(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}

fn check_number(line: usize, field: &str, what: &str, found: &mut Vec<Diagnostic>) {
    if !is_integer(field) {
        found.push(Diagnostic::new(
            line,
            format!("non-integer {what} number: '{field}'"),
        ));
    } else {
        match field.parse::<u32>() {
            Err(_) => found.push(Diagnostic::new(
                line,
                format!("{what} number out of range: '{field}'"),
            )),
            Ok(0) => found.push(Diagnostic::new(
                line,
                format!("{what} number must be at least 1: '{field}'"),
            )),
            Ok(_) => {}
        }
    }
}

/// Diagnostics for one non-blank line.
fn check_line(number: usize, line: &str) -> Vec<Diagnostic> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return vec![Diagnostic::new(
            number,
            format!("too few fields (found {}, need PAGE LEVEL DESCRIPTION)", fields.len()),
        )];
    }

    let mut found = Vec::new();
    check_number(number, fields[0], "page", &mut found);
    check_number(number, fields[1], "level", &mut found);

    if fields[2..]
        .iter()
        .any(|field| field.chars().any(char::is_control))
    {
        found.push(Diagnostic::new(
            number,
            "description contains a control character",
        ));
    }

    found
}
