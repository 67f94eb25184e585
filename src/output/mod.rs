//! Output formatting and display for pdftoc.
//!
//! All user-facing status output goes through [`OutputFormatter`], which
//! honours `--quiet` and `--verbose`.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::validation::ValidationReport;

/// Display the summary line of a TOC validation report.
///
/// Individual diagnostics are carried by the returned error and printed
/// once by the caller, so only counts appear here.
pub fn display_validation_report(formatter: &OutputFormatter, report: &ValidationReport) {
    formatter.detail("Lines checked", &report.lines_checked.to_string());

    if report.is_valid() {
        formatter.success(&format!(
            "{} entries, no problems found",
            report.entries
        ));
    } else {
        formatter.warning(&format!(
            "{} problem(s) in {} line(s)",
            report.diagnostics.len(),
            report.lines_checked
        ));
    }
}
