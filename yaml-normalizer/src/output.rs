//! End-of-run summary formatting for a `BatchReport`.
//!
//! The per-file `[PASSED]`/`[FAILED]` lines are streamed while the batch runs;
//! this module renders the optional summary afterwards, as JSON or plain text.
//! Colors are left to the caller.

use std::io::Write;

use crate::report::{BatchReport, Status};

/// Format a `BatchReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &BatchReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `BatchReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &BatchReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  YAML NORMALIZATION CHECK")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Files checked:  {}", report.files())?;
    writeln!(writer, "  Passed:         {}", report.passed())?;
    writeln!(writer, "  Failed:         {}", report.failed())?;
    writeln!(writer, "  Skipped:        {}", report.skipped())?;
    writeln!(writer)?;

    if !report.issues.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  PATTERN ERRORS")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for issue in &report.issues {
            writeln!(writer, "{}", issue.message)?;
        }
        writeln!(writer)?;
    }

    let not_passed: Vec<_> = report
        .outcomes
        .iter()
        .filter(|o| o.status != Status::Passed)
        .collect();
    if !not_passed.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  FILES NOT NORMALIZED")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for outcome in not_passed {
            let label = match outcome.status {
                Status::Failed => "failed",
                Status::Skipped => "skipped",
                Status::Passed => continue,
            };
            match &outcome.reason {
                Some(reason) => writeln!(writer, "{} ({label}): {reason}", outcome.path.display())?,
                None => writeln!(writer, "{} ({label})", outcome.path.display())?,
            }
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    if report.ok() {
        writeln!(
            writer,
            "\u{2713} All {} files are already normalized",
            report.files()
        )?;
    } else {
        if report.failed() > 0 {
            writeln!(
                writer,
                "\u{2717} {} file(s) need normalization or could not be checked",
                report.failed()
            )?;
        }
        if report.skipped() > 0 {
            writeln!(
                writer,
                "\u{2717} {} file(s) are not YAML and were not checked",
                report.skipped()
            )?;
        }
        if !report.issues.is_empty() {
            writeln!(
                writer,
                "\u{2717} {} pattern(s) could not be expanded",
                report.issues.len()
            )?;
        }
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}
