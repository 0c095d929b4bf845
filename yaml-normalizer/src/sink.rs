//! Line-oriented report output.
//!
//! Status lines (`[PASSED] ...` / `[FAILED] ...`) and warnings are written
//! from many worker threads at once. Each call emits one whole line; lines
//! from different files may appear in any order.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// Destination for per-file report lines.
pub trait ReportSink: Send + Sync {
    /// Write one status line (standard output for the stdio sink).
    fn status(&self, line: &str);

    /// Write one warning line (standard error for the stdio sink).
    fn warning(&self, line: &str);
}

/// Writes status lines to stdout and warnings to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioSink;

impl ReportSink for StdioSink {
    fn status(&self, line: &str) {
        // A closed stdout (e.g. piped into `head`) must not take the batch down.
        let _ = writeln!(std::io::stdout().lock(), "{line}");
    }

    fn warning(&self, line: &str) {
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }
}

/// Collects lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    status: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status lines written so far, in arrival order.
    #[must_use]
    pub fn status_lines(&self) -> Vec<String> {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Warning lines written so far, in arrival order.
    #[must_use]
    pub fn warning_lines(&self) -> Vec<String> {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ReportSink for MemorySink {
    fn status(&self, line: &str) {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_owned());
    }

    fn warning(&self, line: &str) {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_owned());
    }
}
