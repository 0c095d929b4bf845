//! Per-file outcomes and the batch report.

use std::path::PathBuf;

use serde::Serialize;

use crate::resolve::ResolutionIssue;

/// Verification status of one file.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Content already equals its canonical form.
    Passed,
    /// Content differs from its canonical form, or could not be checked.
    Failed,
    /// The file is not of the expected format and was not checked.
    Skipped,
}

/// The result of checking one file. Created once, never mutated.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct Outcome {
    /// The file, relative to the base directory when it was read.
    pub path: PathBuf,
    /// Pass, fail or skip.
    pub status: Status,
    /// Why the file was skipped or could not be checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Outcome {
    #[must_use]
    pub fn passed(path: PathBuf) -> Self {
        Self {
            path,
            status: Status::Passed,
            reason: None,
        }
    }

    #[must_use]
    pub fn failed(path: PathBuf, reason: Option<String>) -> Self {
        Self {
            path,
            status: Status::Failed,
            reason,
        }
    }

    #[must_use]
    pub fn skipped(path: PathBuf, reason: String) -> Self {
        Self {
            path,
            status: Status::Skipped,
            reason: Some(reason),
        }
    }

    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.status == Status::Passed
    }
}

/// Result of a batch run.
///
/// `outcomes` holds exactly one entry per resolved file, in file-set order.
#[derive(Debug, Clone, Default, Serialize)]
#[non_exhaustive]
pub struct BatchReport {
    /// One outcome per resolved file.
    pub outcomes: Vec<Outcome>,
    /// Problems met while expanding patterns.
    pub issues: Vec<ResolutionIssue>,
}

impl BatchReport {
    /// True iff every outcome passed and every pattern expanded cleanly.
    ///
    /// An empty run is vacuously ok. Skipped files count as not passing.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.issues.is_empty() && self.outcomes.iter().all(Outcome::is_passed)
    }

    /// Number of files checked in total.
    #[must_use]
    pub fn files(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(Status::Passed)
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(Status::Failed)
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(Status::Skipped)
    }

    fn count(&self, status: Status) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}
