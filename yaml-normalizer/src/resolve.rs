//! Glob pattern expansion.
//!
//! Turns the caller's patterns into one sorted, deduplicated [`FileSet`].
//! Expansion is independent per pattern; the result does not depend on pattern
//! order or on the order in which the OS lists directories.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{CheckError, ErrorKind};

/// The files selected for one check run.
///
/// Sorted by path string, no duplicates. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet(Vec<PathBuf>);

impl FileSet {
    /// Build a file set from arbitrary paths, sorting and deduplicating them.
    ///
    /// Paths are compared by component, so `dir//a.yml` and `dir/./a.yml`
    /// collapse into `dir/a.yml`.
    #[must_use]
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        let mut paths: Vec<PathBuf> = paths
            .into_iter()
            .map(|p| p.components().collect())
            .collect();
        paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        paths.dedup();
        Self(paths)
    }

    /// Number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no file was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the files in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.0.iter()
    }

    /// The files as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A problem found while expanding patterns.
///
/// Issues never stop resolution; they are reported and make the run fail.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ResolutionIssue {
    /// The pattern being expanded.
    pub pattern: String,
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
}

impl ResolutionIssue {
    fn from_error(pattern: &str, err: &CheckError) -> Self {
        Self {
            pattern: pattern.to_owned(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Output of [`resolve`].
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct Resolution {
    /// Files matched by at least one pattern.
    pub files: FileSet,
    /// Malformed patterns and unreadable entries met along the way.
    pub issues: Vec<ResolutionIssue>,
}

/// Expand glob patterns into a [`FileSet`].
///
/// Relative patterns are matched against the current working directory.
/// A pattern that matches nothing contributes nothing. Directories matched by a
/// pattern are left out; only non-directory entries are candidates.
pub fn resolve<S: AsRef<str>>(patterns: &[S]) -> Resolution {
    let mut matched = Vec::new();
    let mut issues = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let before = matched.len();
        expand_pattern(pattern, &mut matched, &mut issues);
        debug!(pattern, matches = matched.len() - before, "expanded pattern");
    }

    let files = FileSet::from_paths(matched);
    debug!(files = files.len(), "resolved file set");
    Resolution { files, issues }
}

fn expand_pattern(pattern: &str, matched: &mut Vec<PathBuf>, issues: &mut Vec<ResolutionIssue>) {
    let paths = match glob::glob(pattern) {
        Ok(paths) => paths,
        Err(e) => {
            let err = CheckError::Pattern {
                pattern: pattern.to_owned(),
                message: e.msg.to_owned(),
            };
            debug!("{err}");
            issues.push(ResolutionIssue::from_error(pattern, &err));
            return;
        }
    };

    for entry in paths {
        match entry {
            Ok(path) => {
                if !is_directory(&path) {
                    matched.push(path);
                }
            }
            Err(e) => {
                let err = CheckError::Walk {
                    path: e.path().to_path_buf(),
                    message: e.error().to_string(),
                };
                debug!("{err}");
                issues.push(ResolutionIssue::from_error(pattern, &err));
            }
        }
    }
}

fn is_directory(path: &Path) -> bool {
    path.metadata().is_ok_and(|m| m.is_dir())
}
