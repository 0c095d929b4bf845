//! Configuration for a check run.
//!
//! Everything here is optional: `CheckConfig::default()` checks with one
//! worker per available CPU, a 10 MB per-file read limit, and paths reported
//! relative to the process working directory.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Default per-file read limit (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10_485_760;

/// Options shared by the resolver, the verifier and the batch runner.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct CheckConfig {
    /// Maximum number of files verified at the same time.
    ///
    /// `None` (or `Some(0)`) uses the available parallelism of the host.
    /// Bounding this keeps very large file sets from exhausting threads or
    /// file descriptors.
    pub jobs: Option<usize>,
    /// Maximum file size in bytes. Larger files are reported as failures.
    pub max_file_size: u64,
    /// Directory that reported paths are made relative to.
    /// Defaults to the current working directory at the time of the check.
    pub base_dir: Option<PathBuf>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            jobs: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            base_dir: None,
        }
    }
}

impl CheckConfig {
    /// Number of worker threads to use for a batch.
    #[must_use]
    pub fn effective_jobs(&self) -> usize {
        match self.jobs {
            Some(n) if n > 0 => n,
            _ => std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
        }
    }

    /// Directory used as the anchor for relative path reporting.
    ///
    /// Falls back to `.` if the working directory cannot be determined.
    #[must_use]
    pub fn effective_base_dir(&self) -> PathBuf {
        self.base_dir.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf())
        })
    }
}
