//! # yaml-normalizer
//!
//! Checks whether YAML files are already written in their normalized form.
//!
//! A run expands glob patterns into a sorted, deduplicated [`FileSet`], checks
//! every file concurrently, and reduces the per-file [`Outcome`]s to a single
//! boolean: `true` iff every file passed. Files that are not YAML are skipped
//! with a warning and make the run fail.
//!
//! The check is generic over two collaborators: a [`FormatDetector`] deciding
//! whether a file is a document at all, and a [`Canonicalizer`] producing the
//! canonical text. [`YamlDetector`] and [`YamlCanonicalizer`] are the defaults.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yaml_normalizer::{
//!     BatchRunner, CheckConfig, StdioSink, YamlCanonicalizer, YamlDetector,
//! };
//!
//! let mut config = CheckConfig::default();
//! config.jobs = Some(4);
//!
//! let detector = YamlDetector::new(config.max_file_size);
//! let runner = BatchRunner::new(&detector, &YamlCanonicalizer, &StdioSink, config);
//!
//! let report = runner.run_report(&["config/**/*.yml"]);
//! println!("Files checked: {}", report.files());
//! println!("OK: {}", report.ok());
//! ```

mod batch;
mod canonical;
mod config;
mod detect;
mod error;
mod fs;
pub mod output;
mod report;
mod resolve;
mod sink;
mod verify;

pub use batch::BatchRunner;
pub use canonical::{Canonicalizer, YamlCanonicalizer, parse_stream};
pub use config::{CheckConfig, DEFAULT_MAX_FILE_SIZE};
pub use detect::{FormatDetector, YamlDetector};
pub use error::{CheckError, ErrorKind};
pub use report::{BatchReport, Outcome, Status};
pub use resolve::{FileSet, Resolution, ResolutionIssue, resolve};
pub use sink::{MemorySink, ReportSink, StdioSink};
pub use verify::Verifier;

/// Check YAML files matched by `patterns` with the default configuration.
///
/// Status lines go to stdout, warnings to stderr. Returns `true` iff every
/// matched file is YAML and already normalized.
#[must_use]
pub fn check<S: AsRef<str>>(patterns: &[S]) -> bool {
    let config = CheckConfig::default();
    let detector = YamlDetector::new(config.max_file_size);
    BatchRunner::new(&detector, &YamlCanonicalizer, &StdioSink, config).run(patterns)
}
