//! Batch orchestration: resolve, fan out, collect, reduce.
//!
//! Every resolved file gets one slot in the outcome vector. Files are checked
//! on a bounded rayon pool; `collect` on the indexed parallel iterator fills
//! slot `i` with the outcome of file `i`, so nothing is lost or duplicated and
//! the report order matches the file set even though checks finish in any
//! order. A panic inside one check is caught at the task boundary and turned
//! into a failed outcome for that file.
//!
//! Catching a panic does not silence the process panic hook: the hook still
//! runs and, by default, prints the panic to stderr before the `[ERROR]` line.
//! The hook is process-global, so installing a quieter one is left to the
//! binary embedding the runner.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::canonical::Canonicalizer;
use crate::config::CheckConfig;
use crate::detect::FormatDetector;
use crate::error::CheckError;
use crate::report::{BatchReport, Outcome};
use crate::resolve::{FileSet, Resolution, resolve};
use crate::sink::ReportSink;
use crate::verify::Verifier;

/// Runs a normalization check over every file matched by a set of patterns.
pub struct BatchRunner<'a> {
    detector: &'a dyn FormatDetector,
    canonicalizer: &'a dyn Canonicalizer,
    sink: &'a dyn ReportSink,
    config: CheckConfig,
}

impl<'a> BatchRunner<'a> {
    #[must_use]
    pub fn new(
        detector: &'a dyn FormatDetector,
        canonicalizer: &'a dyn Canonicalizer,
        sink: &'a dyn ReportSink,
        config: CheckConfig,
    ) -> Self {
        Self {
            detector,
            canonicalizer,
            sink,
            config,
        }
    }

    /// Check all files matched by `patterns`.
    ///
    /// Returns `true` iff every matched file is already in canonical form.
    /// Zero matched files is vacuously `true`.
    #[must_use]
    pub fn run<S: AsRef<str>>(&self, patterns: &[S]) -> bool {
        self.run_report(patterns).ok()
    }

    /// Like [`run`](Self::run), returning the full report.
    #[must_use]
    pub fn run_report<S: AsRef<str>>(&self, patterns: &[S]) -> BatchReport {
        let Resolution { files, issues } = resolve(patterns);
        for issue in &issues {
            self.sink.warning(&issue.message);
        }

        let outcomes = self.verify_all(&files);
        debug_assert_eq!(outcomes.len(), files.len());

        let report = BatchReport { outcomes, issues };
        info!(
            files = report.files(),
            passed = report.passed(),
            failed = report.failed(),
            skipped = report.skipped(),
            issues = report.issues.len(),
            ok = report.ok(),
            "normalization check finished"
        );
        report
    }

    /// Verify every file in `files`, returning outcomes in file-set order.
    #[must_use]
    pub fn verify_all(&self, files: &FileSet) -> Vec<Outcome> {
        if files.is_empty() {
            return Vec::new();
        }

        let verifier = Verifier::new(self.detector, self.canonicalizer, self.sink, &self.config);
        let jobs = self.config.effective_jobs().min(files.len());
        debug!(files = files.len(), jobs, "checking files");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .thread_name(|i| format!("yaml-check-{i}"))
            .build();

        match pool {
            Ok(pool) => pool.install(|| {
                files
                    .as_slice()
                    .par_iter()
                    .map(|path| self.verify_contained(&verifier, path))
                    .collect()
            }),
            Err(e) => {
                warn!("cannot start worker pool ({e}); checking files sequentially");
                files
                    .iter()
                    .map(|path| self.verify_contained(&verifier, path))
                    .collect()
            }
        }
    }

    fn verify_contained(&self, verifier: &Verifier<'_>, path: &Path) -> Outcome {
        match catch_unwind(AssertUnwindSafe(|| verifier.verify(path))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                let shown = verifier.display_path(path);
                let err = CheckError::Panicked {
                    path: shown.clone(),
                    message: panic_message(payload.as_ref()),
                };
                let reason = err.to_string();
                self.sink.warning(&format!("[ERROR] {reason}"));
                Outcome::failed(shown, Some(reason))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
