//! Single-file verification.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::canonical::Canonicalizer;
use crate::config::CheckConfig;
use crate::detect::FormatDetector;
use crate::error::CheckError;
use crate::fs::{read_text_bounded, relative_to};
use crate::report::Outcome;
use crate::sink::ReportSink;

/// Checks one file against its canonical form.
///
/// Shared by reference across worker threads; holds no mutable state.
pub struct Verifier<'a> {
    detector: &'a dyn FormatDetector,
    canonicalizer: &'a dyn Canonicalizer,
    sink: &'a dyn ReportSink,
    max_file_size: u64,
    base_dir: PathBuf,
}

impl<'a> Verifier<'a> {
    #[must_use]
    pub fn new(
        detector: &'a dyn FormatDetector,
        canonicalizer: &'a dyn Canonicalizer,
        sink: &'a dyn ReportSink,
        config: &CheckConfig,
    ) -> Self {
        Self {
            detector,
            canonicalizer,
            sink,
            max_file_size: config.max_file_size,
            base_dir: config.effective_base_dir(),
        }
    }

    /// Check `path` and report the result through the sink.
    ///
    /// Emits exactly one line per call: a status line for files that were
    /// compared, or a warning for files that were skipped or unreadable.
    /// Never fails; errors are captured in the returned outcome.
    #[must_use]
    pub fn verify(&self, path: &Path) -> Outcome {
        let shown = self.display_path(path);

        if !self.detector.detect(path) {
            let reason = format!("not a {} file", self.detector.name());
            self.sink.warning(&format!("{} {reason}", shown.display()));
            debug!(path = %shown.display(), "skipped: {reason}");
            return Outcome::skipped(shown, reason);
        }

        match self.compare(path, &shown) {
            Ok(true) => {
                self.sink
                    .status(&format!("[PASSED] already normalized {}", shown.display()));
                Outcome::passed(shown)
            }
            Ok(false) => {
                self.sink.status(&format!(
                    "[FAILED] normalization suggested for {}",
                    shown.display()
                ));
                Outcome::failed(shown, None)
            }
            Err(e) => {
                let reason = e.to_string();
                self.sink.warning(&format!("[ERROR] {reason}"));
                debug!(kind = ?e.kind(), "{reason}");
                Outcome::failed(shown, Some(reason))
            }
        }
    }

    /// Path as reported: relative to the base directory.
    #[must_use]
    pub fn display_path(&self, path: &Path) -> PathBuf {
        relative_to(path, &self.base_dir)
    }

    fn compare(&self, path: &Path, display: &Path) -> Result<bool, CheckError> {
        let content = read_text_bounded(path, self.max_file_size)
            .map_err(|e| e.with_path(display.to_owned()))?;

        let canonical = self
            .canonicalizer
            .canonicalize(&content)
            .map_err(|message| CheckError::Transform {
                path: display.to_owned(),
                message,
            })?;

        Ok(content == canonical)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::report::Status;
    use crate::sink::MemorySink;

    fn identity(s: &str) -> Result<String, String> {
        Ok(s.to_owned())
    }

    fn trimmed(s: &str) -> Result<String, String> {
        Ok(format!("{}\n", s.trim_end()))
    }

    fn always(_: &Path) -> bool {
        true
    }

    fn never(_: &Path) -> bool {
        false
    }

    fn config_for(tmp: &TempDir) -> CheckConfig {
        CheckConfig {
            base_dir: Some(tmp.path().to_path_buf()),
            ..CheckConfig::default()
        }
    }

    #[test]
    fn test_passed_line_uses_relative_path() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.yml");
        fs::write(&file, "a: 1\n").unwrap();

        let sink = MemorySink::new();
        let cfg = config_for(&tmp);
        let v = Verifier::new(&always, &identity, &sink, &cfg);
        let outcome = v.verify(&file);

        assert_eq!(outcome.status, Status::Passed);
        assert_eq!(outcome.path, PathBuf::from("a.yml"));
        assert_eq!(sink.status_lines(), vec!["[PASSED] already normalized a.yml"]);
        assert!(sink.warning_lines().is_empty());
    }

    #[test]
    fn test_failed_when_content_differs() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("b.yml");
        fs::write(&file, "a: 1\n\n\n").unwrap();

        let sink = MemorySink::new();
        let cfg = config_for(&tmp);
        let v = Verifier::new(&always, &trimmed, &sink, &cfg);
        let outcome = v.verify(&file);

        assert_eq!(outcome.status, Status::Failed);
        assert_eq!(outcome.reason, None);
        assert_eq!(
            sink.status_lines(),
            vec!["[FAILED] normalization suggested for b.yml"]
        );
    }

    #[test]
    fn test_comparison_is_exact() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("c.yml");
        // Trailing space only; the comparison must not ignore it.
        fs::write(&file, "a: 1 \n").unwrap();

        let strip = |s: &str| -> Result<String, String> { Ok(s.replace(" \n", "\n")) };
        let sink = MemorySink::new();
        let cfg = config_for(&tmp);
        let v = Verifier::new(&always, &strip, &sink, &cfg);
        assert_eq!(v.verify(&file).status, Status::Failed);
    }

    #[test]
    fn test_bom_is_ignored_in_comparison() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("bom.yml");
        fs::write(&file, b"\xEF\xBB\xBFa: 1\n").unwrap();

        let sink = MemorySink::new();
        let cfg = config_for(&tmp);
        let v = Verifier::new(&always, &trimmed, &sink, &cfg);
        assert_eq!(v.verify(&file).status, Status::Passed);
    }

    #[test]
    fn test_not_applicable_is_skipped_with_warning() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("notes.txt");
        fs::write(&file, "hello\n").unwrap();

        let sink = MemorySink::new();
        let cfg = config_for(&tmp);
        let v = Verifier::new(&never, &identity, &sink, &cfg);
        let outcome = v.verify(&file);

        assert_eq!(outcome.status, Status::Skipped);
        assert_eq!(outcome.reason.as_deref(), Some("not a supported file"));
        assert!(sink.status_lines().is_empty());
        assert_eq!(sink.warning_lines(), vec!["notes.txt not a supported file"]);
    }

    #[test]
    fn test_transform_failure_is_contained() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("d.yml");
        fs::write(&file, "a: 1\n").unwrap();

        let broken = |_: &str| -> Result<String, String> { Err("boom".to_owned()) };
        let sink = MemorySink::new();
        let cfg = config_for(&tmp);
        let v = Verifier::new(&always, &broken, &sink, &cfg);
        let outcome = v.verify(&file);

        assert_eq!(outcome.status, Status::Failed);
        let reason = outcome.reason.unwrap();
        assert!(reason.contains("d.yml"), "got: {reason}");
        assert!(reason.contains("boom"), "got: {reason}");
        assert_eq!(sink.warning_lines().len(), 1);
        assert!(sink.status_lines().is_empty());
    }

    #[test]
    fn test_read_failure_is_contained() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("gone.yml");

        let sink = MemorySink::new();
        let cfg = config_for(&tmp);
        let v = Verifier::new(&always, &identity, &sink, &cfg);
        let outcome = v.verify(&missing);

        assert_eq!(outcome.status, Status::Failed);
        let reason = outcome.reason.unwrap();
        assert!(reason.starts_with("gone.yml: failed to read file"), "got: {reason}");
    }
}
