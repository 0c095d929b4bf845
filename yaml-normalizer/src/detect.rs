//! Format detection.
//!
//! A [`FormatDetector`] decides whether a resolved path is a document the
//! canonicalizer understands. Files it rejects are skipped with a warning and
//! make the overall check fail.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::canonical::parse_stream;
use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::fs::read_text_bounded;

/// Decides whether a file is of the expected document type.
///
/// Must not modify the filesystem and must not panic for a readable path.
pub trait FormatDetector: Sync {
    /// Whether `path` is a document of this format.
    fn detect(&self, path: &Path) -> bool;

    /// Format label used in `<path> not a <name> file` warnings.
    fn name(&self) -> &str {
        "supported"
    }
}

impl<F> FormatDetector for F
where
    F: Fn(&Path) -> bool + Sync,
{
    fn detect(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Detects YAML documents by content, not by extension.
///
/// A regular file qualifies when it parses as a YAML stream containing at
/// least one mapping or sequence document. A file holding only scalars
/// (`hello`) does not qualify. A file that cannot be read (I/O error, over
/// the size limit, not UTF-8) is not rejected: it is passed on so the read
/// failure is reported as such instead of as a format mismatch.
#[derive(Debug, Clone, Copy)]
pub struct YamlDetector {
    max_file_size: u64,
}

impl YamlDetector {
    /// Detector that refuses to read files larger than `max_file_size`.
    #[must_use]
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }
}

impl Default for YamlDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE)
    }
}

impl FormatDetector for YamlDetector {
    fn detect(&self, path: &Path) -> bool {
        // Only a path that exists and is not a regular file is rejected here.
        // Unreadable, oversized or non-UTF-8 files are accepted so the
        // verifier reports them as read failures with their cause.
        if path.metadata().is_ok_and(|m| !m.is_file()) {
            return false;
        }
        let content = match read_text_bounded(path, self.max_file_size) {
            Ok(c) => c,
            Err(e) => {
                debug!("deferring read failure to verification: {e}");
                return true;
            }
        };
        match parse_stream(&content) {
            Ok(docs) => docs
                .iter()
                .any(|d| matches!(d, Value::Object(_) | Value::Array(_))),
            Err(e) => {
                debug!(path = %path.display(), "not parseable as YAML: {e}");
                false
            }
        }
    }

    fn name(&self) -> &str {
        "YAML"
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn detect(content: &str) -> bool {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("doc.yml");
        fs::write(&file, content).unwrap();
        YamlDetector::default().detect(&file)
    }

    #[test]
    fn test_mapping_is_yaml() {
        assert!(detect("key: value\n"));
    }

    #[test]
    fn test_sequence_is_yaml() {
        assert!(detect("- a\n- b\n"));
    }

    #[test]
    fn test_scalar_is_not_yaml() {
        assert!(!detect("just some text\n"));
    }

    #[test]
    fn test_malformed_is_not_yaml() {
        assert!(!detect("key: [unclosed\n"));
    }

    #[test]
    fn test_directory_is_not_yaml() {
        let tmp = TempDir::new().unwrap();
        assert!(!YamlDetector::default().detect(tmp.path()));
    }

    #[test]
    fn test_unreadable_content_is_left_to_verification() {
        let tmp = TempDir::new().unwrap();
        let bad = tmp.path().join("bad.yml");
        fs::write(&bad, [0xff, 0xfe, 0xfd]).unwrap();
        assert!(YamlDetector::default().detect(&bad));

        let big = tmp.path().join("big.yml");
        fs::write(&big, "key: some value\n").unwrap();
        assert!(YamlDetector::new(4).detect(&big));

        assert!(YamlDetector::default().detect(&tmp.path().join("missing.yml")));
    }

    #[test]
    fn test_extension_is_irrelevant() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("settings.conf");
        fs::write(&file, "a: 1\n").unwrap();
        assert!(YamlDetector::default().detect(&file));
    }

    #[test]
    fn test_closure_detector_label() {
        let by_ext = |p: &Path| p.extension().is_some_and(|e| e == "yml");
        assert!(by_ext.detect(Path::new("a.yml")));
        assert!(!by_ext.detect(Path::new("a.txt")));
        assert_eq!(by_ext.name(), "supported");
        assert_eq!(YamlDetector::default().name(), "YAML");
    }
}
