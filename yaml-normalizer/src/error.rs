//! Error types for normalization checks.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// The kind of failure that prevented a file (or pattern) from being checked.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An I/O error occurred while reading the file.
    IoError,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// The canonicalizer rejected the content.
    TransformError,
    /// A glob pattern could not be parsed.
    InvalidPattern,
    /// A directory could not be read while expanding a pattern.
    WalkError,
    /// The check for this file panicked.
    Panicked,
}

/// An error raised while checking a single file or expanding a pattern.
///
/// None of these abort a batch. Per-file errors become failed outcomes;
/// pattern errors become resolution issues. Both force the aggregate to `false`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CheckError {
    /// Opening or reading the file failed.
    #[error("{}: failed to read file: {source}", path.display())]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is larger than `CheckConfig::max_file_size`.
    #[error("{}: file exceeds maximum size of {limit} bytes", path.display())]
    FileTooLarge {
        /// The oversized file.
        path: PathBuf,
        /// The configured limit in bytes.
        limit: u64,
    },

    /// The file is not valid UTF-8.
    #[error("{}: file is not valid UTF-8", path.display())]
    InvalidEncoding {
        /// The file with the bad encoding.
        path: PathBuf,
    },

    /// The canonicalizer failed on otherwise readable content.
    #[error("{}: normalization failed: {message}", path.display())]
    Transform {
        /// The file whose content could not be normalized.
        path: PathBuf,
        /// Message reported by the canonicalizer.
        message: String,
    },

    /// A glob pattern is syntactically invalid.
    #[error("invalid glob pattern '{pattern}': {message}")]
    Pattern {
        /// The pattern as supplied by the caller.
        pattern: String,
        /// Parser message.
        message: String,
    },

    /// A directory entry could not be read while expanding a pattern.
    #[error("{}: {message}", path.display())]
    Walk {
        /// The path that could not be read.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// The check panicked; the panic was contained to this file.
    #[error("{}: check panicked: {message}", path.display())]
    Panicked {
        /// The file being checked.
        path: PathBuf,
        /// Panic payload, if it was a string.
        message: String,
    },
}

impl CheckError {
    /// Replace the path carried by a per-file error.
    ///
    /// Used to report errors under the same relative path as status lines.
    /// Pattern errors carry no path and are returned unchanged.
    #[must_use]
    pub fn with_path(self, path: PathBuf) -> Self {
        match self {
            Self::Io { source, .. } => Self::Io { path, source },
            Self::FileTooLarge { limit, .. } => Self::FileTooLarge { path, limit },
            Self::InvalidEncoding { .. } => Self::InvalidEncoding { path },
            Self::Transform { message, .. } => Self::Transform { path, message },
            Self::Walk { message, .. } => Self::Walk { path, message },
            Self::Panicked { message, .. } => Self::Panicked { path, message },
            pattern @ Self::Pattern { .. } => pattern,
        }
    }

    /// Classify the error for reports.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::IoError,
            Self::FileTooLarge { .. } => ErrorKind::FileTooLarge,
            Self::InvalidEncoding { .. } => ErrorKind::InvalidEncoding,
            Self::Transform { .. } => ErrorKind::TransformError,
            Self::Pattern { .. } => ErrorKind::InvalidPattern,
            Self::Walk { .. } => ErrorKind::WalkError,
            Self::Panicked { .. } => ErrorKind::Panicked,
        }
    }
}
