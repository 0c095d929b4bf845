//! Filesystem helpers shared by detection and verification.
//!
//! Reads are bounded: at most `max_file_size + 1` bytes are pulled from the
//! handle, so the size check and the read are the same operation.

use std::io::Read;
use std::path::{Component, Path, PathBuf};

use crate::error::CheckError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read a file as UTF-8 text, dropping a leading byte-order mark.
///
/// Fails if the file cannot be opened or read, is larger than
/// `max_file_size`, or is not valid UTF-8.
pub fn read_text_bounded(path: &Path, max_file_size: u64) -> Result<String, CheckError> {
    let io_err = |source| CheckError::Io {
        path: path.to_owned(),
        source,
    };

    let file = std::fs::File::open(path).map_err(io_err)?;

    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(io_err)?;

    if buffer.len() as u64 > max_file_size {
        return Err(CheckError::FileTooLarge {
            path: path.to_owned(),
            limit: max_file_size,
        });
    }

    if buffer.starts_with(UTF8_BOM) {
        buffer.drain(..UTF8_BOM.len());
    }

    String::from_utf8(buffer).map_err(|_| CheckError::InvalidEncoding {
        path: path.to_owned(),
    })
}

/// Express `path` relative to `base`.
///
/// Relative paths are interpreted against `base` first. When the two share no
/// common root (e.g. different drive prefixes) the path is returned unchanged.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        lexical_clean(path)
    } else {
        lexical_clean(&base.join(path))
    };
    let base = lexical_clean(base);

    let mut target = absolute.components().peekable();
    let mut anchor = base.components().peekable();

    match (target.peek(), anchor.peek()) {
        (Some(Component::Prefix(a)), Some(Component::Prefix(b))) if a != b => {
            return path.to_path_buf();
        }
        _ => {}
    }

    while let (Some(a), Some(b)) = (target.peek(), anchor.peek()) {
        if a != b {
            break;
        }
        target.next();
        anchor.next();
    }

    let mut rel = PathBuf::new();
    for _ in anchor {
        rel.push("..");
    }
    rel.extend(target);

    if rel.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        rel
    }
}

/// Remove `.` components and fold `..` into its parent without touching disk.
fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}
