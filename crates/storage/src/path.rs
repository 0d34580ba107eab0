//! Path validation for paths relative to a backend root.

use crate::error::{ErrorKind, Result};
use std::path::{Component, Path, PathBuf};

/// Validates and normalizes a path relative to a backend root.
///
/// Current-directory components, duplicate and trailing separators are
/// dropped; `..` is resolved but may never climb above the root. Absolute
/// paths are treated as relative to the root. Empty results and NUL bytes are
/// rejected with [`InvalidPath`](crate::error::ErrorKind::InvalidPath).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use picport_storage::validate_path;
///
/// assert_eq!(
///     validate_path("24-01-15-Trip_2024//z3d00001.jpg").unwrap(),
///     Path::new("24-01-15-Trip_2024/z3d00001.jpg"),
/// );
/// assert!(validate_path("../outside.jpg").is_err());
/// assert!(validate_path("./").is_err());
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let original = path.as_ref();
    let invalid = || ErrorKind::InvalidPath(original.to_path_buf());
    let mut normalized: Vec<&std::ffi::OsStr> = Vec::new();
    for component in original.components() {
        match component {
            Component::Normal(segment) if segment.as_encoded_bytes().contains(&0) => exn::bail!(invalid()),
            Component::Normal(segment) => normalized.push(segment),
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(invalid()),
            Component::ParentDir => {
                if normalized.pop().is_none() {
                    exn::bail!(invalid());
                }
            },
        }
    }
    if normalized.is_empty() {
        exn::bail!(invalid());
    }
    Ok(normalized.into_iter().collect())
}
