//! Storage backend trait and implementations.
//!
//! A [`StorageBackend`] is a directory the importer reads from (the memory
//! card) or writes into (the photo library). Operations are synchronous: an
//! import is a single sequential batch and the only other thing it ever waits
//! on is the operator.

mod local;
#[cfg(feature = "mock")]
mod mock;
mod ro;

pub use self::local::LocalBackend;
#[cfg(feature = "mock")]
pub use self::mock::MockBackend;
pub use self::ro::ReadOnlyBackend;
use crate::error::{ErrorKind, Result};
use crate::models::FileInfo;
use std::io::Read;
use std::path::Path;
use time::OffsetDateTime;

pub(crate) type BoxSyncRead = Box<dyn Read + Send + 'static>;

/// Unified interface for storage backends.
///
/// # Path Handling
/// All paths are relative to the backend [`root`](Self::root) and must be
/// validated using [`validate_path`](crate::validate_path) before use.
/// Implementations enforce this validation.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use picport_storage::{StorageBackend, error::Result};
///
/// fn copy_across(from: &dyn StorageBackend, to: &dyn StorageBackend, name: &Path) -> Result<u64> {
///     let source = from.stat(name)?;
///     let mut reader = from.reader(name)?;
///     to.write_new(name, &mut reader, Some(source.modified))
/// }
/// ```
pub trait StorageBackend: Send + Sync {
    /// Name of the backend, used for logging only.
    fn name(&self) -> &str;

    /// Directory all relative paths resolve against.
    fn root(&self) -> &Path;

    /// List the regular files directly inside the root, sorted by path.
    ///
    /// Subdirectories are neither returned nor descended into.
    fn list(&self) -> Result<Vec<FileInfo>>;

    /// Check if a file or directory exists.
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Get file metadata without reading contents.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the file
    /// does not exist.
    fn stat(&self, path: &Path) -> Result<FileInfo>;

    /// Open a file for streaming reads.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the file
    /// does not exist.
    fn reader(&self, path: &Path) -> Result<BoxSyncRead>;

    /// BLAKE3 hash of the file contents, hex encoded.
    fn hash(&self, path: &Path) -> Result<String> {
        let mut reader = self.reader(path)?;
        let mut hasher = blake3::Hasher::new();
        hasher.update_reader(&mut reader).map_err(ErrorKind::Io)?;
        Ok(hasher.finalize().to_string())
    }

    /// Create a directory (and any missing parents). Succeeds if it already
    /// exists.
    fn create_dir(&self, path: &Path) -> Result<()>;

    /// Write a new file from a reader, returning the number of bytes written.
    ///
    /// Never overwrites: returns [`AlreadyExists`](crate::error::ErrorKind::AlreadyExists)
    /// if something is already at `path`. Parent directories are created as
    /// needed. When given, `modified` is carried over to the new file.
    fn write_new(&self, path: &Path, data: &mut dyn Read, modified: Option<OffsetDateTime>) -> Result<u64>;
}
