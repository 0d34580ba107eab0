//! Local filesystem storage backend.

use crate::backend::BoxSyncRead;
use crate::error::ErrorKind;
use crate::{FileInfo, StorageBackend, error::Result, path::validate as validate_path};
use exn::ResultExt;
use std::fs::{self, File, Metadata, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use time::OffsetDateTime;

/// Local filesystem storage backend.
///
/// Rooted at an existing directory; all paths are relative to it.
///
/// # Examples
///
/// ```no_run
/// use picport_storage::backend::LocalBackend;
///
/// # fn example() -> picport_storage::error::Result<()> {
/// let card = LocalBackend::open("origin", "/media/sdcard/DCIM/100NIKON")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct LocalBackend {
    name: String,
    /// Canonical root directory
    root: PathBuf,
}
impl LocalBackend {
    /// Open a backend rooted at an existing directory.
    ///
    /// The path is canonicalized, so relative paths (such as the default `.`
    /// origin) and duplicate separators are resolved once, up front.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDirectory`](ErrorKind::InvalidDirectory) carrying the
    /// requested path if it does not exist or is not a directory.
    pub fn open(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let requested = root.as_ref();
        let root = fs::canonicalize(requested).or_raise(|| ErrorKind::InvalidDirectory(requested.to_path_buf()))?;
        if !root.is_dir() {
            exn::bail!(ErrorKind::InvalidDirectory(requested.to_path_buf()));
        }
        Ok(Self { name: name.into(), root })
    }

    /// Get the absolute path for a relative storage path.
    fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_path(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    fn metadata(path: &Path, metadata: Metadata) -> Result<FileInfo> {
        let modified = metadata.modified().map_err(ErrorKind::Io)?.into();
        Ok(FileInfo::new(path, metadata.len(), modified))
    }

    fn map_io_error(e: io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::AlreadyExists => ErrorKind::AlreadyExists(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}

impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn list(&self) -> Result<Vec<FileInfo>> {
        let entries = fs::read_dir(&self.root).map_err(|e| Self::map_io_error(e, &self.root))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Self::map_io_error(e, &self.root))?;
            let path = entry.path();
            // Follows symlinks: a link to a photo is a photo.
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!(backend = %self.name, path = %path.display(), "Skipping broken symlink");
                    continue;
                },
                Err(e) => exn::bail!(Self::map_io_error(e, &path)),
            };
            if !metadata.is_file() {
                continue;
            }
            files.push(Self::metadata(Path::new(&entry.file_name()), metadata)?);
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let abs_path = self.absolute_path(path)?;
        Ok(abs_path.try_exists().map_err(|e| Self::map_io_error(e, path))?)
    }

    fn stat(&self, path: &Path) -> Result<FileInfo> {
        let abs_path = self.absolute_path(path)?;
        let metadata = fs::metadata(&abs_path).map_err(|e| Self::map_io_error(e, path))?;
        Self::metadata(path, metadata)
    }

    fn reader(&self, path: &Path) -> Result<BoxSyncRead> {
        let abs_path = self.absolute_path(path)?;
        let file = File::open(&abs_path).map_err(|e| Self::map_io_error(e, path))?;
        Ok(Box::new(file))
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        let abs_path = self.absolute_path(path)?;
        Ok(fs::create_dir_all(&abs_path).map_err(|e| Self::map_io_error(e, path))?)
    }

    fn write_new(&self, path: &Path, data: &mut dyn Read, modified: Option<OffsetDateTime>) -> Result<u64> {
        let abs_path = self.absolute_path(path)?;
        if let Some(parent) = abs_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Self::map_io_error(e, path))?;
        }
        // `create_new` makes the existence check and the creation one atomic step.
        let mut file =
            OpenOptions::new().write(true).create_new(true).open(&abs_path).map_err(|e| Self::map_io_error(e, path))?;
        let written = match io::copy(data, &mut file).and_then(|n| file.sync_all().map(|()| n)) {
            Ok(n) => n,
            Err(e) => {
                drop(file);
                // Never leave a truncated photo behind.
                _ = fs::remove_file(&abs_path);
                exn::bail!(Self::map_io_error(e, path));
            },
        };
        if let Some(modified) = modified
            && let Err(e) = file.set_modified(SystemTime::from(modified))
        {
            tracing::warn!(backend = %self.name, path = %path.display(), error = %e, "Could not preserve modification time");
        }
        Ok(written)
    }
}
