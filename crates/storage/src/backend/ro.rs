//! Read-only storage backend.
//!
//! Wraps another backend and prevents write operations from executing, while
//! indicating success on return. This is what a dry run imports into.

use crate::backend::BoxSyncRead;
use crate::{BackendHandle, FileInfo, StorageBackend, error::Result};
use std::io::Read;
use std::path::Path;
use time::OffsetDateTime;

/// Read-only storage backend.
///
/// Wraps another backend and silently drops all write operations, logging an
/// [`info event`](tracing::Event). Reads (including existence checks) still
/// reach the wrapped backend, so collisions are reported exactly as they
/// would be for real.
#[derive(Clone)]
pub struct ReadOnlyBackend {
    inner: BackendHandle,
}
impl ReadOnlyBackend {
    pub fn new(inner: BackendHandle) -> Self {
        Self { inner }
    }
}

impl StorageBackend for ReadOnlyBackend {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn root(&self) -> &Path {
        self.inner.root()
    }

    fn list(&self) -> Result<Vec<FileInfo>> {
        self.inner.list()
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        self.inner.exists(path)
    }

    fn stat(&self, path: &Path) -> Result<FileInfo> {
        self.inner.stat(path)
    }

    fn reader(&self, path: &Path) -> Result<BoxSyncRead> {
        self.inner.reader(path)
    }

    fn hash(&self, path: &Path) -> Result<String> {
        self.inner.hash(path)
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        tracing::info!(backend = self.name(), path = %path.display(), "Skipping directory creation during dry run");
        Ok(())
    }

    fn write_new(&self, path: &Path, _data: &mut dyn Read, _modified: Option<OffsetDateTime>) -> Result<u64> {
        tracing::info!(backend = self.name(), path = %path.display(), "Skipping write during dry run");
        Ok(0)
    }
}
