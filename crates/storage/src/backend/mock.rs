//! In-memory storage backend for testing.

use crate::backend::BoxSyncRead;
use crate::error::{ErrorKind, Result};
use crate::path::validate as validate_path;
use crate::{FileInfo, StorageBackend};
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use time::OffsetDateTime;

enum Entry {
    Directory,
    File(OffsetDateTime, Vec<u8>),
}

/// In-memory storage backend for testing.
///
/// Entries are stored in a map behind a [`RwLock`], so all trait methods
/// can operate on `&self`. Every successful write is counted, which makes
/// "this touched nothing" a one-line assertion.
///
/// # Examples
///
/// ```
/// use picport_storage::backend::MockBackend;
/// use picport_storage::StorageBackend;
/// use std::io::Cursor;
/// use std::path::Path;
///
/// let backend = MockBackend::with_files([("DSC_0001.JPG", b"jpeg")]);
/// assert!(backend.exists(Path::new("DSC_0001.JPG")).unwrap());
///
/// backend.write_new(Path::new("event/z3d00001.jpg"), &mut Cursor::new(b"jpeg"), None).unwrap();
/// assert_eq!(backend.writes(), 1);
/// ```
pub struct MockBackend {
    name: String,
    root: PathBuf,
    storage: RwLock<BTreeMap<PathBuf, Entry>>,
    writes: AtomicUsize,
}

impl MockBackend {
    /// Create a mock backend pre-populated with files.
    ///
    /// Panics if any path fails validation (e.g. path traversal). If test
    /// setup is wrong, then test should not pass.
    pub fn with_files(files: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<Vec<u8>>)>) -> Self {
        let mut map = BTreeMap::new();
        let now = OffsetDateTime::now_utc();
        for (path, data) in files {
            let path = path.into();
            let Ok(validated) = validate_path(&path) else {
                // The panic here is DELIBERATE. MockBackend is intended to be
                // used in tests; panics are expected. There is no error result.
                panic!("MockBackend::with_files: invalid path {}", path.display());
            };
            map.insert(validated, Entry::File(now, data.into()));
        }
        Self {
            name: "mock".to_string(),
            root: PathBuf::from("/mock"),
            storage: RwLock::new(map),
            writes: AtomicUsize::new(0),
        }
    }

    /// Change the name (and root) of the mock backend.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.root = PathBuf::from("/mock").join(&self.name);
        self
    }

    /// Number of successful writes (files and directories) so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Contents of a file, if one exists at `path`.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.storage.read().ok()?.get(path.as_ref()) {
            Some(Entry::File(_, data)) => Some(data.clone()),
            _ => None,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<PathBuf, Entry>>> {
        Ok(self.storage.read().map_err(|_| ErrorKind::BackendError("mock storage lock poisoned".to_string()))?)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<PathBuf, Entry>>> {
        Ok(self.storage.write().map_err(|_| ErrorKind::BackendError("mock storage lock poisoned".to_string()))?)
    }
}
impl Default for MockBackend {
    fn default() -> Self {
        let files: [(&str, &str); 0] = [];
        Self::with_files(files)
    }
}

impl StorageBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn list(&self) -> Result<Vec<FileInfo>> {
        // BTreeMap iteration is already sorted by path.
        Ok(self
            .read()?
            .iter()
            .filter(|(path, _)| path.components().count() == 1)
            .filter_map(|(path, entry)| match entry {
                Entry::File(modified, data) => Some(FileInfo::new(path, data.len() as u64, *modified)),
                Entry::Directory => None,
            })
            .collect())
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let path = validate_path(path)?;
        // Directories exist implicitly when something lives inside them.
        Ok(self.read()?.keys().any(|key| key.starts_with(&path)))
    }

    fn stat(&self, path: &Path) -> Result<FileInfo> {
        let validated = validate_path(path)?;
        match self.read()?.get(&validated) {
            Some(Entry::File(modified, data)) => Ok(FileInfo::new(validated, data.len() as u64, *modified)),
            _ => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
        }
    }

    fn reader(&self, path: &Path) -> Result<BoxSyncRead> {
        let validated = validate_path(path)?;
        match self.read()?.get(&validated) {
            Some(Entry::File(_, data)) => Ok(Box::new(Cursor::new(data.clone()))),
            _ => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
        }
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        let validated = validate_path(path)?;
        let mut storage = self.write()?;
        if let Some(Entry::File(..)) = storage.get(&validated) {
            exn::bail!(ErrorKind::AlreadyExists(path.to_path_buf()));
        }
        storage.entry(validated).or_insert(Entry::Directory);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn write_new(&self, path: &Path, data: &mut dyn Read, modified: Option<OffsetDateTime>) -> Result<u64> {
        let validated = validate_path(path)?;
        let mut storage = self.write()?;
        if storage.contains_key(&validated) {
            exn::bail!(ErrorKind::AlreadyExists(path.to_path_buf()));
        }
        let mut buffer = Vec::new();
        data.read_to_end(&mut buffer).map_err(ErrorKind::Io)?;
        let written = buffer.len() as u64;
        storage.insert(validated, Entry::File(modified.unwrap_or_else(OffsetDateTime::now_utc), buffer));
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::Deref;

    #[test]
    fn test_list_only_returns_top_level_files() {
        let backend = MockBackend::with_files([
            ("DSC_0002.NEF", b"two".to_vec()),
            ("DSC_0001.JPG", b"one".to_vec()),
            ("nested/DSC_0003.JPG", b"three".to_vec()),
        ]);
        let paths: Vec<_> = backend.list().unwrap().into_iter().map(|f| f.path).collect();
        assert_eq!(paths, vec![PathBuf::from("DSC_0001.JPG"), PathBuf::from("DSC_0002.NEF")]);
    }

    #[test]
    fn test_write_new_refuses_existing() {
        let backend = MockBackend::with_files([("z3d00001.jpg", b"old")]);
        let err = backend.write_new(Path::new("z3d00001.jpg"), &mut Cursor::new(b"new"), None).unwrap_err();
        assert!(matches!(err.deref(), ErrorKind::AlreadyExists(_)));
        assert_eq!(backend.contents("z3d00001.jpg").unwrap(), b"old");
        assert_eq!(backend.writes(), 0);
    }

    #[test]
    fn test_directories_exist_implicitly() {
        let backend = MockBackend::with_files([("event/z3d00001.jpg", b"data")]);
        assert!(backend.exists(Path::new("event")).unwrap());
        assert!(!backend.exists(Path::new("other")).unwrap());
        backend.create_dir(Path::new("other")).unwrap();
        assert!(backend.exists(Path::new("other")).unwrap());
        assert_eq!(backend.writes(), 1);
    }

    #[test]
    fn test_hash_uses_contents() {
        let backend = MockBackend::with_files([("a.jpg", b"same"), ("b.jpg", b"same")]);
        assert_eq!(backend.hash(Path::new("a.jpg")).unwrap(), backend.hash(Path::new("b.jpg")).unwrap());
    }
}
