//! Storage backends behind the file manager

use crate::error::{Result, RoundTripError};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Synchronous text file access
pub trait FileStore: Send + Sync + std::fmt::Debug {
    fn exists(&self, path: &Path) -> bool;

    /// # Errors
    /// Fails when the file is missing or unreadable
    fn read(&self, path: &Path) -> Result<String>;

    /// Create or replace a file, creating parent directories as needed
    ///
    /// # Errors
    /// Fails when the file cannot be written
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Remove a file; removing a missing file is not an error
    ///
    /// # Errors
    /// Fails when an existing file cannot be removed
    fn delete(&self, path: &Path) -> Result<()>;
}

/// In-memory store that counts mutations
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    files: RwLock<BTreeMap<PathBuf, String>>,
    writes: AtomicUsize,
    deletes: AtomicUsize,
}

impl MemoryFileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a file in place without counting a write, as an edit made
    /// outside the engine would
    pub fn seed(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.write().insert(path.into(), contents.into());
    }

    #[must_use]
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.read().get(path).cloned()
    }

    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.read().keys().cloned().collect()
    }

    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

impl FileStore for MemoryFileStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.read().contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.contents(path).ok_or_else(|| {
            RoundTripError::io_error(path, std::io::Error::from(std::io::ErrorKind::NotFound))
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.files.write().insert(path.to_path_buf(), contents.to_owned());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<()> {
        if self.files.write().remove(path).is_some() {
            self.deletes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// Store rooted at a project directory; relative paths resolve against it
#[derive(Debug, Clone)]
pub struct DiskFileStore {
    root: PathBuf,
}

impl DiskFileStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(RoundTripError::OutsideRoot(path.to_path_buf()));
        }
        Ok(self.root.join(path))
    }
}

impl FileStore for DiskFileStore {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_ok_and(|p| p.is_file())
    }

    fn read(&self, path: &Path) -> Result<String> {
        let full = self.resolve(path)?;
        std::fs::read_to_string(&full).map_err(|e| RoundTripError::io_error(full, e))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).map_err(|e| RoundTripError::io_error(parent, e))?;
        }
        std::fs::write(&full, contents).map_err(|e| RoundTripError::io_error(full, e))
    }

    fn delete(&self, path: &Path) -> Result<()> {
        let full = self.resolve(path)?;
        match std::fs::remove_file(&full) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                Err(RoundTripError::io_error(full, e))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_counts_writes_not_seeds() {
        let store = MemoryFileStore::new();
        store.seed("a.txt", "seeded");
        assert_eq!(store.write_count(), 0);
        store.write(Path::new("a.txt"), "written").unwrap();
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.read(Path::new("a.txt")).unwrap(), "written");
    }

    #[test]
    fn memory_store_delete_missing_is_ok() {
        let store = MemoryFileStore::new();
        store.delete(Path::new("missing")).unwrap();
        assert_eq!(store.delete_count(), 0);
        assert!(matches!(
            store.read(Path::new("missing")),
            Err(RoundTripError::Io { .. })
        ));
    }

    #[test]
    fn disk_store_round_trips_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskFileStore::new(dir.path());
        let path = Path::new("src/main/java/com/foo/Person.java");

        assert!(!store.exists(path));
        store.write(path, "class Person {}").unwrap();
        assert!(store.exists(path));
        assert!(dir.path().join(path).is_file());
        assert_eq!(store.read(path).unwrap(), "class Person {}");
        store.delete(path).unwrap();
        store.delete(path).unwrap();
        assert!(!store.exists(path));
    }

    #[test]
    fn disk_store_rejects_parent_components() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskFileStore::new(dir.path());
        assert!(matches!(
            store.write(Path::new("../escape.txt"), "x"),
            Err(RoundTripError::OutsideRoot(_))
        ));
    }
}
