//! Text file writes with an immediate or deferred mode
//!
//! Deferred writes queue per path until [`FileManager::commit`]; a later
//! write to the same path replaces the queued contents and appends its
//! description. Empty queued contents mean "delete this file".

use crate::error::Result;
use crate::store::FileStore;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
struct PendingWrite {
    contents: String,
    descriptions: Vec<String>,
}

impl PendingWrite {
    fn description(&self) -> String {
        self.descriptions.join("; ")
    }
}

/// Pending-aware view over a [`FileStore`]
#[derive(Debug)]
pub struct FileManager {
    store: Arc<dyn FileStore>,
    pending: Mutex<IndexMap<PathBuf, PendingWrite>>,
}

impl FileManager {
    #[must_use]
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self {
            store,
            pending: Mutex::new(IndexMap::new()),
        }
    }

    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<dyn FileStore> {
        &self.store
    }

    /// Whether the file exists once pending writes are applied
    #[must_use]
    pub fn exists(&self, path: &Path) -> bool {
        match self.pending.lock().get(path) {
            Some(pending) => !pending.contents.is_empty(),
            None => self.store.exists(path),
        }
    }

    /// Contents once pending writes are applied
    ///
    /// # Errors
    /// Fails when the file is missing or unreadable
    pub fn read(&self, path: &Path) -> Result<String> {
        if let Some(pending) = self.pending.lock().get(path) {
            if !pending.contents.is_empty() {
                return Ok(pending.contents.clone());
            }
        }
        self.store.read(path)
    }

    /// Write `contents` to `path` now, or queue it for [`commit`](Self::commit)
    ///
    /// Returns whether the store was written. An immediate write whose
    /// contents match the file on disk performs no write.
    ///
    /// # Errors
    /// Fails when an immediate write cannot be performed
    pub fn create_or_update_text_file_if_required(
        &self,
        path: &Path,
        contents: &str,
        description: &str,
        immediate: bool,
    ) -> Result<bool> {
        if !immediate {
            let mut pending = self.pending.lock();
            let entry = pending.entry(path.to_path_buf()).or_default();
            entry.contents = contents.to_owned();
            if !description.is_empty() {
                entry.descriptions.push(description.to_owned());
            }
            debug!(path = %path.display(), "queued deferred write");
            return Ok(false);
        }

        self.pending.lock().shift_remove(path);
        self.write_if_changed(path, contents, description)
    }

    /// Delete `path` now, or queue the deletion
    ///
    /// # Errors
    /// Fails when an immediate delete cannot be performed
    pub fn delete(&self, path: &Path, description: &str, immediate: bool) -> Result<bool> {
        if immediate {
            self.pending.lock().shift_remove(path);
            return self.delete_if_present(path, description);
        }
        self.create_or_update_text_file_if_required(path, "", description, false)
    }

    /// Apply queued writes in the order they were first queued; returns how
    /// many files were written or deleted
    ///
    /// # Errors
    /// Stops at the first failing write; later entries stay queued
    pub fn commit(&self) -> Result<usize> {
        let mut applied = 0;
        loop {
            let Some((path, write)) = self.pending.lock().shift_remove_index(0) else {
                break;
            };
            let description = write.description();
            let result = if write.contents.is_empty() {
                self.delete_if_present(&path, &description)
            } else {
                self.write_if_changed(&path, &write.contents, &description)
            };
            match result {
                Ok(true) => applied += 1,
                Ok(false) => {}
                Err(e) => {
                    self.pending.lock().shift_insert(0, path, write);
                    return Err(e);
                }
            }
        }
        Ok(applied)
    }

    /// Discard queued writes; returns how many were dropped
    pub fn clear(&self) -> usize {
        let mut pending = self.pending.lock();
        let dropped = pending.len();
        pending.clear();
        if dropped > 0 {
            debug!(dropped, "discarded deferred writes");
        }
        dropped
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Joined descriptions of the queued write for `path`
    #[must_use]
    pub fn pending_description(&self, path: &Path) -> Option<String> {
        self.pending.lock().get(path).map(PendingWrite::description)
    }

    fn write_if_changed(&self, path: &Path, contents: &str, description: &str) -> Result<bool> {
        if self.store.exists(path) && self.store.read(path)? == contents {
            debug!(path = %path.display(), "contents unchanged, skipping write");
            return Ok(false);
        }
        let action = if self.store.exists(path) { "updated" } else { "created" };
        self.store.write(path, contents)?;
        info!(path = %path.display(), action, description, "wrote file");
        Ok(true)
    }

    fn delete_if_present(&self, path: &Path, description: &str) -> Result<bool> {
        if !self.store.exists(path) {
            return Ok(false);
        }
        self.store.delete(path)?;
        info!(path = %path.display(), description, "deleted file");
        Ok(true)
    }
}
