//! Writes generated XML documents without clobbering hand edits

use crate::error::Result;
use crate::file_manager::FileManager;
use crate::fingerprint::{Fingerprint, FingerprintCache, FingerprintPolicy};
use crate::xml::{compare_and_merge, parse_document, render_document, XmlDocument};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug)]
pub struct XmlRoundTripFileManager {
    files: Arc<FileManager>,
    fingerprints: FingerprintCache,
    policy: FingerprintPolicy,
}

impl XmlRoundTripFileManager {
    #[must_use]
    pub fn new(files: Arc<FileManager>) -> Self {
        Self {
            files,
            fingerprints: FingerprintCache::default(),
            policy: FingerprintPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FingerprintPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_fingerprint_capacity(mut self, capacity: u64) -> Self {
        self.fingerprints = FingerprintCache::new(capacity);
        self
    }

    #[inline]
    #[must_use]
    pub fn policy(&self) -> FingerprintPolicy {
        self.policy
    }

    #[inline]
    #[must_use]
    pub fn files(&self) -> &Arc<FileManager> {
        &self.files
    }

    /// Write `proposed` to `path`, merging with whatever is already there
    ///
    /// Returns whether the file was written. A proposal identical to the
    /// last one seen against unchanged file contents is skipped without
    /// parsing.
    ///
    /// # Errors
    /// Fails when the existing file cannot be read or parsed, or the write
    /// fails
    pub fn write_to_disk_if_necessary(&self, path: &Path, proposed: &XmlDocument) -> Result<bool> {
        let mut proposed = proposed.clone();
        proposed.remove_text_nodes();
        proposed.stamp_unhashed();
        let proposed_text = render_document(&proposed);

        if !self.files.exists(path) {
            let written = self.files.create_or_update_text_file_if_required(
                path,
                &proposed_text,
                "created round-trip document",
                true,
            )?;
            self.fingerprints
                .remember(path, Fingerprint::of(&[proposed_text.as_str(), proposed_text.as_str()]));
            return Ok(written);
        }

        let disk = self.files.read(path)?;
        let fingerprint = Fingerprint::of(&[disk.as_str(), proposed_text.as_str()]);
        if self.fingerprints.matches(path, &fingerprint) {
            debug!(path = %path.display(), "proposal unchanged since last pass");
            return Ok(false);
        }
        if self.policy == FingerprintPolicy::Compatible {
            self.fingerprints.remember(path, fingerprint.clone());
        }

        let mut original = parse_document(&disk, path)?;
        if !compare_and_merge(&mut original, &proposed) {
            debug!(path = %path.display(), "merge produced no difference");
            if self.policy == FingerprintPolicy::Unified {
                self.fingerprints.remember(path, fingerprint);
            }
            return Ok(false);
        }

        original.remove_text_nodes();
        let merged = render_document(&original);
        let written = self.files.create_or_update_text_file_if_required(
            path,
            &merged,
            "merged round-trip document",
            true,
        )?;
        if written {
            info!(path = %path.display(), "merged generated changes");
        }
        if self.policy == FingerprintPolicy::Unified {
            self.fingerprints
                .remember(path, Fingerprint::of(&[merged.as_str(), proposed_text.as_str()]));
        }
        Ok(written)
    }

    /// Drop the remembered fingerprint so the next pass always merges
    pub fn forget(&self, path: &Path) {
        self.fingerprints.forget(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryFileStore};
    use crate::xml::XmlElement;

    fn setup(policy: FingerprintPolicy) -> (Arc<MemoryFileStore>, XmlRoundTripFileManager) {
        let store = Arc::new(MemoryFileStore::new());
        let files = Arc::new(FileManager::new(Arc::clone(&store) as Arc<dyn FileStore>));
        (store, XmlRoundTripFileManager::new(files).with_policy(policy))
    }

    fn page(title: &str) -> XmlDocument {
        XmlDocument::new(
            XmlElement::new("div").with_child(
                XmlElement::new("page:list")
                    .with_attribute("id", "pl_person")
                    .with_attribute("title", title)
                    .with_unique_key(),
            ),
        )
    }

    #[test]
    fn create_then_short_circuit() {
        for policy in [FingerprintPolicy::Compatible, FingerprintPolicy::Unified] {
            let (store, manager) = setup(policy);
            let path = Path::new("views/people/list.jspx");
            assert!(manager.write_to_disk_if_necessary(path, &page("People")).unwrap());
            assert!(!manager.write_to_disk_if_necessary(path, &page("People")).unwrap());
            assert_eq!(store.write_count(), 1);
        }
    }

    #[test]
    fn placeholder_hashes_are_stamped_on_create() {
        let (store, manager) = setup(FingerprintPolicy::Compatible);
        let path = Path::new("list.jspx");
        let proposed = XmlDocument::new(
            XmlElement::new("div").with_child(
                XmlElement::new("page:list")
                    .with_attribute("id", "pl_person")
                    .with_attribute(crate::xml::Z_ATTRIBUTE, crate::xml::UNHASHED),
            ),
        );
        assert!(manager.write_to_disk_if_necessary(path, &proposed).unwrap());
        assert!(!store.contents(path).unwrap().contains("z=\"?\""));
        assert!(!manager.write_to_disk_if_necessary(path, &proposed).unwrap());
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn changed_proposal_updates_generated_element() {
        let (store, manager) = setup(FingerprintPolicy::Compatible);
        let path = Path::new("list.jspx");
        manager.write_to_disk_if_necessary(path, &page("People")).unwrap();
        assert!(manager.write_to_disk_if_necessary(path, &page("Persons")).unwrap());
        assert_eq!(store.write_count(), 2);
        assert!(store.contents(path).unwrap().contains("title=\"Persons\""));
    }

    #[test]
    fn unified_policy_skips_after_merge_write() {
        let (store, manager) = setup(FingerprintPolicy::Unified);
        let path = Path::new("list.jspx");
        manager.write_to_disk_if_necessary(path, &page("People")).unwrap();
        manager.write_to_disk_if_necessary(path, &page("Persons")).unwrap();
        assert!(!manager.write_to_disk_if_necessary(path, &page("Persons")).unwrap());
        assert_eq!(store.write_count(), 2);
    }
}
