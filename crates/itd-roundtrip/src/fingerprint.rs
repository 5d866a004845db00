//! Per-path fingerprints that let an unchanged proposal skip the merge
//!
//! A fingerprint is SHA-256 over the on-disk text followed by the proposed
//! text. The last fingerprint seen for each path lives in a bounded `moka`
//! cache; losing an entry only costs one extra merge.

use moka::sync::Cache;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Which texts feed the fingerprint remembered for a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintPolicy {
    /// Create path remembers `proposed + proposed`; update path remembers
    /// the pre-merge `disk + proposed`
    #[default]
    Compatible,
    /// Both paths remember the post-write `disk + proposed`
    Unified,
}

/// Hex SHA-256 digest of concatenated texts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    #[must_use]
    pub fn of(parts: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part.as_bytes());
        }
        Self(hex::encode(hasher.finalize()))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Last fingerprint remembered per path
#[derive(Debug, Clone)]
pub struct FingerprintCache {
    inner: Cache<PathBuf, Fingerprint>,
}

impl FingerprintCache {
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Whether `fingerprint` is the one last remembered for `path`
    #[must_use]
    pub fn matches(&self, path: &Path, fingerprint: &Fingerprint) -> bool {
        self.inner
            .get(path)
            .is_some_and(|last| &last == fingerprint)
    }

    pub fn remember(&self, path: &Path, fingerprint: Fingerprint) {
        self.inner.insert(path.to_path_buf(), fingerprint);
    }

    pub fn forget(&self, path: &Path) {
        self.inner.invalidate(path);
    }

    pub fn clear(&self) {
        self.inner.invalidate_all();
    }
}

impl Default for FingerprintCache {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_depends_on_concatenation_only() {
        assert_eq!(Fingerprint::of(&["ab", "c"]), Fingerprint::of(&["a", "bc"]));
        assert_ne!(Fingerprint::of(&["ab"]), Fingerprint::of(&["ba"]));
        assert_eq!(Fingerprint::of(&[]).as_str().len(), 64);
    }

    #[test]
    fn cache_remembers_last_per_path() {
        let cache = FingerprintCache::new(16);
        let path = Path::new("src/main/webapp/WEB-INF/views/menu.jspx");
        let first = Fingerprint::of(&["a"]);
        let second = Fingerprint::of(&["b"]);

        assert!(!cache.matches(path, &first));
        cache.remember(path, first.clone());
        assert!(cache.matches(path, &first));
        cache.remember(path, second.clone());
        assert!(!cache.matches(path, &first));
        assert!(cache.matches(path, &second));
        cache.forget(path);
        assert!(!cache.matches(path, &second));
    }

    #[test]
    fn policy_defaults_to_compatible() {
        assert_eq!(FingerprintPolicy::default(), FingerprintPolicy::Compatible);
    }
}
