//! Blake3 content hashes for generated XML nodes

use std::fmt::{self, Display, Formatter};

/// A 32-byte Blake3 hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hash arbitrary data
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self::new(*blake3::hash(data).as_bytes())
    }

    /// Hash a sequence of parts, each terminated so `["ab", "c"]` and
    /// `["a", "bc"]` differ
    #[must_use]
    pub fn compute_parts<'a>(parts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut hasher = blake3::Hasher::new();
        for part in parts {
            hasher.update(part.as_bytes());
            hasher.update(&[0]);
        }
        Self::new(*hasher.finalize().as_bytes())
    }

    /// First 16 hex chars; the form stored in `z` attributes
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ContentHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_is_deterministic() {
        assert_eq!(ContentHash::compute(b"menu"), ContentHash::compute(b"menu"));
        assert_ne!(ContentHash::compute(b"menu"), ContentHash::compute(b"menus"));
    }

    #[test]
    fn parts_are_delimited() {
        assert_ne!(
            ContentHash::compute_parts(["ab", "c"]),
            ContentHash::compute_parts(["a", "bc"])
        );
    }

    #[test]
    fn short_form_is_sixteen_hex_chars() {
        let hash = ContentHash::compute(b"x");
        assert_eq!(hash.short().len(), 16);
        assert!(hash.to_string().starts_with(&hash.short()));
        assert_eq!(hash.to_string().len(), 64);
    }
}
