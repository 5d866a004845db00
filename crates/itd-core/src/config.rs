//! Engine configuration
//!
//! Every field has a default, so a TOML file only names what it changes:
//!
//! ```toml
//! metadata_cache_capacity = 2000
//! fingerprint_policy = "unified"
//! immediate_writes = true
//! ```

use crate::error::{EngineError, Result};
use itd_roundtrip::FingerprintPolicy;
use serde::Deserialize;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Computed metadata entries kept before eviction
    pub metadata_cache_capacity: u64,
    /// Longest notification chain one change may trigger
    pub max_notification_depth: usize,
    /// Fingerprint texts remembered by the XML round-trip manager
    pub fingerprint_policy: FingerprintPolicy,
    /// Paths remembered by the fingerprint cache
    pub fingerprint_cache_capacity: u64,
    /// Write introduction units at once instead of queueing until commit
    pub immediate_writes: bool,
    /// Spaces per indentation level in generated source
    pub indent_width: usize,
    /// File extension of introduction units
    pub itd_file_extension: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            metadata_cache_capacity: 1_000,
            max_notification_depth: 64,
            fingerprint_policy: FingerprintPolicy::Compatible,
            fingerprint_cache_capacity: 10_000,
            immediate_writes: false,
            indent_width: 4,
            itd_file_extension: "aj".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; absent keys keep their defaults
    ///
    /// # Errors
    /// Returns [`EngineError::Config`] for malformed TOML, unknown keys or
    /// values that cannot drive the engine
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with
    ///
    /// # Errors
    /// Returns [`EngineError::Config`] naming the offending key
    pub fn validate(&self) -> Result<()> {
        if self.max_notification_depth == 0 {
            return Err(EngineError::Config("max_notification_depth must be at least 1".into()));
        }
        if self.metadata_cache_capacity == 0 {
            return Err(EngineError::Config("metadata_cache_capacity must be at least 1".into()));
        }
        if self.itd_file_extension.is_empty() || self.itd_file_extension.contains(['.', '/']) {
            return Err(EngineError::Config(format!(
                "itd_file_extension '{}' must be a bare extension",
                self.itd_file_extension
            )));
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn with_metadata_cache_capacity(mut self, capacity: u64) -> Self {
        self.metadata_cache_capacity = capacity;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_max_notification_depth(mut self, depth: usize) -> Self {
        self.max_notification_depth = depth;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_fingerprint_policy(mut self, policy: FingerprintPolicy) -> Self {
        self.fingerprint_policy = policy;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_fingerprint_cache_capacity(mut self, capacity: u64) -> Self {
        self.fingerprint_cache_capacity = capacity;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_immediate_writes(mut self, immediate: bool) -> Self {
        self.immediate_writes = immediate;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_itd_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.itd_file_extension = extension.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            metadata_cache_capacity = 20
            fingerprint_policy = "unified"
            immediate_writes = true
            "#,
        )
        .unwrap();
        assert_eq!(config.metadata_cache_capacity, 20);
        assert_eq!(config.fingerprint_policy, FingerprintPolicy::Unified);
        assert!(config.immediate_writes);
        assert_eq!(config.indent_width, 4);
        assert_eq!(config.itd_file_extension, "aj");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn unknown_keys_and_bad_values_fail() {
        assert!(matches!(EngineConfig::from_toml_str("cache = 3"), Err(EngineError::Config(_))));
        assert!(matches!(
            EngineConfig::from_toml_str("max_notification_depth = 0"),
            Err(EngineError::Config(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("itd_file_extension = \".aj\""),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn builder_methods_chain() {
        let config = EngineConfig::new()
            .with_immediate_writes(true)
            .with_indent_width(2)
            .with_max_notification_depth(8)
            .with_itd_file_extension("java");
        assert!(config.immediate_writes);
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.max_notification_depth, 8);
        assert_eq!(config.itd_file_extension, "java");
        assert!(config.validate().is_ok());
    }
}
