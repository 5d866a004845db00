//! Engine context
//!
//! One [`EngineContext`] owns every registry the engine needs. Nothing is
//! process-wide, so independent contexts (one per test, say) never see each
//! other's providers, edges or caches.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::service::MetadataService;
use crate::types::TypeManagementService;
use crate::writer::ItdWriter;
use itd_builder::ClassOrInterfaceTypeDetails;
use itd_graph::DependencyRegistry;
use itd_model::MetadataId;
use itd_providers::{CustomDataKeyDecorator, MetadataProvider, ProvidedMetadata, ProviderRegistry};
use itd_roundtrip::{FileManager, FileStore, XmlRoundTripFileManager};
use std::sync::Arc;
use tracing::{debug, info};

/// Registries, services and file access for one project
#[derive(Debug)]
pub struct EngineContext {
    config: EngineConfig,
    registry: Arc<DependencyRegistry>,
    providers: Arc<ProviderRegistry>,
    decorator: Arc<CustomDataKeyDecorator>,
    metadata: Arc<MetadataService>,
    files: Arc<FileManager>,
    xml: Arc<XmlRoundTripFileManager>,
    types: Arc<TypeManagementService>,
}

impl EngineContext {
    /// Wire a context over `store`
    ///
    /// The [`ItdWriter`] is registered as a compute listener, so every
    /// computed introduction unit reaches the store.
    ///
    /// # Errors
    /// Returns [`EngineError::Config`](crate::EngineError::Config) when the
    /// configuration is unusable
    pub fn new(config: EngineConfig, store: Arc<dyn FileStore>) -> Result<Self> {
        config.validate()?;

        let registry = Arc::new(DependencyRegistry::new());
        let providers = Arc::new(ProviderRegistry::new());
        let decorator = Arc::new(CustomDataKeyDecorator::new());
        let metadata = Arc::new(
            MetadataService::new(
                Arc::clone(&providers),
                Arc::clone(&registry),
                Arc::clone(&decorator),
                config.metadata_cache_capacity,
            )
            .with_indent_width(config.indent_width)
            .with_max_notification_depth(config.max_notification_depth),
        );

        let files = Arc::new(FileManager::new(store));
        let xml = Arc::new(
            XmlRoundTripFileManager::new(Arc::clone(&files))
                .with_policy(config.fingerprint_policy)
                .with_fingerprint_capacity(config.fingerprint_cache_capacity),
        );
        let types = Arc::new(
            TypeManagementService::new(Arc::clone(&files))
                .with_immediate(config.immediate_writes)
                .with_indent_width(config.indent_width),
        );
        let writer = ItdWriter::new(Arc::clone(&files))
            .with_immediate(config.immediate_writes)
            .with_extension(config.itd_file_extension.clone())
            .with_indent_width(config.indent_width);
        metadata.add_listener(Arc::new(writer));

        info!(
            immediate = config.immediate_writes,
            policy = ?config.fingerprint_policy,
            "engine context ready"
        );
        Ok(Self {
            config,
            registry,
            providers,
            decorator,
            metadata,
            files,
            xml,
            types,
        })
    }

    /// Context with default configuration
    ///
    /// # Errors
    /// Never fails for the default configuration; the signature matches
    /// [`EngineContext::new`]
    pub fn with_defaults(store: Arc<dyn FileStore>) -> Result<Self> {
        Self::new(EngineConfig::default(), store)
    }

    /// Register a provider, replacing any earlier one of the same kind
    pub fn register_provider(&self, provider: Arc<dyn MetadataProvider>) {
        let kind = provider.kind();
        if self.providers.register(provider).is_some() {
            debug!(kind = %kind, "provider replaced");
        }
    }

    /// Computed metadata for `id`; see [`MetadataService::get`]
    ///
    /// # Errors
    /// Propagates [`MetadataService::get`] failures
    pub fn get(&self, id: &MetadataId) -> Result<Option<ProvidedMetadata>> {
        self.metadata.get(id)
    }

    /// Deliver one change notification; see [`MetadataService::notify`]
    ///
    /// # Errors
    /// Propagates the failure that aborted the cycle
    pub fn notify(&self, upstream: &MetadataId, downstream: &MetadataId) -> Result<usize> {
        self.metadata.notify(upstream, downstream)
    }

    /// Write a user type and recompute everything that depends on it
    ///
    /// Returns how many dependents were recomputed.
    ///
    /// # Errors
    /// Fails on write errors or an aborted notification cycle
    pub fn update_type(&self, details: &ClassOrInterfaceTypeDetails) -> Result<usize> {
        self.types.create_or_update_type_on_disk(details)?;
        let recomputed = self.metadata.notify_downstream(details.declared_by())?;
        debug!(ty = %details.name(), recomputed, "type change propagated");
        Ok(recomputed)
    }

    /// Apply deferred writes
    ///
    /// # Errors
    /// Stops at the first failing write
    pub fn commit(&self) -> Result<usize> {
        let applied = self.files.commit()?;
        if applied > 0 {
            info!(applied, "deferred writes committed");
        }
        Ok(applied)
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Arc<DependencyRegistry> {
        &self.registry
    }

    #[inline]
    #[must_use]
    pub fn providers(&self) -> &Arc<ProviderRegistry> {
        &self.providers
    }

    #[inline]
    #[must_use]
    pub fn decorator(&self) -> &Arc<CustomDataKeyDecorator> {
        &self.decorator
    }

    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &Arc<MetadataService> {
        &self.metadata
    }

    #[inline]
    #[must_use]
    pub fn files(&self) -> &Arc<FileManager> {
        &self.files
    }

    #[inline]
    #[must_use]
    pub fn xml(&self) -> &Arc<XmlRoundTripFileManager> {
        &self.xml
    }

    #[inline]
    #[must_use]
    pub fn types(&self) -> &Arc<TypeManagementService> {
        &self.types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use itd_roundtrip::MemoryFileStore;

    #[test]
    fn bad_config_is_rejected() {
        let store: Arc<dyn FileStore> = Arc::new(MemoryFileStore::new());
        let config = EngineConfig::default().with_max_notification_depth(0);
        assert!(matches!(EngineContext::new(config, store), Err(EngineError::Config(_))));
    }

    #[test]
    fn contexts_are_independent() {
        let a = EngineContext::with_defaults(Arc::new(MemoryFileStore::new())).unwrap();
        let b = EngineContext::with_defaults(Arc::new(MemoryFileStore::new())).unwrap();
        let up = MetadataId::class_level(itd_model::MetadataKind::PhysicalType);
        let down = MetadataId::class_level(itd_model::MetadataKind::Plural);
        a.registry().register_dependency(&up, &down).unwrap();
        assert_eq!(a.registry().edge_count(), 1);
        assert_eq!(b.registry().edge_count(), 0);
        assert!(Arc::ptr_eq(a.metadata().registry(), a.registry()));
    }
}
