//! Metadata service: cached computation and notification fan-out
//!
//! `get` dispatches to the provider registered for the id's kind and caches
//! the result. `notify` evicts the downstream entry, recomputes it and, when
//! the new result is valid, carries the notification further downstream.
//! Eviction always precedes recomputation, so no consumer sees a result
//! computed from stale upstream state.

use crate::error::{EngineError, Result};
use indexmap::IndexSet;
use itd_graph::DependencyRegistry;
use itd_model::MetadataId;
use itd_providers::{CustomDataKeyDecorator, ProvidedMetadata, ProviderContext, ProviderRegistry};
use moka::sync::Cache;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Observer of freshly computed metadata
///
/// Runs after the result is cached; an error aborts the surrounding
/// notification cycle.
pub trait ComputeListener: Send + Sync {
    /// # Errors
    /// Implementations report failures such as an aborted file write
    fn computed(&self, metadata: &ProvidedMetadata) -> Result<()>;
}

/// Active notification chain of one top-level notification
///
/// An id reached again through a different branch (a diamond) is
/// recomputed again; only an id already on the active chain is a cycle.
#[derive(Debug)]
struct NotificationGuard {
    path: IndexSet<MetadataId>,
    max_depth: usize,
}

impl NotificationGuard {
    fn new(max_depth: usize) -> Self {
        Self {
            path: IndexSet::new(),
            max_depth,
        }
    }

    fn enter(&mut self, id: &MetadataId) -> Result<()> {
        if self.path.len() >= self.max_depth {
            return Err(EngineError::depth_exceeded(self.max_depth, id));
        }
        if !self.path.insert(id.clone()) {
            return Err(EngineError::cycle(id));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.path.pop();
    }
}

/// Cached, dependency-aware metadata computation
pub struct MetadataService {
    providers: Arc<ProviderRegistry>,
    registry: Arc<DependencyRegistry>,
    decorator: Arc<CustomDataKeyDecorator>,
    cache: Cache<MetadataId, ProvidedMetadata>,
    listeners: RwLock<Vec<Arc<dyn ComputeListener>>>,
    indent_width: usize,
    max_notification_depth: usize,
}

impl fmt::Debug for MetadataService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataService")
            .field("providers", &self.providers)
            .field("cached", &self.cache.entry_count())
            .field("listeners", &self.listeners.read().len())
            .field("max_notification_depth", &self.max_notification_depth)
            .finish_non_exhaustive()
    }
}

impl MetadataService {
    #[must_use]
    pub fn new(
        providers: Arc<ProviderRegistry>,
        registry: Arc<DependencyRegistry>,
        decorator: Arc<CustomDataKeyDecorator>,
        cache_capacity: u64,
    ) -> Self {
        Self {
            providers,
            registry,
            decorator,
            cache: Cache::new(cache_capacity),
            listeners: RwLock::new(Vec::new()),
            indent_width: 4,
            max_notification_depth: 64,
        }
    }

    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    #[must_use]
    pub fn with_max_notification_depth(mut self, depth: usize) -> Self {
        self.max_notification_depth = depth;
        self
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

    pub fn add_listener(&self, listener: Arc<dyn ComputeListener>) {
        self.listeners.write().push(listener);
    }

    /// Remove a listener by identity
    pub fn remove_listener(&self, listener: &Arc<dyn ComputeListener>) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|l| !Arc::ptr_eq(l, listener));
        before != listeners.len()
    }

    /// Metadata for an instance-level id, computing it on a cache miss
    ///
    /// `Ok(None)` means the provider's inputs are unavailable.
    ///
    /// # Errors
    /// Fails for class-level ids, kinds without a provider, provider
    /// precondition violations and listener failures
    pub fn get(&self, id: &MetadataId) -> Result<Option<ProvidedMetadata>> {
        if id.is_class_level() {
            return Err(EngineError::ClassLevelRequest(id.to_string()));
        }
        if let Some(cached) = self.cache.get(id) {
            debug!(%id, "metadata cache hit");
            return Ok(Some(cached));
        }

        let provider = self
            .providers
            .get(id.kind())
            .ok_or_else(|| EngineError::NoProvider(id.kind().tag().to_string()))?;
        let ctx = ProviderContext {
            registry: &self.registry,
            decorator: &self.decorator,
            indent_width: self.indent_width,
        };
        let Some(metadata) = provider.compute(id, &ctx)? else {
            debug!(%id, "provider inputs unavailable");
            return Ok(None);
        };

        info!(%id, valid = metadata.is_valid(), "computed metadata");
        self.cache.insert(id.clone(), metadata.clone());
        let listeners: Vec<_> = self.listeners.read().clone();
        for listener in listeners {
            listener.computed(&metadata)?;
        }
        Ok(Some(metadata))
    }

    /// Drop the cached result for `id`
    pub fn evict(&self, id: &MetadataId) {
        debug!(%id, "evicting metadata");
        self.cache.invalidate(id);
    }

    pub fn evict_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }

    /// Whether a result for `id` is cached
    #[must_use]
    pub fn is_cached(&self, id: &MetadataId) -> bool {
        self.cache.contains_key(id)
    }

    #[must_use]
    pub fn cached_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    /// Deliver one upstream change to one downstream id
    ///
    /// Returns how many ids were recomputed, including further fan-out.
    ///
    /// # Errors
    /// See [`MetadataService::notify_downstream`]
    pub fn notify(&self, upstream: &MetadataId, downstream: &MetadataId) -> Result<usize> {
        let mut guard = NotificationGuard::new(self.max_notification_depth);
        self.deliver(upstream, downstream, &mut guard)
            .map_err(|e| {
                error!(%upstream, %downstream, error = %e, "notification cycle aborted");
                e
            })
    }

    /// Deliver a change of `upstream` to everything registered downstream
    ///
    /// Dependents registered against the class-level form of `upstream`'s
    /// kind are included. Returns how many ids were recomputed.
    ///
    /// # Errors
    /// Fails when an id is reached twice in one cycle, the chain exceeds the
    /// configured depth, or a recomputation fails
    pub fn notify_downstream(&self, upstream: &MetadataId) -> Result<usize> {
        let mut guard = NotificationGuard::new(self.max_notification_depth);
        self.fan_out(upstream, &mut guard)
            .map_err(|e| {
                error!(%upstream, error = %e, "notification cycle aborted");
                e
            })
    }

    fn dependents(&self, upstream: &MetadataId) -> Vec<MetadataId> {
        let mut dependents = self.registry.downstream(upstream);
        if upstream.is_instance_level() {
            for d in self.registry.downstream(&upstream.to_class_level()) {
                if !dependents.contains(&d) {
                    dependents.push(d);
                }
            }
        }
        dependents
    }

    fn fan_out(&self, upstream: &MetadataId, guard: &mut NotificationGuard) -> Result<usize> {
        let mut recomputed = 0;
        for downstream in self.dependents(upstream) {
            recomputed += self.deliver(upstream, &downstream, guard)?;
        }
        Ok(recomputed)
    }

    fn deliver(
        &self,
        upstream: &MetadataId,
        downstream: &MetadataId,
        guard: &mut NotificationGuard,
    ) -> Result<usize> {
        let target = if downstream.is_class_level() {
            // a kind-wide dependent receives the instance for upstream's type
            let Some(type_id) = upstream.logical_type() else {
                return Err(EngineError::invalid_notification(upstream, downstream));
            };
            let instance = MetadataId::instance(downstream.kind().clone(), type_id.clone());
            if self.registry.contains_dependency(upstream, &instance) {
                debug!(%upstream, %instance, "explicit instance edge delivers this notification");
                return Ok(0);
            }
            instance
        } else {
            downstream.clone()
        };

        guard.enter(&target)?;
        let recomputed = self.recompute(upstream, &target, guard);
        guard.leave();
        recomputed
    }

    fn recompute(&self, upstream: &MetadataId, target: &MetadataId, guard: &mut NotificationGuard) -> Result<usize> {
        self.evict(target);
        let result = self.get(target)?;
        self.registry.notify_listeners(upstream, target);

        match result {
            Some(metadata) if metadata.is_valid() => Ok(1 + self.fan_out(target, guard)?),
            Some(_) => {
                debug!(id = %target, "invalid result; fan-out stops");
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itd_model::{JavaType, LogicalPath, MetadataKind, PathKind};
    use itd_providers::{MetadataProvider, PluralProvider};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn id(kind: MetadataKind, ty: &str) -> MetadataId {
        MetadataId::for_type(kind, LogicalPath::root_module(PathKind::SrcMainJava), JavaType::new(ty))
    }

    #[derive(Debug, Default)]
    struct Counting {
        computed: AtomicUsize,
    }

    impl MetadataProvider for Counting {
        fn kind(&self) -> MetadataKind {
            MetadataKind::Plural
        }

        fn compute(&self, id: &MetadataId, _: &ProviderContext<'_>) -> itd_providers::Result<Option<ProvidedMetadata>> {
            self.computed.fetch_add(1, Ordering::SeqCst);
            let governor = itd_builder::TypeDetailsBuilder::new(
                &id.with_kind(MetadataKind::PhysicalType),
                itd_builder::Modifier::PUBLIC,
                id.java_type().cloned().unwrap_or_else(|| JavaType::new("com.foo.X")),
                itd_builder::PhysicalTypeCategory::Class,
            )
            .build()?;
            Ok(Some(ProvidedMetadata::Plural(Arc::new(itd_providers::PluralMetadata::new(id, &governor)))))
        }
    }

    fn service(provider: Arc<dyn MetadataProvider>) -> MetadataService {
        let providers = Arc::new(ProviderRegistry::new());
        providers.register(provider);
        MetadataService::new(providers, Arc::new(DependencyRegistry::new()), Arc::new(CustomDataKeyDecorator::new()), 100)
    }

    #[test]
    fn get_caches_until_evicted() {
        let counting = Arc::new(Counting::default());
        let service = service(counting.clone());
        let person = id(MetadataKind::Plural, "com.foo.Person");

        let first = service.get(&person).unwrap().unwrap();
        assert_eq!(first.as_plural().unwrap().plural(), "People");
        service.get(&person).unwrap();
        assert_eq!(counting.computed.load(Ordering::SeqCst), 1);

        service.evict(&person);
        service.get(&person).unwrap();
        assert_eq!(counting.computed.load(Ordering::SeqCst), 2);

        service.evict_all();
        assert_eq!(service.cached_count(), 0);
    }

    #[test]
    fn class_level_and_unknown_kinds_are_rejected() {
        let service = service(Arc::new(Counting::default()));
        assert!(matches!(
            service.get(&MetadataId::class_level(MetadataKind::Plural)),
            Err(EngineError::ClassLevelRequest(_))
        ));
        assert!(matches!(
            service.get(&id(MetadataKind::Editor, "com.foo.PersonEditor")),
            Err(EngineError::NoProvider(_))
        ));
    }

    #[test]
    fn unavailable_inputs_are_not_cached() {
        let service = service(Arc::new(PluralProvider::new(|_: &MetadataId| -> Option<itd_builder::ClassOrInterfaceTypeDetails> { None })));
        let person = id(MetadataKind::Plural, "com.foo.Person");
        assert!(service.get(&person).unwrap().is_none());
        assert!(!service.is_cached(&person));
    }

    #[test]
    fn class_level_dependents_resolve_to_instances() {
        let counting = Arc::new(Counting::default());
        let service = service(counting.clone());
        let physical = id(MetadataKind::PhysicalType, "com.foo.Person");
        service
            .registry()
            .register_dependency(&MetadataId::class_level(MetadataKind::PhysicalType), &MetadataId::class_level(MetadataKind::Plural))
            .unwrap();

        assert_eq!(service.notify_downstream(&physical).unwrap(), 1);
        assert!(service.is_cached(&id(MetadataKind::Plural, "com.foo.Person")));
    }

    #[test]
    fn class_level_upstream_cannot_reach_class_level_downstream() {
        let service = service(Arc::new(Counting::default()));
        let err = service
            .notify(&MetadataId::class_level(MetadataKind::PhysicalType), &MetadataId::class_level(MetadataKind::Plural))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidNotification { .. }));
    }

    #[test]
    fn guard_tracks_the_active_chain() {
        let mut guard = NotificationGuard::new(2);
        let a = id(MetadataKind::Plural, "com.foo.A");
        let b = id(MetadataKind::Plural, "com.foo.B");
        guard.enter(&a).unwrap();
        assert!(matches!(guard.enter(&a), Err(EngineError::NotificationCycle { .. })));
        guard.enter(&b).unwrap();
        assert!(matches!(
            guard.enter(&id(MetadataKind::Plural, "com.foo.C")),
            Err(EngineError::NotificationDepthExceeded { .. })
        ));
        guard.leave();
        guard.leave();
        guard.enter(&a).unwrap();
    }
}
