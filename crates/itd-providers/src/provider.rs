//! Provider trait, dispatch table and input collaborators

use crate::error::{ProviderError, Result};
use crate::plural::PluralMetadata;
use crate::tagging::CustomDataKeyDecorator;
use indexmap::IndexMap;
use itd_builder::{emit, ItdTypeDetails};
use itd_graph::DependencyRegistry;
use itd_model::{JavaType, MetadataId, MetadataKind};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Collaborators a provider may touch while computing
#[derive(Debug, Clone, Copy)]
pub struct ProviderContext<'a> {
    pub registry: &'a DependencyRegistry,
    pub decorator: &'a CustomDataKeyDecorator,
    /// Spaces per indent level in generated bodies
    pub indent_width: usize,
}

/// Result of one introduction-unit computation
///
/// `itd` is `None` when a required operation was unavailable; such a result
/// is still cached so the caller can tell "computed, nothing to write" from
/// "never computed".
#[derive(Debug, Clone, PartialEq)]
pub struct ItdMetadata {
    id: MetadataId,
    aspect: JavaType,
    governor: JavaType,
    itd: Option<ItdTypeDetails>,
}

impl ItdMetadata {
    #[must_use]
    pub fn valid(id: &MetadataId, itd: ItdTypeDetails) -> Self {
        Self {
            id: id.clone(),
            aspect: itd.aspect().clone(),
            governor: itd.governor().name().clone(),
            itd: Some(itd),
        }
    }

    #[must_use]
    pub fn invalid(id: &MetadataId, governor: &JavaType, aspect: JavaType) -> Self {
        Self {
            id: id.clone(),
            aspect,
            governor: governor.clone(),
            itd: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &MetadataId {
        &self.id
    }

    #[inline]
    #[must_use]
    pub fn aspect(&self) -> &JavaType {
        &self.aspect
    }

    #[inline]
    #[must_use]
    pub fn governor(&self) -> &JavaType {
        &self.governor
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.itd.is_some()
    }

    #[inline]
    #[must_use]
    pub fn itd(&self) -> Option<&ItdTypeDetails> {
        self.itd.as_ref()
    }

    /// Introduction unit text, if valid
    #[must_use]
    pub fn emit(&self) -> Option<String> {
        self.itd.as_ref().map(emit::emit_introduction_unit)
    }
}

/// Anything a provider can hand back to the metadata service
#[derive(Debug, Clone)]
pub enum ProvidedMetadata {
    Itd(ItdMetadata),
    Plural(Arc<PluralMetadata>),
}

impl ProvidedMetadata {
    #[must_use]
    pub fn id(&self) -> &MetadataId {
        match self {
            Self::Itd(itd) => itd.id(),
            Self::Plural(plural) => plural.id(),
        }
    }

    /// Whether downstream consumers should be notified
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Itd(itd) => itd.is_valid(),
            Self::Plural(_) => true,
        }
    }

    #[must_use]
    pub fn as_itd(&self) -> Option<&ItdMetadata> {
        match self {
            Self::Itd(itd) => Some(itd),
            Self::Plural(_) => None,
        }
    }

    #[must_use]
    pub fn as_plural(&self) -> Option<&Arc<PluralMetadata>> {
        match self {
            Self::Plural(plural) => Some(plural),
            Self::Itd(_) => None,
        }
    }
}

/// One derivation engine, dispatched by metadata kind
pub trait MetadataProvider: Send + Sync + fmt::Debug {
    fn kind(&self) -> MetadataKind;

    /// Compute metadata for an instance-level id of this provider's kind
    ///
    /// `Ok(None)` means the provider's inputs are unavailable.
    ///
    /// # Errors
    /// Returns [`crate::ProviderError`] when a precondition is violated
    fn compute(&self, id: &MetadataId, ctx: &ProviderContext<'_>) -> Result<Option<ProvidedMetadata>>;
}

/// Supplies a provider's typed inputs for an instance id
pub trait InputResolver<I>: Send + Sync {
    fn resolve(&self, id: &MetadataId) -> Option<I>;
}

impl<I, F> InputResolver<I> for F
where
    F: Fn(&MetadataId) -> Option<I> + Send + Sync,
{
    fn resolve(&self, id: &MetadataId) -> Option<I> {
        self(id)
    }
}

/// Shared table of inputs keyed by metadata id
///
/// Hosts update entries as declarations change and then notify the engine.
#[derive(Debug)]
pub struct InputTable<I> {
    inputs: RwLock<IndexMap<MetadataId, I>>,
}

impl<I> Default for InputTable<I> {
    fn default() -> Self {
        Self {
            inputs: RwLock::new(IndexMap::new()),
        }
    }
}

impl<I: Clone> InputTable<I> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store inputs; returns the previous entry
    pub fn insert(&self, id: MetadataId, input: I) -> Option<I> {
        self.inputs.write().insert(id, input)
    }

    pub fn remove(&self, id: &MetadataId) -> Option<I> {
        self.inputs.write().shift_remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &MetadataId) -> Option<I> {
        self.inputs.read().get(id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inputs.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.read().is_empty()
    }
}

impl<I: Clone + Send + Sync> InputResolver<I> for InputTable<I> {
    fn resolve(&self, id: &MetadataId) -> Option<I> {
        self.get(id)
    }
}

/// Kind → provider dispatch
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: RwLock<IndexMap<MetadataKind, Arc<dyn MetadataProvider>>>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its kind; returns the one it replaced
    pub fn register(&self, provider: Arc<dyn MetadataProvider>) -> Option<Arc<dyn MetadataProvider>> {
        self.providers.write().insert(provider.kind(), provider)
    }

    pub fn deregister(&self, kind: &MetadataKind) -> Option<Arc<dyn MetadataProvider>> {
        self.providers.write().shift_remove(kind)
    }

    #[must_use]
    pub fn get(&self, kind: &MetadataKind) -> Option<Arc<dyn MetadataProvider>> {
        self.providers.read().get(kind).cloned()
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<MetadataKind> {
        self.providers.read().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.read().is_empty()
    }
}

/// Reject ids a provider of `kind` cannot compute
pub(crate) fn ensure_instance_of(kind: &MetadataKind, id: &MetadataId) -> Result<()> {
    if id.kind() != kind {
        return Err(ProviderError::wrong_kind(kind.tag(), id));
    }
    if !id.is_instance_level() {
        return Err(ProviderError::ClassLevel(id.to_string()));
    }
    Ok(())
}

/// Record `downstream`'s dependence on each upstream id
///
/// An edge that would close a cycle is logged and skipped; the computation
/// itself still proceeds.
pub fn register_upstream(ctx: &ProviderContext<'_>, upstream: &[MetadataId], downstream: &MetadataId) {
    for up in upstream {
        if let Err(e) = ctx.registry.register_dependency(up, downstream) {
            warn!(upstream = %up, %downstream, error = %e, "dependency not registered");
        }
    }
}
