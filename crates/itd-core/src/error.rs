//! Error types for the engine context
//!
//! Component errors convert into [`EngineError`] so a notification cycle
//! can propagate whatever aborted it with `?`.

use itd_builder::BuilderError;
use itd_graph::GraphError;
use itd_model::{IdError, MetadataId};
use itd_providers::ProviderError;
use itd_roundtrip::RoundTripError;

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Identifier could not be parsed
    #[error("identifier error: {0}")]
    Id(#[from] IdError),

    /// Structural model rejected a member
    #[error("builder error: {0}")]
    Builder(#[from] BuilderError),

    /// Dependency edge rejected
    #[error("dependency error: {0}")]
    Graph(#[from] GraphError),

    /// Provider precondition failed
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// File or XML failure
    #[error("round-trip error: {0}")]
    RoundTrip(#[from] RoundTripError),

    /// Only instance-level ids have a computed value
    #[error("class-level id cannot be computed: {0}")]
    ClassLevelRequest(String),

    /// No provider registered for the id's kind
    #[error("no provider for {0}")]
    NoProvider(String),

    /// Notification reached an id already handled in this cycle
    #[error("notification cycle at {id}")]
    NotificationCycle { id: String },

    /// Fan-out exceeded the configured depth
    #[error("notification depth {depth} exceeded at {id}")]
    NotificationDepthExceeded { depth: usize, id: String },

    /// Notification cannot be resolved to an instance
    #[error("cannot deliver {upstream} to {downstream}")]
    InvalidNotification { upstream: String, downstream: String },

    /// Type is not known to the type management service
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Create cycle error
    pub fn cycle(id: &MetadataId) -> Self {
        Self::NotificationCycle { id: id.to_string() }
    }

    /// Create depth error
    pub fn depth_exceeded(depth: usize, id: &MetadataId) -> Self {
        Self::NotificationDepthExceeded {
            depth,
            id: id.to_string(),
        }
    }

    /// Create undeliverable notification error
    pub fn invalid_notification(upstream: &MetadataId, downstream: &MetadataId) -> Self {
        Self::InvalidNotification {
            upstream: upstream.to_string(),
            downstream: downstream.to_string(),
        }
    }

    /// Whether the error came from a violated provider precondition
    #[inline]
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Provider(ProviderError::Precondition(_)))
    }
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use itd_model::MetadataKind;

    #[test]
    fn component_errors_convert() {
        let err: EngineError = ProviderError::precondition("@Max below @Min").into();
        assert!(err.is_precondition());
        assert_eq!(err.to_string(), "provider error: precondition violated: @Max below @Min");

        let io = RoundTripError::io_error("a.aj", std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        let err: EngineError = io.into();
        assert!(!err.is_precondition());
        assert!(matches!(err, EngineError::RoundTrip(_)));
    }

    #[test]
    fn guard_errors_name_the_id() {
        let id = MetadataId::class_level(MetadataKind::DataOnDemand);
        assert_eq!(EngineError::cycle(&id).to_string(), format!("notification cycle at {id}"));
        assert!(EngineError::depth_exceeded(3, &id).to_string().starts_with("notification depth 3 exceeded"));
    }
}
