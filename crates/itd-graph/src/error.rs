//! Dependency graph errors

/// Errors raised by dependency registration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An id cannot depend on itself
    #[error("self dependency rejected for {0}")]
    SelfLoop(String),

    /// Registering the edge would close a cycle
    #[error("dependency {upstream} -> {downstream} would create a cycle")]
    CycleDetected { upstream: String, downstream: String },
}

impl GraphError {
    /// Create cycle error for an edge
    pub fn cycle(upstream: &itd_model::MetadataId, downstream: &itd_model::MetadataId) -> Self {
        Self::CycleDetected {
            upstream: upstream.to_string(),
            downstream: downstream.to_string(),
        }
    }
}

/// Result alias for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;
