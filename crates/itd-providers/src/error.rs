//! Provider errors
//!
//! Only violated preconditions are errors. A provider whose optional
//! collaborators are missing returns an invalid result instead.

use itd_builder::BuilderError;
use itd_model::MetadataId;

/// Errors raised while computing metadata
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Required input missing or contradictory
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// Providers compute concrete instances only
    #[error("cannot compute class-level id {0}")]
    ClassLevel(String),

    /// Id handed to a provider of another kind
    #[error("provider for '{expected}' cannot compute {id}")]
    WrongKind { expected: String, id: String },

    #[error(transparent)]
    Builder(#[from] BuilderError),
}

impl ProviderError {
    /// Create precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Create wrong kind error
    pub fn wrong_kind(expected: &str, id: &MetadataId) -> Self {
        Self::WrongKind {
            expected: expected.to_string(),
            id: id.to_string(),
        }
    }
}

/// Result alias for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;
