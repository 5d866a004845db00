//! Identifier parsing errors

/// Errors raised while parsing or building identifiers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// Not a valid Java identifier
    #[error("invalid symbol name: '{0}'")]
    InvalidSymbol(String),

    /// Malformed type name (empty segment, trailing dot, unbalanced generics)
    #[error("invalid type name: '{0}'")]
    InvalidTypeName(String),

    /// Unknown path kind in a logical path
    #[error("unknown path kind: '{0}'")]
    UnknownPathKind(String),

    /// Metadata id without the `MID:` prefix
    #[error("metadata id '{0}' does not start with 'MID:'")]
    MissingPrefix(String),

    /// Metadata id with an empty kind tag
    #[error("metadata id '{0}' has an empty kind")]
    EmptyKind(String),

    /// Instance part is not `<path>?<type>`
    #[error("malformed instance key in metadata id '{id}': {reason}")]
    MalformedInstance { id: String, reason: String },
}

impl IdError {
    /// Create malformed instance error
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInstance {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias for identifier operations
pub type Result<T> = std::result::Result<T, IdError>;
