//! Builder errors

/// Errors raised while building or mutating structural models
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    /// Members must be declared by a concrete metadata instance
    #[error("member '{member}' is declared by class-level id '{id}'")]
    ClassLevelDeclarer { member: String, id: String },

    /// Enum constant added twice
    #[error("enum constant '{constant}' already exists in {type_name}")]
    DuplicateEnumConstant { type_name: String, constant: String },

    /// Enum constants are only valid on enumerations
    #[error("{0} is not an enum")]
    NotAnEnum(String),

    /// Member already present in the builder
    #[error("duplicate member '{member}' in {type_name}")]
    DuplicateMember { type_name: String, member: String },
}

impl BuilderError {
    /// Create class-level declarer error
    pub fn class_level(member: impl Into<String>, id: &itd_model::MetadataId) -> Self {
        Self::ClassLevelDeclarer {
            member: member.into(),
            id: id.to_string(),
        }
    }
}

/// Result alias for builder operations
pub type Result<T> = std::result::Result<T, BuilderError>;
