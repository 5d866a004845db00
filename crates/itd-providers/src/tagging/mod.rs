//! Custom data tagging
//!
//! Components register matchers describing which fields, methods,
//! constructors and types deserve a tag. Providers then read tags instead of
//! re-deriving persistence facts from raw annotations.

mod decorator;
mod matchers;

pub use decorator::CustomDataKeyDecorator;
pub use matchers::{
    annotation_to_json, annotation_value_to_json, AnnotatedTypeMatcher, ConstructorMatcher,
    FieldMatcher, Matcher, MethodMatcher, NameSuffix,
};

use itd_model::{well_known, JavaType};

/// Custom data keys
pub mod keys {
    pub const COLUMN_FIELD: &str = "COLUMN_FIELD";
    pub const ENUMERATED_FIELD: &str = "ENUMERATED_FIELD";
    pub const ONE_TO_ONE_FIELD: &str = "ONE_TO_ONE_FIELD";
    pub const MANY_TO_ONE_FIELD: &str = "MANY_TO_ONE_FIELD";
    pub const IDENTIFIER_FIELD: &str = "IDENTIFIER_FIELD";
    pub const EMBEDDED_ID_FIELD: &str = "EMBEDDED_ID_FIELD";
    pub const EMBEDDED_FIELD: &str = "EMBEDDED_FIELD";
    pub const VERSION_FIELD: &str = "VERSION_FIELD";
    pub const TRANSIENT_FIELD: &str = "TRANSIENT_FIELD";
    pub const IDENTIFIER_ACCESSOR_METHOD: &str = "IDENTIFIER_ACCESSOR_METHOD";
    pub const VERSION_ACCESSOR_METHOD: &str = "VERSION_ACCESSOR_METHOD";
    pub const PERSISTENT_TYPE: &str = "PERSISTENT_TYPE";
    pub const IDENTIFIER_TYPE: &str = "IDENTIFIER_TYPE";
    pub const NO_ARG_CONSTRUCTOR: &str = "NO_ARG_CONSTRUCTOR";
}

/// Matchers for the JPA facts the bundled providers consume
#[must_use]
pub fn persistence_matchers() -> Vec<Matcher> {
    let id = FieldMatcher::new(keys::IDENTIFIER_FIELD, vec![well_known::ID.clone()]);
    let version = FieldMatcher::new(keys::VERSION_FIELD, vec![well_known::VERSION.clone()]);
    vec![
        FieldMatcher::new(keys::COLUMN_FIELD, vec![well_known::COLUMN.clone()]).into(),
        FieldMatcher::new(keys::ENUMERATED_FIELD, vec![well_known::ENUMERATED.clone()]).into(),
        FieldMatcher::new(keys::ONE_TO_ONE_FIELD, vec![well_known::ONE_TO_ONE.clone()]).into(),
        FieldMatcher::new(keys::MANY_TO_ONE_FIELD, vec![well_known::MANY_TO_ONE.clone()]).into(),
        FieldMatcher::new(keys::TRANSIENT_FIELD, vec![well_known::TRANSIENT.clone()]).into(),
        FieldMatcher::new(keys::EMBEDDED_ID_FIELD, vec![well_known::EMBEDDED_ID.clone()]).into(),
        FieldMatcher::new(keys::EMBEDDED_FIELD, vec![well_known::EMBEDDED.clone()]).into(),
        MethodMatcher::for_fields(keys::IDENTIFIER_ACCESSOR_METHOD, vec![id.clone()], true).into(),
        MethodMatcher::for_fields(keys::VERSION_ACCESSOR_METHOD, vec![version.clone()], true).into(),
        id.into(),
        version.into(),
        AnnotatedTypeMatcher::new(keys::PERSISTENT_TYPE, vec![JavaType::new("javax.persistence.Entity")]).into(),
        ConstructorMatcher::new(keys::NO_ARG_CONSTRUCTOR, Vec::new()).into(),
    ]
}
