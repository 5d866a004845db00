//! Synthetic member name allocation
//!
//! Candidates are probed in a fixed order: `base`, `base_`, `base__`, ...
//! A same-named member that is visible to subclasses or has the wrong shape
//! pushes the probe to the next candidate; a private member of exactly the
//! required shape is reused as-is, so a user can donate their own member.

use itd_builder::{FieldMetadata, FieldMetadataBuilder, MethodMetadata, Modifier};
use itd_model::{capitalize, JavaSymbolName, JavaType, MetadataId};
use tracing::warn;

/// Candidate name for probe `index`
#[must_use]
pub fn candidate_name(base: &str, index: usize) -> JavaSymbolName {
    JavaSymbolName::new(format!("{base}{}", "_".repeat(index)))
}

/// Outcome of field name resolution
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRef {
    /// A private field of the required type already exists
    Reused(JavaSymbolName),
    /// No field had the name; introduce this one
    Allocated(FieldMetadataBuilder),
}

impl FieldRef {
    /// Name the generated code refers to
    #[must_use]
    pub fn name(&self) -> &JavaSymbolName {
        match self {
            Self::Reused(name) => name,
            Self::Allocated(field) => field.field_name(),
        }
    }

    #[must_use]
    pub fn is_reused(&self) -> bool {
        matches!(self, Self::Reused(_))
    }

    /// The field to introduce, if one is needed
    #[must_use]
    pub fn into_allocated(self) -> Option<FieldMetadataBuilder> {
        match self {
            Self::Reused(_) => None,
            Self::Allocated(field) => Some(field),
        }
    }
}

/// Pick the field name for a synthetic field of `required_type`
///
/// A newly allocated field is private, declared by `declared_by` and gets
/// `initializer` when one is given.
#[must_use]
pub fn resolve_field_name(
    existing: &[FieldMetadata],
    declared_by: &MetadataId,
    base: &str,
    required_type: &JavaType,
    initializer: Option<&str>,
) -> FieldRef {
    for index in 0.. {
        let name = candidate_name(base, index);
        let Some(field) = existing.iter().find(|f| f.field_name() == &name) else {
            let mut builder =
                FieldMetadataBuilder::new(declared_by, Modifier::PRIVATE, name, required_type.clone());
            if let Some(init) = initializer {
                builder = builder.with_initializer(init);
            }
            return FieldRef::Allocated(builder);
        };

        if !field.modifier().is_private() {
            warn!(field = %name, "existing field is not private; probing next name");
            continue;
        }
        if field.field_type() != required_type {
            warn!(field = %name, found = %field.field_type(), required = %required_type, "existing field has another type; probing next name");
            continue;
        }
        return FieldRef::Reused(name);
    }
    unreachable!("every rejected candidate corresponds to a distinct existing field")
}

/// Outcome of method name resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodRef {
    /// A compatible method already exists under this name
    Reused(JavaSymbolName),
    /// The name is free for a generated method
    Free(JavaSymbolName),
}

impl MethodRef {
    #[must_use]
    pub fn name(&self) -> &JavaSymbolName {
        match self {
            Self::Reused(name) | Self::Free(name) => name,
        }
    }
}

/// Pick the name for a synthetic method with the given signature
///
/// Only a method with the same parameter types collides. It is reused when
/// it returns `return_type` and is not private, otherwise probing moves on.
#[must_use]
pub fn resolve_method_name(
    existing: &[MethodMetadata],
    base: &str,
    parameter_types: &[JavaType],
    return_type: &JavaType,
) -> MethodRef {
    for index in 0.. {
        let name = candidate_name(base, index);
        let Some(method) = existing.iter().find(|m| m.matches(&name, parameter_types)) else {
            return MethodRef::Free(name);
        };
        if method.modifier().is_private() || method.return_type() != return_type {
            warn!(method = %name, "existing method is incompatible; probing next name");
            continue;
        }
        return MethodRef::Reused(name);
    }
    unreachable!("every rejected candidate corresponds to a distinct existing method")
}

/// JavaBean accessor name: `isActive` for `boolean`, `getName` otherwise
#[must_use]
pub fn accessor_name(field: &JavaSymbolName, field_type: &JavaType) -> JavaSymbolName {
    let prefix = if field_type.is_primitive() && field_type.is_boolean() {
        "is"
    } else {
        "get"
    };
    JavaSymbolName::new(format!("{prefix}{}", capitalize(field.symbol_name())))
}

/// JavaBean mutator name: `setName`
#[must_use]
pub fn mutator_name(field: &JavaSymbolName) -> JavaSymbolName {
    JavaSymbolName::new(format!("set{}", capitalize(field.symbol_name())))
}
