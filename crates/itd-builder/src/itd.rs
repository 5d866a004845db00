//! Introduction units
//!
//! An introduction unit contributes members, supertypes and type
//! annotations to a governor type without touching the governor's source.
//! [`ItdTypeDetailsBuilder`] skips anything the governor already declares,
//! so a user can take over a generated member by writing it by hand.

use crate::annotation::AnnotationMetadataBuilder;
use crate::error::Result;
use crate::field::FieldMetadataBuilder;
use crate::method::{ConstructorMetadataBuilder, MethodMetadataBuilder};
use crate::modifier::Modifier;
use crate::type_details::{ClassOrInterfaceTypeDetails, TypeDetailsBuilder};
use itd_model::{JavaType, MetadataId};
use tracing::debug;

const ASPECT_INFIX: &str = "_Roo_";

/// Immutable introduction unit
#[derive(Debug, Clone, PartialEq)]
pub struct ItdTypeDetails {
    declared_by: MetadataId,
    aspect: JavaType,
    governor: ClassOrInterfaceTypeDetails,
    privileged: bool,
    members: ClassOrInterfaceTypeDetails,
}

impl ItdTypeDetails {
    /// Aspect type for `governor` and `suffix` (`Person_Roo_Editor`)
    #[must_use]
    pub fn aspect_name(governor: &JavaType, suffix: &str) -> JavaType {
        JavaType::new(format!(
            "{}{ASPECT_INFIX}{suffix}",
            governor.fully_qualified_type_name()
        ))
    }

    #[inline]
    #[must_use]
    pub fn declared_by(&self) -> &MetadataId {
        &self.declared_by
    }

    #[inline]
    #[must_use]
    pub fn aspect(&self) -> &JavaType {
        &self.aspect
    }

    /// Governor snapshot the unit was computed against
    #[inline]
    #[must_use]
    pub fn governor(&self) -> &ClassOrInterfaceTypeDetails {
        &self.governor
    }

    #[inline]
    #[must_use]
    pub fn is_privileged(&self) -> bool {
        self.privileged
    }

    /// Introduced members; annotations are `declare @type`, supertypes are `declare parents`
    #[inline]
    #[must_use]
    pub fn members(&self) -> &ClassOrInterfaceTypeDetails {
        &self.members
    }

    /// Nothing introduced
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let m = &self.members;
        m.declared_fields().is_empty()
            && m.declared_methods().is_empty()
            && m.declared_constructors().is_empty()
            && m.declared_initializers().is_empty()
            && m.inner_types().is_empty()
            && m.annotations().is_empty()
            && m.extends_types().is_empty()
            && m.implements_types().is_empty()
    }
}

/// Introduction unit under construction
#[derive(Debug, Clone)]
pub struct ItdTypeDetailsBuilder {
    declared_by: MetadataId,
    aspect: JavaType,
    governor: ClassOrInterfaceTypeDetails,
    privileged: bool,
    members: TypeDetailsBuilder,
}

impl ItdTypeDetailsBuilder {
    #[must_use]
    pub fn new(
        declared_by: &MetadataId,
        governor: &ClassOrInterfaceTypeDetails,
        aspect: JavaType,
        privileged: bool,
    ) -> Self {
        // the aspect lives in the governor's package, so imports resolve against the governor
        let members = TypeDetailsBuilder::new(
            declared_by,
            Modifier::NONE,
            governor.name().clone(),
            governor.category(),
        );
        Self {
            declared_by: declared_by.clone(),
            aspect,
            governor: governor.clone(),
            privileged,
            members,
        }
    }

    #[inline]
    #[must_use]
    pub fn declared_by(&self) -> &MetadataId {
        &self.declared_by
    }

    #[inline]
    #[must_use]
    pub fn governor(&self) -> &ClassOrInterfaceTypeDetails {
        &self.governor
    }

    /// Introduce a field unless the governor or this unit already has it
    pub fn add_field(&mut self, field: FieldMetadataBuilder) -> bool {
        if self.governor.declared_field(field.field_name()).is_some()
            || self.members.declared_field(field.field_name()).is_some()
        {
            debug!(field = %field.field_name(), governor = %self.governor.name(), "field already declared");
            return false;
        }
        self.members.add_field(field).is_ok()
    }

    /// Introduce a method unless the governor or this unit already has it
    pub fn add_method(&mut self, method: MethodMetadataBuilder) -> bool {
        let params = method.parameter_types();
        if self.governor.method(method.method_name(), &params).is_some()
            || self.members.has_method(method.method_name(), &params)
        {
            debug!(method = %method.method_name(), governor = %self.governor.name(), "method already declared");
            return false;
        }
        self.members.add_method(method).is_ok()
    }

    /// Introduce a constructor unless one with the same parameters exists
    pub fn add_constructor(&mut self, constructor: ConstructorMetadataBuilder) -> bool {
        let params = constructor.parameter_types();
        if self.governor.declared_constructor(&params).is_some()
            || self.members.has_constructor(&params)
        {
            return false;
        }
        self.members.add_constructor(constructor).is_ok()
    }

    /// `declare @type` unless the governor is already annotated
    pub fn add_annotation(&mut self, annotation: AnnotationMetadataBuilder) -> bool {
        if self.governor.annotation(annotation.annotation_type()).is_some() {
            return false;
        }
        self.members.add_annotation(annotation)
    }

    /// `declare parents: G extends T` unless the governor already extends `T`
    pub fn add_extends_type(&mut self, java_type: JavaType) -> bool {
        if self.governor.extends_types().contains(&java_type) {
            return false;
        }
        self.members.add_extends(java_type)
    }

    /// `declare parents: G implements T` unless the governor already implements `T`
    pub fn add_implements_type(&mut self, java_type: JavaType) -> bool {
        if self.governor.implements_types().contains(&java_type) {
            return false;
        }
        self.members.add_implements(java_type)
    }

    pub fn add_inner_type(&mut self, inner: TypeDetailsBuilder) {
        self.members.add_inner_type(inner);
    }

    pub fn add_import(&mut self, java_type: &JavaType) {
        self.members.add_import(java_type);
    }

    /// Source name of `java_type` inside the unit, registering its import
    pub fn name_of(&mut self, java_type: &JavaType) -> String {
        self.members.name_of(java_type)
    }

    #[inline]
    #[must_use]
    pub fn members(&self) -> &TypeDetailsBuilder {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut TypeDetailsBuilder {
        &mut self.members
    }

    /// Snapshot the unit
    ///
    /// # Errors
    /// Returns an error if any member is declared by a class-level id
    pub fn build(&self) -> Result<ItdTypeDetails> {
        Ok(ItdTypeDetails {
            declared_by: self.declared_by.clone(),
            aspect: self.aspect.clone(),
            governor: self.governor.clone(),
            privileged: self.privileged,
            members: self.members.build()?,
        })
    }
}
