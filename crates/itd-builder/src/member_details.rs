//! Combined member view of a type across its declarations

use crate::annotation::AnnotationMetadata;
use crate::field::FieldMetadata;
use crate::method::{ConstructorMetadata, MethodMetadata};
use crate::type_details::ClassOrInterfaceTypeDetails;
use itd_model::{JavaSymbolName, JavaType};

/// Members of a type gathered from the governor and its introduction units
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemberDetails {
    details: Vec<ClassOrInterfaceTypeDetails>,
}

impl MemberDetails {
    #[must_use]
    pub fn new(details: Vec<ClassOrInterfaceTypeDetails>) -> Self {
        Self { details }
    }

    #[inline]
    #[must_use]
    pub fn details(&self) -> &[ClassOrInterfaceTypeDetails] {
        &self.details
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldMetadata> {
        self.details.iter().flat_map(ClassOrInterfaceTypeDetails::declared_fields)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodMetadata> {
        self.details.iter().flat_map(ClassOrInterfaceTypeDetails::declared_methods)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorMetadata> {
        self.details.iter().flat_map(ClassOrInterfaceTypeDetails::declared_constructors)
    }

    /// First type-level annotation of this type across all declarations
    #[must_use]
    pub fn annotation(&self, annotation_type: &JavaType) -> Option<&AnnotationMetadata> {
        self.details.iter().find_map(|d| d.annotation(annotation_type))
    }

    #[must_use]
    pub fn field(&self, name: &JavaSymbolName) -> Option<&FieldMetadata> {
        self.details.iter().find_map(|d| d.declared_field(name))
    }

    #[must_use]
    pub fn method(&self, name: &JavaSymbolName, parameter_types: &[JavaType]) -> Option<&MethodMetadata> {
        self.details.iter().find_map(|d| d.method(name, parameter_types))
    }

    /// Fields carrying the custom data tag `key`
    pub fn fields_with_tag<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a FieldMetadata> + 'a {
        self.fields().filter(move |f| f.custom_data().contains(key))
    }

    /// Methods carrying the custom data tag `key`
    pub fn methods_with_tag<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a MethodMetadata> + 'a {
        self.methods().filter(move |m| m.custom_data().contains(key))
    }

    /// Any declaration tagged with `key` at type level
    #[must_use]
    pub fn has_type_tag(&self, key: &str) -> bool {
        self.details.iter().any(|d| d.custom_data().contains(key))
    }
}
