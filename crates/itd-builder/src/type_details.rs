//! Class, interface and enum type details
//!
//! [`TypeDetailsBuilder`] owns every member builder of one type and produces
//! an immutable [`ClassOrInterfaceTypeDetails`] snapshot.

use crate::annotation::{find_annotation, AnnotationMetadata, AnnotationMetadataBuilder};
use crate::custom_data::CustomData;
use crate::error::{BuilderError, Result};
use crate::field::{FieldMetadata, FieldMetadataBuilder};
use crate::imports::ImportRegistrationResolver;
use crate::method::{
    ConstructorMetadata, ConstructorMetadataBuilder, InitializerMetadata,
    InitializerMetadataBuilder, MethodMetadata, MethodMetadataBuilder,
};
use crate::modifier::Modifier;
use itd_model::{JavaSymbolName, JavaType, MetadataId};

/// Kind of type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhysicalTypeCategory {
    #[default]
    Class,
    Interface,
    Enumeration,
    Annotation,
}

impl PhysicalTypeCategory {
    /// Declaration keyword
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enumeration => "enum",
            Self::Annotation => "@interface",
        }
    }
}

/// Immutable type declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ClassOrInterfaceTypeDetails {
    declared_by: MetadataId,
    name: JavaType,
    modifier: Modifier,
    category: PhysicalTypeCategory,
    annotations: Vec<AnnotationMetadata>,
    extends_types: Vec<JavaType>,
    implements_types: Vec<JavaType>,
    fields: Vec<FieldMetadata>,
    constructors: Vec<ConstructorMetadata>,
    methods: Vec<MethodMetadata>,
    initializers: Vec<InitializerMetadata>,
    inner_types: Vec<ClassOrInterfaceTypeDetails>,
    enum_constants: Vec<JavaSymbolName>,
    custom_data: CustomData,
    registered_imports: Vec<JavaType>,
}

impl ClassOrInterfaceTypeDetails {
    #[inline]
    #[must_use]
    pub fn declared_by(&self) -> &MetadataId {
        &self.declared_by
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &JavaType {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn modifier(&self) -> Modifier {
        self.modifier
    }

    #[inline]
    #[must_use]
    pub fn category(&self) -> PhysicalTypeCategory {
        self.category
    }

    #[inline]
    #[must_use]
    pub fn annotations(&self) -> &[AnnotationMetadata] {
        &self.annotations
    }

    #[must_use]
    pub fn annotation(&self, annotation_type: &JavaType) -> Option<&AnnotationMetadata> {
        find_annotation(&self.annotations, annotation_type)
    }

    #[inline]
    #[must_use]
    pub fn extends_types(&self) -> &[JavaType] {
        &self.extends_types
    }

    #[inline]
    #[must_use]
    pub fn implements_types(&self) -> &[JavaType] {
        &self.implements_types
    }

    #[inline]
    #[must_use]
    pub fn declared_fields(&self) -> &[FieldMetadata] {
        &self.fields
    }

    #[inline]
    #[must_use]
    pub fn declared_constructors(&self) -> &[ConstructorMetadata] {
        &self.constructors
    }

    #[inline]
    #[must_use]
    pub fn declared_methods(&self) -> &[MethodMetadata] {
        &self.methods
    }

    #[inline]
    #[must_use]
    pub fn declared_initializers(&self) -> &[InitializerMetadata] {
        &self.initializers
    }

    #[inline]
    #[must_use]
    pub fn inner_types(&self) -> &[ClassOrInterfaceTypeDetails] {
        &self.inner_types
    }

    #[inline]
    #[must_use]
    pub fn enum_constants(&self) -> &[JavaSymbolName] {
        &self.enum_constants
    }

    #[inline]
    #[must_use]
    pub fn custom_data(&self) -> &CustomData {
        &self.custom_data
    }

    /// Imports registered while the type was built
    #[inline]
    #[must_use]
    pub fn registered_imports(&self) -> &[JavaType] {
        &self.registered_imports
    }

    #[must_use]
    pub fn declared_field(&self, name: &JavaSymbolName) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.field_name() == name)
    }

    #[must_use]
    pub fn declared_constructor(&self, parameter_types: &[JavaType]) -> Option<&ConstructorMetadata> {
        self.constructors.iter().find(|c| c.matches(parameter_types))
    }

    #[must_use]
    pub fn method(&self, name: &JavaSymbolName, parameter_types: &[JavaType]) -> Option<&MethodMetadata> {
        self.methods.iter().find(|m| m.matches(name, parameter_types))
    }

    #[must_use]
    pub fn has_method_named(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.method_name().symbol_name() == name)
    }

    #[inline]
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.category == PhysicalTypeCategory::Enumeration
    }
}

/// Mutable type declaration
#[derive(Debug, Clone)]
pub struct TypeDetailsBuilder {
    declared_by: MetadataId,
    name: JavaType,
    modifier: Modifier,
    category: PhysicalTypeCategory,
    annotations: Vec<AnnotationMetadataBuilder>,
    extends_types: Vec<JavaType>,
    implements_types: Vec<JavaType>,
    fields: Vec<FieldMetadataBuilder>,
    constructors: Vec<ConstructorMetadataBuilder>,
    methods: Vec<MethodMetadataBuilder>,
    initializers: Vec<InitializerMetadataBuilder>,
    inner_types: Vec<TypeDetailsBuilder>,
    enum_constants: Vec<JavaSymbolName>,
    custom_data: CustomData,
    imports: ImportRegistrationResolver,
}

impl TypeDetailsBuilder {
    #[must_use]
    pub fn new(
        declared_by: &MetadataId,
        modifier: Modifier,
        name: JavaType,
        category: PhysicalTypeCategory,
    ) -> Self {
        Self {
            declared_by: declared_by.clone(),
            imports: ImportRegistrationResolver::for_type(&name),
            name,
            modifier,
            category,
            annotations: Vec::new(),
            extends_types: Vec::new(),
            implements_types: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            initializers: Vec::new(),
            inner_types: Vec::new(),
            enum_constants: Vec::new(),
            custom_data: CustomData::new(),
        }
    }

    /// Builder seeded from an existing type, for incremental edits
    #[must_use]
    pub fn from_existing(existing: &ClassOrInterfaceTypeDetails) -> Self {
        let mut imports = ImportRegistrationResolver::for_type(&existing.name);
        for import in &existing.registered_imports {
            imports.add_import(import);
        }
        Self {
            declared_by: existing.declared_by.clone(),
            name: existing.name.clone(),
            modifier: existing.modifier,
            category: existing.category,
            annotations: existing
                .annotations
                .iter()
                .map(AnnotationMetadataBuilder::from_existing)
                .collect(),
            extends_types: existing.extends_types.clone(),
            implements_types: existing.implements_types.clone(),
            fields: existing.fields.iter().map(FieldMetadataBuilder::from_existing).collect(),
            constructors: existing
                .constructors
                .iter()
                .map(ConstructorMetadataBuilder::from_existing)
                .collect(),
            methods: existing.methods.iter().map(MethodMetadataBuilder::from_existing).collect(),
            initializers: existing
                .initializers
                .iter()
                .map(InitializerMetadataBuilder::from_existing)
                .collect(),
            inner_types: existing.inner_types.iter().map(Self::from_existing).collect(),
            enum_constants: existing.enum_constants.clone(),
            custom_data: existing.custom_data.clone(),
            imports,
        }
    }

    #[inline]
    #[must_use]
    pub fn declared_by(&self) -> &MetadataId {
        &self.declared_by
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &JavaType {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn category(&self) -> PhysicalTypeCategory {
        self.category
    }

    pub fn set_modifier(&mut self, modifier: Modifier) -> &mut Self {
        self.modifier = modifier;
        self
    }

    /// Add a field
    ///
    /// # Errors
    /// Returns [`BuilderError::DuplicateMember`] if a field with that name exists
    pub fn add_field(&mut self, field: FieldMetadataBuilder) -> Result<()> {
        if self.declared_field(field.field_name()).is_some() {
            return Err(self.duplicate(field.field_name().symbol_name()));
        }
        self.fields.push(field);
        Ok(())
    }

    /// Add a constructor
    ///
    /// # Errors
    /// Returns [`BuilderError::DuplicateMember`] if one with the same parameter types exists
    pub fn add_constructor(&mut self, constructor: ConstructorMetadataBuilder) -> Result<()> {
        if self.has_constructor(&constructor.parameter_types()) {
            return Err(self.duplicate(format!("{}()", self.name.simple_type_name())));
        }
        self.constructors.push(constructor);
        Ok(())
    }

    /// Add a method
    ///
    /// # Errors
    /// Returns [`BuilderError::DuplicateMember`] if one with the same signature exists
    pub fn add_method(&mut self, method: MethodMetadataBuilder) -> Result<()> {
        if self.has_method(method.method_name(), &method.parameter_types()) {
            return Err(self.duplicate(format!("{}()", method.method_name())));
        }
        self.methods.push(method);
        Ok(())
    }

    pub fn add_initializer(&mut self, initializer: InitializerMetadataBuilder) {
        self.initializers.push(initializer);
    }

    pub fn add_inner_type(&mut self, inner: TypeDetailsBuilder) {
        self.inner_types.push(inner);
    }

    /// Add an enum constant
    ///
    /// # Errors
    /// Returns [`BuilderError::NotAnEnum`] for non-enum types and
    /// [`BuilderError::DuplicateEnumConstant`] when the constant exists
    pub fn add_enum_constant(&mut self, constant: JavaSymbolName) -> Result<()> {
        if self.category != PhysicalTypeCategory::Enumeration {
            return Err(BuilderError::NotAnEnum(self.name.to_string()));
        }
        if self.enum_constants.contains(&constant) {
            return Err(BuilderError::DuplicateEnumConstant {
                type_name: self.name.to_string(),
                constant: constant.to_string(),
            });
        }
        self.enum_constants.push(constant);
        Ok(())
    }

    /// Add an annotation unless one of the same type exists
    pub fn add_annotation(&mut self, annotation: AnnotationMetadataBuilder) -> bool {
        if self.annotation(annotation.annotation_type()).is_some() {
            return false;
        }
        self.annotations.push(annotation);
        true
    }

    pub fn remove_annotation(&mut self, annotation_type: &JavaType) -> bool {
        let before = self.annotations.len();
        self.annotations
            .retain(|a| a.annotation_type() != annotation_type);
        before != self.annotations.len()
    }

    /// Merge `annotation` into the type's annotation of the same type
    ///
    /// Returns whether anything changed. An unchanged annotation is left
    /// untouched; a changed one is replaced at its original position.
    pub fn update_type_annotation(
        &mut self,
        annotation: AnnotationMetadataBuilder,
        attributes_to_delete: &[&str],
    ) -> bool {
        let Some(index) = self
            .annotations
            .iter()
            .position(|a| a.annotation_type() == annotation.annotation_type())
        else {
            self.annotations.push(annotation);
            return true;
        };

        let existing = &self.annotations[index];
        let mut merged = AnnotationMetadataBuilder::new(existing.annotation_type());
        let mut changed = false;

        for attribute in existing.attributes() {
            if attributes_to_delete.contains(&attribute.name.as_str()) {
                changed = true;
                continue;
            }
            match annotation.attributes().iter().find(|a| a.name == attribute.name) {
                Some(proposed) if proposed.value != attribute.value => {
                    merged.add_attribute(proposed.clone());
                    changed = true;
                }
                _ => {
                    merged.add_attribute(attribute.clone());
                }
            }
        }

        for proposed in annotation.attributes() {
            let known = existing.attributes().iter().any(|a| a.name == proposed.name);
            if !known && !attributes_to_delete.contains(&proposed.name.as_str()) {
                merged.add_attribute(proposed.clone());
                changed = true;
            }
        }

        if changed {
            self.annotations[index] = merged;
        }
        changed
    }

    /// Add a supertype; duplicates are ignored
    pub fn add_extends(&mut self, java_type: JavaType) -> bool {
        if self.extends_types.contains(&java_type) {
            return false;
        }
        self.extends_types.push(java_type);
        true
    }

    /// Add an implemented interface; duplicates are ignored
    pub fn add_implements(&mut self, java_type: JavaType) -> bool {
        if self.implements_types.contains(&java_type) {
            return false;
        }
        self.implements_types.push(java_type);
        true
    }

    pub fn add_import(&mut self, java_type: &JavaType) {
        self.imports.add_import(java_type);
    }

    /// Source name of `java_type` in this unit, registering its import
    pub fn name_of(&mut self, java_type: &JavaType) -> String {
        self.imports.name_of(java_type)
    }

    pub fn imports_mut(&mut self) -> &mut ImportRegistrationResolver {
        &mut self.imports
    }

    pub fn custom_data_mut(&mut self) -> &mut CustomData {
        &mut self.custom_data
    }

    pub fn fields_mut(&mut self) -> &mut [FieldMetadataBuilder] {
        &mut self.fields
    }

    pub fn methods_mut(&mut self) -> &mut [MethodMetadataBuilder] {
        &mut self.methods
    }

    pub fn constructors_mut(&mut self) -> &mut [ConstructorMetadataBuilder] {
        &mut self.constructors
    }

    #[must_use]
    pub fn declared_field(&self, name: &JavaSymbolName) -> Option<&FieldMetadataBuilder> {
        self.fields.iter().find(|f| f.field_name() == name)
    }

    #[must_use]
    pub fn has_method(&self, name: &JavaSymbolName, parameter_types: &[JavaType]) -> bool {
        self.methods.iter().any(|m| m.matches(name, parameter_types))
    }

    #[must_use]
    pub fn has_constructor(&self, parameter_types: &[JavaType]) -> bool {
        self.constructors.iter().any(|c| c.matches(parameter_types))
    }

    #[must_use]
    pub fn annotation(&self, annotation_type: &JavaType) -> Option<&AnnotationMetadataBuilder> {
        self.annotations
            .iter()
            .find(|a| a.annotation_type() == annotation_type)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
            && self.constructors.is_empty()
            && self.methods.is_empty()
            && self.initializers.is_empty()
            && self.inner_types.is_empty()
            && self.annotations.is_empty()
            && self.extends_types.is_empty()
            && self.implements_types.is_empty()
    }

    fn duplicate(&self, member: impl Into<String>) -> BuilderError {
        BuilderError::DuplicateMember {
            type_name: self.name.to_string(),
            member: member.into(),
        }
    }

    /// Snapshot the type and every member
    ///
    /// # Errors
    /// Returns [`BuilderError::ClassLevelDeclarer`] if the type or any member
    /// is declared by a class-level id
    pub fn build(&self) -> Result<ClassOrInterfaceTypeDetails> {
        if self.declared_by.is_class_level() {
            return Err(BuilderError::class_level(self.name.to_string(), &self.declared_by));
        }
        Ok(ClassOrInterfaceTypeDetails {
            declared_by: self.declared_by.clone(),
            name: self.name.clone(),
            modifier: self.modifier,
            category: self.category,
            annotations: self.annotations.iter().map(AnnotationMetadataBuilder::build).collect(),
            extends_types: self.extends_types.clone(),
            implements_types: self.implements_types.clone(),
            fields: self.fields.iter().map(FieldMetadataBuilder::build).collect::<Result<_>>()?,
            constructors: self
                .constructors
                .iter()
                .map(ConstructorMetadataBuilder::build)
                .collect::<Result<_>>()?,
            methods: self.methods.iter().map(MethodMetadataBuilder::build).collect::<Result<_>>()?,
            initializers: self
                .initializers
                .iter()
                .map(InitializerMetadataBuilder::build)
                .collect::<Result<_>>()?,
            inner_types: self.inner_types.iter().map(Self::build).collect::<Result<_>>()?,
            enum_constants: self.enum_constants.clone(),
            custom_data: self.custom_data.clone(),
            registered_imports: self.imports.imports(),
        })
    }
}
