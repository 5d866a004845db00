//! Methods, constructors and their parameters

use crate::annotation::{find_annotation, AnnotationMetadata, AnnotationMetadataBuilder};
use crate::custom_data::CustomData;
use crate::error::{BuilderError, Result};
use crate::modifier::Modifier;
use itd_model::{JavaSymbolName, JavaType, MetadataId};

/// One formal parameter
#[derive(Debug, Clone, PartialEq)]
pub struct MethodParameter {
    pub java_type: JavaType,
    pub name: JavaSymbolName,
    pub annotations: Vec<AnnotationMetadata>,
}

impl MethodParameter {
    #[must_use]
    pub fn new(java_type: JavaType, name: impl Into<String>) -> Self {
        Self {
            java_type,
            name: JavaSymbolName::new(name),
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn annotated(mut self, annotation: AnnotationMetadata) -> Self {
        self.annotations.push(annotation);
        self
    }
}

fn types_of(parameters: &[MethodParameter]) -> Vec<JavaType> {
    parameters.iter().map(|p| p.java_type.clone()).collect()
}

fn same_types(parameters: &[MethodParameter], types: &[JavaType]) -> bool {
    parameters.len() == types.len()
        && parameters.iter().zip(types).all(|(p, t)| &p.java_type == t)
}

/// Immutable method
#[derive(Debug, Clone, PartialEq)]
pub struct MethodMetadata {
    declared_by: MetadataId,
    modifier: Modifier,
    annotations: Vec<AnnotationMetadata>,
    method_name: JavaSymbolName,
    return_type: JavaType,
    parameters: Vec<MethodParameter>,
    throws: Vec<JavaType>,
    body: Option<String>,
    custom_data: CustomData,
}

impl MethodMetadata {
    #[inline]
    #[must_use]
    pub fn declared_by(&self) -> &MetadataId {
        &self.declared_by
    }

    #[inline]
    #[must_use]
    pub fn modifier(&self) -> Modifier {
        self.modifier
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
    pub fn method_name(&self) -> &JavaSymbolName {
        &self.method_name
    }

    #[inline]
    #[must_use]
    pub fn return_type(&self) -> &JavaType {
        &self.return_type
    }

    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[MethodParameter] {
        &self.parameters
    }

    #[must_use]
    pub fn parameter_types(&self) -> Vec<JavaType> {
        types_of(&self.parameters)
    }

    #[inline]
    #[must_use]
    pub fn throws(&self) -> &[JavaType] {
        &self.throws
    }

    /// Body text; `None` for abstract declarations
    #[inline]
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn custom_data(&self) -> &CustomData {
        &self.custom_data
    }

    /// Same name and parameter types
    #[must_use]
    pub fn matches(&self, name: &JavaSymbolName, parameter_types: &[JavaType]) -> bool {
        &self.method_name == name && same_types(&self.parameters, parameter_types)
    }

    /// Copy with additional custom data tags
    #[must_use]
    pub fn with_custom_data(&self, extra: &CustomData) -> Self {
        let mut method = self.clone();
        method.custom_data.merge(extra);
        method
    }
}

/// Method under construction
#[derive(Debug, Clone, PartialEq)]
pub struct MethodMetadataBuilder {
    declared_by: MetadataId,
    modifier: Modifier,
    annotations: Vec<AnnotationMetadataBuilder>,
    method_name: JavaSymbolName,
    return_type: JavaType,
    parameters: Vec<MethodParameter>,
    throws: Vec<JavaType>,
    body: Option<String>,
    custom_data: CustomData,
}

impl MethodMetadataBuilder {
    #[must_use]
    pub fn new(
        declared_by: &MetadataId,
        modifier: Modifier,
        method_name: JavaSymbolName,
        return_type: JavaType,
        body: impl Into<String>,
    ) -> Self {
        Self {
            declared_by: declared_by.clone(),
            modifier,
            annotations: Vec::new(),
            method_name,
            return_type,
            parameters: Vec::new(),
            throws: Vec::new(),
            body: Some(body.into()),
            custom_data: CustomData::new(),
        }
    }

    /// Builder for editing an existing method
    #[must_use]
    pub fn from_existing(existing: &MethodMetadata) -> Self {
        Self {
            declared_by: existing.declared_by.clone(),
            modifier: existing.modifier,
            annotations: existing
                .annotations
                .iter()
                .map(AnnotationMetadataBuilder::from_existing)
                .collect(),
            method_name: existing.method_name.clone(),
            return_type: existing.return_type.clone(),
            parameters: existing.parameters.clone(),
            throws: existing.throws.clone(),
            body: existing.body.clone(),
            custom_data: existing.custom_data.clone(),
        }
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<MethodParameter>) -> Self {
        self.parameters = parameters;
        self
    }

    #[must_use]
    pub fn with_throws(mut self, throws: Vec<JavaType>) -> Self {
        self.throws = throws;
        self
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<AnnotationMetadataBuilder>) -> Self {
        self.annotations = annotations;
        self
    }

    /// Abstract declaration without a body
    #[must_use]
    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn add_annotation(&mut self, annotation: AnnotationMetadataBuilder) -> &mut Self {
        self.annotations.push(annotation);
        self
    }

    pub fn add_parameter(&mut self, parameter: MethodParameter) -> &mut Self {
        self.parameters.push(parameter);
        self
    }

    pub fn custom_data_mut(&mut self) -> &mut CustomData {
        &mut self.custom_data
    }

    #[inline]
    #[must_use]
    pub fn method_name(&self) -> &JavaSymbolName {
        &self.method_name
    }

    #[inline]
    #[must_use]
    pub fn return_type(&self) -> &JavaType {
        &self.return_type
    }

    #[must_use]
    pub fn parameter_types(&self) -> Vec<JavaType> {
        types_of(&self.parameters)
    }

    #[must_use]
    pub fn matches(&self, name: &JavaSymbolName, parameter_types: &[JavaType]) -> bool {
        &self.method_name == name && same_types(&self.parameters, parameter_types)
    }

    /// Snapshot this method
    ///
    /// # Errors
    /// Returns [`BuilderError::ClassLevelDeclarer`] if declared by a class-level id
    pub fn build(&self) -> Result<MethodMetadata> {
        if self.declared_by.is_class_level() {
            return Err(BuilderError::class_level(
                self.method_name.symbol_name(),
                &self.declared_by,
            ));
        }
        Ok(MethodMetadata {
            declared_by: self.declared_by.clone(),
            modifier: self.modifier,
            annotations: self.annotations.iter().map(AnnotationMetadataBuilder::build).collect(),
            method_name: self.method_name.clone(),
            return_type: self.return_type.clone(),
            parameters: self.parameters.clone(),
            throws: self.throws.clone(),
            body: self.body.clone(),
            custom_data: self.custom_data.clone(),
        })
    }
}

/// Immutable constructor
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorMetadata {
    declared_by: MetadataId,
    modifier: Modifier,
    annotations: Vec<AnnotationMetadata>,
    parameters: Vec<MethodParameter>,
    throws: Vec<JavaType>,
    body: String,
    custom_data: CustomData,
}

impl ConstructorMetadata {
    #[inline]
    #[must_use]
    pub fn declared_by(&self) -> &MetadataId {
        &self.declared_by
    }

    #[inline]
    #[must_use]
    pub fn modifier(&self) -> Modifier {
        self.modifier
    }

    #[inline]
    #[must_use]
    pub fn annotations(&self) -> &[AnnotationMetadata] {
        &self.annotations
    }

    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[MethodParameter] {
        &self.parameters
    }

    #[must_use]
    pub fn parameter_types(&self) -> Vec<JavaType> {
        types_of(&self.parameters)
    }

    #[inline]
    #[must_use]
    pub fn throws(&self) -> &[JavaType] {
        &self.throws
    }

    #[inline]
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[inline]
    #[must_use]
    pub fn custom_data(&self) -> &CustomData {
        &self.custom_data
    }

    #[must_use]
    pub fn matches(&self, parameter_types: &[JavaType]) -> bool {
        same_types(&self.parameters, parameter_types)
    }

    /// Copy with additional custom data tags
    #[must_use]
    pub fn with_custom_data(&self, extra: &CustomData) -> Self {
        let mut constructor = self.clone();
        constructor.custom_data.merge(extra);
        constructor
    }
}

/// Constructor under construction
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorMetadataBuilder {
    declared_by: MetadataId,
    modifier: Modifier,
    annotations: Vec<AnnotationMetadataBuilder>,
    parameters: Vec<MethodParameter>,
    throws: Vec<JavaType>,
    body: String,
    custom_data: CustomData,
}

impl ConstructorMetadataBuilder {
    #[must_use]
    pub fn new(declared_by: &MetadataId, modifier: Modifier, body: impl Into<String>) -> Self {
        Self {
            declared_by: declared_by.clone(),
            modifier,
            annotations: Vec::new(),
            parameters: Vec::new(),
            throws: Vec::new(),
            body: body.into(),
            custom_data: CustomData::new(),
        }
    }

    /// Builder for editing an existing constructor
    #[must_use]
    pub fn from_existing(existing: &ConstructorMetadata) -> Self {
        Self {
            declared_by: existing.declared_by.clone(),
            modifier: existing.modifier,
            annotations: existing
                .annotations
                .iter()
                .map(AnnotationMetadataBuilder::from_existing)
                .collect(),
            parameters: existing.parameters.clone(),
            throws: existing.throws.clone(),
            body: existing.body.clone(),
            custom_data: existing.custom_data.clone(),
        }
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<MethodParameter>) -> Self {
        self.parameters = parameters;
        self
    }

    #[must_use]
    pub fn with_throws(mut self, throws: Vec<JavaType>) -> Self {
        self.throws = throws;
        self
    }

    pub fn add_annotation(&mut self, annotation: AnnotationMetadataBuilder) -> &mut Self {
        self.annotations.push(annotation);
        self
    }

    pub fn set_modifier(&mut self, modifier: Modifier) -> &mut Self {
        self.modifier = modifier;
        self
    }

    pub fn custom_data_mut(&mut self) -> &mut CustomData {
        &mut self.custom_data
    }

    #[must_use]
    pub fn parameter_types(&self) -> Vec<JavaType> {
        types_of(&self.parameters)
    }

    #[must_use]
    pub fn matches(&self, parameter_types: &[JavaType]) -> bool {
        same_types(&self.parameters, parameter_types)
    }

    /// Snapshot this constructor
    ///
    /// # Errors
    /// Returns [`BuilderError::ClassLevelDeclarer`] if declared by a class-level id
    pub fn build(&self) -> Result<ConstructorMetadata> {
        if self.declared_by.is_class_level() {
            return Err(BuilderError::class_level("<init>", &self.declared_by));
        }
        Ok(ConstructorMetadata {
            declared_by: self.declared_by.clone(),
            modifier: self.modifier,
            annotations: self.annotations.iter().map(AnnotationMetadataBuilder::build).collect(),
            parameters: self.parameters.clone(),
            throws: self.throws.clone(),
            body: self.body.clone(),
            custom_data: self.custom_data.clone(),
        })
    }
}

/// Static or instance initializer block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializerMetadata {
    declared_by: MetadataId,
    is_static: bool,
    body: String,
}

impl InitializerMetadata {
    #[inline]
    #[must_use]
    pub fn declared_by(&self) -> &MetadataId {
        &self.declared_by
    }

    #[inline]
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    #[inline]
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Initializer block under construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializerMetadataBuilder {
    declared_by: MetadataId,
    is_static: bool,
    body: String,
}

impl InitializerMetadataBuilder {
    #[must_use]
    pub fn new(declared_by: &MetadataId, is_static: bool, body: impl Into<String>) -> Self {
        Self {
            declared_by: declared_by.clone(),
            is_static,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn from_existing(existing: &InitializerMetadata) -> Self {
        Self {
            declared_by: existing.declared_by.clone(),
            is_static: existing.is_static,
            body: existing.body.clone(),
        }
    }

    /// Snapshot this initializer
    ///
    /// # Errors
    /// Returns [`BuilderError::ClassLevelDeclarer`] if declared by a class-level id
    pub fn build(&self) -> Result<InitializerMetadata> {
        if self.declared_by.is_class_level() {
            return Err(BuilderError::class_level("<clinit>", &self.declared_by));
        }
        Ok(InitializerMetadata {
            declared_by: self.declared_by.clone(),
            is_static: self.is_static,
            body: self.body.clone(),
        })
    }
}
