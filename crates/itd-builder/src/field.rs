//! Field snapshots and builders

use crate::annotation::{find_annotation, AnnotationMetadata, AnnotationMetadataBuilder};
use crate::custom_data::CustomData;
use crate::error::{BuilderError, Result};
use crate::modifier::Modifier;
use itd_model::{JavaSymbolName, JavaType, MetadataId};

/// Immutable field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMetadata {
    declared_by: MetadataId,
    modifier: Modifier,
    annotations: Vec<AnnotationMetadata>,
    field_name: JavaSymbolName,
    field_type: JavaType,
    initializer: Option<String>,
    custom_data: CustomData,
}

impl FieldMetadata {
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
    pub fn field_name(&self) -> &JavaSymbolName {
        &self.field_name
    }

    #[inline]
    #[must_use]
    pub fn field_type(&self) -> &JavaType {
        &self.field_type
    }

    #[inline]
    #[must_use]
    pub fn initializer(&self) -> Option<&str> {
        self.initializer.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn custom_data(&self) -> &CustomData {
        &self.custom_data
    }

    /// Copy with additional custom data tags
    #[must_use]
    pub fn with_custom_data(&self, extra: &CustomData) -> Self {
        let mut field = self.clone();
        field.custom_data.merge(extra);
        field
    }
}

/// Field under construction
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMetadataBuilder {
    declared_by: MetadataId,
    modifier: Modifier,
    annotations: Vec<AnnotationMetadataBuilder>,
    field_name: JavaSymbolName,
    field_type: JavaType,
    initializer: Option<String>,
    custom_data: CustomData,
}

impl FieldMetadataBuilder {
    #[must_use]
    pub fn new(
        declared_by: &MetadataId,
        modifier: Modifier,
        field_name: JavaSymbolName,
        field_type: JavaType,
    ) -> Self {
        Self {
            declared_by: declared_by.clone(),
            modifier,
            annotations: Vec::new(),
            field_name,
            field_type,
            initializer: None,
            custom_data: CustomData::new(),
        }
    }

    /// Builder for editing an existing field
    #[must_use]
    pub fn from_existing(existing: &FieldMetadata) -> Self {
        Self {
            declared_by: existing.declared_by.clone(),
            modifier: existing.modifier,
            annotations: existing
                .annotations
                .iter()
                .map(AnnotationMetadataBuilder::from_existing)
                .collect(),
            field_name: existing.field_name.clone(),
            field_type: existing.field_type.clone(),
            initializer: existing.initializer.clone(),
            custom_data: existing.custom_data.clone(),
        }
    }

    #[must_use]
    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<AnnotationMetadataBuilder>) -> Self {
        self.annotations = annotations;
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

    pub fn set_declared_by(&mut self, declared_by: &MetadataId) -> &mut Self {
        self.declared_by = declared_by.clone();
        self
    }

    pub fn custom_data_mut(&mut self) -> &mut CustomData {
        &mut self.custom_data
    }

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
    pub fn field_name(&self) -> &JavaSymbolName {
        &self.field_name
    }

    #[inline]
    #[must_use]
    pub fn field_type(&self) -> &JavaType {
        &self.field_type
    }

    #[inline]
    #[must_use]
    pub fn initializer(&self) -> Option<&str> {
        self.initializer.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn annotations(&self) -> &[AnnotationMetadataBuilder] {
        &self.annotations
    }

    /// Snapshot this field
    ///
    /// # Errors
    /// Returns [`BuilderError::ClassLevelDeclarer`] if declared by a class-level id
    pub fn build(&self) -> Result<FieldMetadata> {
        if self.declared_by.is_class_level() {
            return Err(BuilderError::class_level(
                self.field_name.symbol_name(),
                &self.declared_by,
            ));
        }
        Ok(FieldMetadata {
            declared_by: self.declared_by.clone(),
            modifier: self.modifier,
            annotations: self.annotations.iter().map(AnnotationMetadataBuilder::build).collect(),
            field_name: self.field_name.clone(),
            field_type: self.field_type.clone(),
            initializer: self.initializer.clone(),
            custom_data: self.custom_data.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itd_model::{well_known, LogicalPath, MetadataKind, PathKind};

    fn declarer() -> MetadataId {
        MetadataId::for_type(
            MetadataKind::DataOnDemand,
            LogicalPath::root_module(PathKind::SrcTestJava),
            JavaType::new("com.foo.PersonDataOnDemand"),
        )
    }

    #[test]
    fn build_snapshot() {
        let field = FieldMetadataBuilder::new(
            &declarer(),
            Modifier::PRIVATE,
            JavaSymbolName::new("rnd"),
            well_known::RANDOM.clone(),
        )
        .with_initializer("new SecureRandom()")
        .build()
        .unwrap();
        assert_eq!(field.field_name().symbol_name(), "rnd");
        assert_eq!(field.initializer(), Some("new SecureRandom()"));
        assert!(field.modifier().is_private());
    }

    #[test]
    fn class_level_declarer_rejected() {
        let id = MetadataId::class_level(MetadataKind::DataOnDemand);
        let result = FieldMetadataBuilder::new(
            &id,
            Modifier::PRIVATE,
            JavaSymbolName::new("rnd"),
            well_known::RANDOM.clone(),
        )
        .build();
        assert!(matches!(result, Err(BuilderError::ClassLevelDeclarer { .. })));
    }

    #[test]
    fn from_existing_round_trips() {
        let mut builder = FieldMetadataBuilder::new(
            &declarer(),
            Modifier::PRIVATE,
            JavaSymbolName::new("data"),
            well_known::list_of(&JavaType::new("com.foo.Person")),
        );
        builder.add_annotation(AnnotationMetadataBuilder::new(&well_known::TRANSIENT));
        let field = builder.build().unwrap();
        let copy = FieldMetadataBuilder::from_existing(&field).build().unwrap();
        assert_eq!(copy, field);
        assert!(copy.annotation(&well_known::TRANSIENT).is_some());
    }
}
