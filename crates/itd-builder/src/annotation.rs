//! Annotations and their attribute values
//!
//! Attributes keep insertion order. Adding an attribute whose name already
//! exists replaces the value in place.

use itd_model::JavaType;

/// Enum constant reference (`TemporalType.TIMESTAMP`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumConstant {
    pub enum_type: JavaType,
    pub name: String,
}

/// Value of one annotation attribute
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Boolean(bool),
    Char(char),
    Integer(i32),
    Long(i64),
    Double(f64),
    String(String),
    Class(JavaType),
    Enum(EnumConstant),
    Nested(AnnotationMetadata),
    Array(Vec<AnnotationValue>),
}

impl AnnotationValue {
    /// Enum constant value
    #[must_use]
    pub fn enum_constant(enum_type: &JavaType, name: impl Into<String>) -> Self {
        Self::Enum(EnumConstant {
            enum_type: enum_type.clone(),
            name: name.into(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Integral value, widening `int` to `long`
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(i64::from(*i)),
            Self::Long(l) => Some(*l),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_class(&self) -> Option<&JavaType> {
        match self {
            Self::Class(t) => Some(t),
            _ => None,
        }
    }
}

/// One named attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationAttribute {
    pub name: String,
    pub value: AnnotationValue,
}

impl AnnotationAttribute {
    #[must_use]
    pub fn new(name: impl Into<String>, value: AnnotationValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Immutable annotation snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationMetadata {
    annotation_type: JavaType,
    attributes: Vec<AnnotationAttribute>,
}

impl AnnotationMetadata {
    #[inline]
    #[must_use]
    pub fn annotation_type(&self) -> &JavaType {
        &self.annotation_type
    }

    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &[AnnotationAttribute] {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AnnotationValue> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }

    #[must_use]
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Integral attribute value
    #[must_use]
    pub fn i64_value(&self, name: &str) -> Option<i64> {
        self.attribute(name).and_then(AnnotationValue::as_i64)
    }

    #[must_use]
    pub fn str_value(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(AnnotationValue::as_str)
    }

    #[must_use]
    pub fn bool_value(&self, name: &str) -> Option<bool> {
        self.attribute(name).and_then(AnnotationValue::as_bool)
    }
}

/// Mutable annotation under construction
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationMetadataBuilder {
    annotation_type: JavaType,
    attributes: Vec<AnnotationAttribute>,
}

impl AnnotationMetadataBuilder {
    /// Marker annotation without attributes
    #[must_use]
    pub fn new(annotation_type: &JavaType) -> Self {
        Self {
            annotation_type: annotation_type.clone(),
            attributes: Vec::new(),
        }
    }

    /// Builder seeded from an existing annotation
    #[must_use]
    pub fn from_existing(existing: &AnnotationMetadata) -> Self {
        Self {
            annotation_type: existing.annotation_type.clone(),
            attributes: existing.attributes.clone(),
        }
    }

    #[inline]
    #[must_use]
    pub fn annotation_type(&self) -> &JavaType {
        &self.annotation_type
    }

    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &[AnnotationAttribute] {
        &self.attributes
    }

    /// Add or replace an attribute, keeping its position when replaced
    pub fn add_attribute(&mut self, attribute: AnnotationAttribute) -> &mut Self {
        match self.attributes.iter_mut().find(|a| a.name == attribute.name) {
            Some(existing) => existing.value = attribute.value,
            None => self.attributes.push(attribute),
        }
        self
    }

    pub fn add_string_attribute(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.add_attribute(AnnotationAttribute::new(name, AnnotationValue::String(value.into())))
    }

    pub fn add_boolean_attribute(&mut self, name: &str, value: bool) -> &mut Self {
        self.add_attribute(AnnotationAttribute::new(name, AnnotationValue::Boolean(value)))
    }

    pub fn add_integer_attribute(&mut self, name: &str, value: i32) -> &mut Self {
        self.add_attribute(AnnotationAttribute::new(name, AnnotationValue::Integer(value)))
    }

    pub fn add_long_attribute(&mut self, name: &str, value: i64) -> &mut Self {
        self.add_attribute(AnnotationAttribute::new(name, AnnotationValue::Long(value)))
    }

    pub fn add_class_attribute(&mut self, name: &str, value: &JavaType) -> &mut Self {
        self.add_attribute(AnnotationAttribute::new(name, AnnotationValue::Class(value.clone())))
    }

    pub fn add_enum_attribute(
        &mut self,
        name: &str,
        enum_type: &JavaType,
        constant: impl Into<String>,
    ) -> &mut Self {
        self.add_attribute(AnnotationAttribute::new(
            name,
            AnnotationValue::enum_constant(enum_type, constant),
        ))
    }

    /// Remove an attribute; returns whether it existed
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let before = self.attributes.len();
        self.attributes.retain(|a| a.name != name);
        before != self.attributes.len()
    }

    #[must_use]
    pub fn build(&self) -> AnnotationMetadata {
        AnnotationMetadata {
            annotation_type: self.annotation_type.clone(),
            attributes: self.attributes.clone(),
        }
    }
}

impl From<AnnotationMetadataBuilder> for AnnotationMetadata {
    fn from(builder: AnnotationMetadataBuilder) -> Self {
        Self {
            annotation_type: builder.annotation_type,
            attributes: builder.attributes,
        }
    }
}

/// Find an annotation of the given type
#[must_use]
pub fn find_annotation<'a>(
    annotations: &'a [AnnotationMetadata],
    annotation_type: &JavaType,
) -> Option<&'a AnnotationMetadata> {
    annotations
        .iter()
        .find(|a| a.annotation_type() == annotation_type)
}
