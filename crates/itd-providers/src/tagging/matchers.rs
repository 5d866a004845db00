//! Matchers deciding which members receive a custom data tag

use itd_builder::{
    AnnotationMetadata, AnnotationValue, ClassOrInterfaceTypeDetails, ConstructorMetadata,
    FieldMetadata, MethodMetadata,
};
use itd_model::{capitalize, well_known, JavaSymbolName, JavaType};
use serde_json::{Map, Number, Value};
use std::collections::HashSet;

/// JSON form of an annotation attribute value
#[must_use]
pub fn annotation_value_to_json(value: &AnnotationValue) -> Value {
    match value {
        AnnotationValue::Boolean(b) => Value::Bool(*b),
        AnnotationValue::Char(c) => Value::String(c.to_string()),
        AnnotationValue::Integer(i) => Value::from(*i),
        AnnotationValue::Long(l) => Value::from(*l),
        AnnotationValue::Double(d) => Number::from_f64(*d).map_or(Value::Null, Value::Number),
        AnnotationValue::String(s) => Value::String(s.clone()),
        AnnotationValue::Class(t) => Value::String(t.fully_qualified_type_name().to_string()),
        AnnotationValue::Enum(e) => Value::String(e.name.clone()),
        AnnotationValue::Nested(a) => annotation_to_json(a),
        AnnotationValue::Array(values) => Value::Array(values.iter().map(annotation_value_to_json).collect()),
    }
}

/// Attributes of an annotation as a JSON object
#[must_use]
pub fn annotation_to_json(annotation: &AnnotationMetadata) -> Value {
    let object: Map<String, Value> = annotation
        .attributes()
        .iter()
        .map(|a| (a.name.clone(), annotation_value_to_json(&a.value)))
        .collect();
    Value::Object(object)
}

/// Tags fields carrying any of the given annotations
///
/// The tag payload is the attribute object of the first matching
/// annotation, so `@Column(length = 30)` becomes `{"length": 30}`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatcher {
    key: String,
    annotations: Vec<JavaType>,
}

impl FieldMatcher {
    #[must_use]
    pub fn new(key: impl Into<String>, annotations: Vec<JavaType>) -> Self {
        Self {
            key: key.into(),
            annotations,
        }
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn is_match(&self, field: &FieldMetadata) -> bool {
        self.annotations.iter().any(|a| field.annotation(a).is_some())
    }

    pub fn matches<'a>(&self, details: &'a [ClassOrInterfaceTypeDetails]) -> Vec<&'a FieldMetadata> {
        details
            .iter()
            .flat_map(ClassOrInterfaceTypeDetails::declared_fields)
            .filter(|f| self.is_match(f))
            .collect()
    }

    #[must_use]
    pub fn tag_value(&self, field: &FieldMetadata) -> Value {
        self.annotations
            .iter()
            .find_map(|a| field.annotation(a))
            .map_or(Value::Null, annotation_to_json)
    }
}

/// Suffix appended to a user-defined method name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameSuffix {
    #[default]
    None,
    /// Capitalised plural of the type (`findAllPeople`)
    Plural,
    /// Simple type name (`findPerson`)
    Singular,
}

#[derive(Debug, Clone, PartialEq)]
enum MethodNaming {
    Fields {
        matchers: Vec<FieldMatcher>,
        accessor: bool,
    },
    UserDefined {
        catalyst: JavaType,
        attribute: String,
        default_name: Option<String>,
        suffix: NameSuffix,
        additional_suffix: String,
    },
}

/// Tags methods by name
///
/// Names come either from fields picked by field matchers (`getX`/`setX`)
/// or from a name attribute on a catalyst annotation of the most concrete
/// type, falling back to a default name.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodMatcher {
    key: String,
    naming: MethodNaming,
}

impl MethodMatcher {
    /// Accessors (`accessor = true`) or mutators of fields matched by `matchers`
    #[must_use]
    pub fn for_fields(key: impl Into<String>, matchers: Vec<FieldMatcher>, accessor: bool) -> Self {
        Self {
            key: key.into(),
            naming: MethodNaming::Fields { matchers, accessor },
        }
    }

    /// Method named by `catalyst`'s `attribute`, else `default_name`
    #[must_use]
    pub fn user_defined(
        key: impl Into<String>,
        catalyst: &JavaType,
        attribute: impl Into<String>,
        default_name: Option<&str>,
    ) -> Self {
        Self {
            key: key.into(),
            naming: MethodNaming::UserDefined {
                catalyst: catalyst.clone(),
                attribute: attribute.into(),
                default_name: default_name.map(str::to_string),
                suffix: NameSuffix::None,
                additional_suffix: String::new(),
            },
        }
    }

    #[must_use]
    pub fn with_suffix(mut self, name_suffix: NameSuffix, additional: impl Into<String>) -> Self {
        if let MethodNaming::UserDefined {
            suffix,
            additional_suffix,
            ..
        } = &mut self.naming
        {
            *suffix = name_suffix;
            *additional_suffix = additional.into();
        }
        self
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Method names this matcher selects
    ///
    /// `plural` is the inflected plural of the most concrete type, used
    /// unless that type carries its own `@RooPlural` value.
    #[must_use]
    pub fn method_names(&self, details: &[ClassOrInterfaceTypeDetails], plural: &str) -> HashSet<JavaSymbolName> {
        match &self.naming {
            MethodNaming::Fields { matchers, accessor } => {
                let prefix = if *accessor { "get" } else { "set" };
                matchers
                    .iter()
                    .flat_map(|m| m.matches(details))
                    .map(|f| JavaSymbolName::new(format!("{prefix}{}", capitalize(f.field_name().symbol_name()))))
                    .collect()
            }
            MethodNaming::UserDefined {
                catalyst,
                attribute,
                default_name,
                suffix,
                additional_suffix,
            } => {
                let Some(concrete) = details.last() else {
                    return HashSet::new();
                };
                let suffix = match suffix {
                    NameSuffix::None => String::new(),
                    NameSuffix::Singular => concrete.name().simple_type_name().to_string(),
                    NameSuffix::Plural => {
                        let plural = concrete
                            .annotation(&well_known::ROO_PLURAL)
                            .and_then(|a| a.str_value("value"))
                            .unwrap_or(plural);
                        capitalize(plural)
                    }
                };
                let user_defined = concrete
                    .annotation(catalyst)
                    .and_then(|a| a.str_value(attribute))
                    .filter(|name| !name.trim().is_empty());
                let base = match (user_defined, default_name) {
                    (Some(name), _) => name.to_string(),
                    (None, Some(name)) => name.clone(),
                    (None, None) => return HashSet::new(),
                };
                HashSet::from([JavaSymbolName::new(format!("{base}{suffix}{additional_suffix}"))])
            }
        }
    }

    pub fn matches<'a>(&self, details: &'a [ClassOrInterfaceTypeDetails], plural: &str) -> Vec<&'a MethodMetadata> {
        let names = self.method_names(details, plural);
        details
            .iter()
            .flat_map(ClassOrInterfaceTypeDetails::declared_methods)
            .filter(|m| names.contains(m.method_name()))
            .collect()
    }
}

/// Tags constructors with an exact parameter list
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorMatcher {
    key: String,
    parameter_types: Vec<JavaType>,
}

impl ConstructorMatcher {
    #[must_use]
    pub fn new(key: impl Into<String>, parameter_types: Vec<JavaType>) -> Self {
        Self {
            key: key.into(),
            parameter_types,
        }
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn is_match(&self, constructor: &ConstructorMetadata) -> bool {
        constructor.matches(&self.parameter_types)
    }

    pub fn matches<'a>(&self, details: &'a [ClassOrInterfaceTypeDetails]) -> Vec<&'a ConstructorMetadata> {
        details
            .iter()
            .flat_map(ClassOrInterfaceTypeDetails::declared_constructors)
            .filter(|c| self.is_match(c))
            .collect()
    }
}

/// Tags type declarations carrying any of the given annotations
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedTypeMatcher {
    key: String,
    annotations: Vec<JavaType>,
}

impl AnnotatedTypeMatcher {
    #[must_use]
    pub fn new(key: impl Into<String>, annotations: Vec<JavaType>) -> Self {
        Self {
            key: key.into(),
            annotations,
        }
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn is_match(&self, details: &ClassOrInterfaceTypeDetails) -> bool {
        self.annotations.iter().any(|a| details.annotation(a).is_some())
    }

    pub fn matches<'a>(&self, details: &'a [ClassOrInterfaceTypeDetails]) -> Vec<&'a ClassOrInterfaceTypeDetails> {
        details.iter().filter(|d| self.is_match(d)).collect()
    }
}

/// Any registered matcher
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    Field(FieldMatcher),
    Method(MethodMatcher),
    Constructor(ConstructorMatcher),
    Type(AnnotatedTypeMatcher),
}

impl Matcher {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Field(m) => m.key(),
            Self::Method(m) => m.key(),
            Self::Constructor(m) => m.key(),
            Self::Type(m) => m.key(),
        }
    }
}

impl From<FieldMatcher> for Matcher {
    fn from(m: FieldMatcher) -> Self {
        Self::Field(m)
    }
}

impl From<MethodMatcher> for Matcher {
    fn from(m: MethodMatcher) -> Self {
        Self::Method(m)
    }
}

impl From<ConstructorMatcher> for Matcher {
    fn from(m: ConstructorMatcher) -> Self {
        Self::Constructor(m)
    }
}

impl From<AnnotatedTypeMatcher> for Matcher {
    fn from(m: AnnotatedTypeMatcher) -> Self {
        Self::Type(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itd_builder::{AnnotationMetadataBuilder, FieldMetadataBuilder, MethodMetadataBuilder, Modifier, PhysicalTypeCategory, TypeDetailsBuilder};
    use itd_model::{LogicalPath, MetadataId, MetadataKind, PathKind};
    use serde_json::json;

    fn person(annotations: Vec<AnnotationMetadataBuilder>) -> ClassOrInterfaceTypeDetails {
        let ty = JavaType::new("com.foo.Person");
        let id = MetadataId::for_type(MetadataKind::PhysicalType, LogicalPath::root_module(PathKind::SrcMainJava), ty.clone());
        let mut b = TypeDetailsBuilder::new(&id, Modifier::PUBLIC, ty, PhysicalTypeCategory::Class);
        for a in annotations {
            b.add_annotation(a);
        }
        let mut column = AnnotationMetadataBuilder::new(&well_known::COLUMN);
        column.add_integer_attribute("length", 30).add_boolean_attribute("unique", true);
        let mut name = FieldMetadataBuilder::new(&id, Modifier::PRIVATE, JavaSymbolName::new("name"), well_known::STRING.clone());
        name.add_annotation(column);
        b.add_field(name).unwrap();
        b.add_field(FieldMetadataBuilder::new(&id, Modifier::PRIVATE, JavaSymbolName::new("age"), well_known::INT_OBJECT.clone()))
            .unwrap();
        for method in ["getName", "setName", "findAllPeople", "countPeople"] {
            b.add_method(MethodMetadataBuilder::new(&id, Modifier::PUBLIC, JavaSymbolName::new(method), well_known::VOID_PRIMITIVE.clone(), ""))
                .unwrap();
        }
        b.build().unwrap()
    }

    #[test]
    fn field_matcher_payload_is_annotation_attributes() {
        let details = vec![person(vec![])];
        let matcher = FieldMatcher::new("COLUMN_FIELD", vec![well_known::COLUMN.clone()]);
        let matched = matcher.matches(&details);
        assert_eq!(matched.len(), 1);
        assert_eq!(matcher.tag_value(matched[0]), json!({ "length": 30, "unique": true }));
    }

    #[test]
    fn field_based_method_names() {
        let details = vec![person(vec![])];
        let columns = vec![FieldMatcher::new("COLUMN_FIELD", vec![well_known::COLUMN.clone()])];
        let accessors = MethodMatcher::for_fields("COLUMN_ACCESSOR", columns.clone(), true);
        let mutators = MethodMatcher::for_fields("COLUMN_MUTATOR", columns, false);
        let names = |m: &MethodMatcher| m.matches(&details, "People").iter().map(|x| x.method_name().symbol_name().to_string()).collect::<Vec<_>>();
        assert_eq!(names(&accessors), vec!["getName"]);
        assert_eq!(names(&mutators), vec!["setName"]);
    }

    #[test]
    fn user_defined_names_take_plural_suffix() {
        let catalyst = JavaType::new("com.foo.RooEntity");
        let find_all = MethodMatcher::user_defined("FIND_ALL_METHOD", &catalyst, "findAllMethod", Some("findAll"))
            .with_suffix(NameSuffix::Plural, "");
        let details = vec![person(vec![AnnotationMetadataBuilder::new(&catalyst)])];
        assert_eq!(find_all.matches(&details, "people").len(), 1);

        let mut renamed = AnnotationMetadataBuilder::new(&catalyst);
        renamed.add_string_attribute("findAllMethod", "count");
        let details = vec![person(vec![renamed])];
        assert_eq!(find_all.method_names(&details, "people"), HashSet::from([JavaSymbolName::new("countPeople")]));
    }

    #[test]
    fn type_matcher_requires_annotation() {
        let matcher = AnnotatedTypeMatcher::new("PERSISTENT_TYPE", vec![JavaType::new("javax.persistence.Entity")]);
        assert!(matcher.matches(&[person(vec![])]).is_empty());
        let entity = AnnotationMetadataBuilder::new(&JavaType::new("javax.persistence.Entity"));
        assert_eq!(matcher.matches(&[person(vec![entity])]).len(), 1);
    }
}
