//! Registry of matchers and the decoration pass

use super::matchers::Matcher;
use crate::error::Result;
use crate::plural::inflector_plural;
use dashmap::DashMap;
use itd_builder::{ClassOrInterfaceTypeDetails, MemberDetails, TypeDetailsBuilder};
use itd_model::MetadataId;
use parking_lot::RwLock;
use radix_trie::{Trie, TrieCommon};
use tracing::debug;

/// Applies registered matchers to member details
///
/// Matchers are keyed by `adding_class + custom_data_key`, so everything a
/// component registered can be dropped by its class prefix.
#[derive(Debug, Default)]
pub struct CustomDataKeyDecorator {
    matchers: RwLock<Trie<String, Matcher>>,
    plurals: DashMap<MetadataId, String>,
}

impl CustomDataKeyDecorator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `matcher`; an existing matcher under the same key is replaced
    pub fn register_matcher(&self, adding_class: &str, matcher: impl Into<Matcher>) {
        let matcher = matcher.into();
        let key = format!("{adding_class}{}", matcher.key());
        debug!(%key, "registered matcher");
        self.matchers.write().insert(key, matcher);
    }

    pub fn register_matchers(&self, adding_class: &str, matchers: impl IntoIterator<Item = Matcher>) {
        for matcher in matchers {
            self.register_matcher(adding_class, matcher);
        }
    }

    /// Drop every matcher registered by `adding_class`; returns how many
    pub fn unregister_matchers(&self, adding_class: &str) -> usize {
        let mut trie = self.matchers.write();
        let keys: Vec<String> = trie
            .get_raw_descendant(adding_class)
            .map(|sub| {
                sub.keys()
                    .filter(|k| k.starts_with(adding_class))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        for key in &keys {
            trie.remove(key);
        }
        keys.len()
    }

    #[must_use]
    pub fn matcher_count(&self) -> usize {
        self.matchers.read().len()
    }

    /// Cached inflector plural for a declaration
    pub fn plural_for(&self, details: &ClassOrInterfaceTypeDetails) -> String {
        self.plurals
            .entry(details.declared_by().clone())
            .or_insert_with(|| inflector_plural(details.name().simple_type_name()))
            .clone()
    }

    /// Copy of `member_details` with every matching member tagged
    ///
    /// # Errors
    /// Propagates builder failures from rebuilding the declarations
    pub fn decorate(&self, member_details: &MemberDetails) -> Result<MemberDetails> {
        let details = member_details.details();
        let plural = details.iter().map(|d| self.plural_for(d)).last().unwrap_or_default();
        let matchers: Vec<Matcher> = self.matchers.read().values().cloned().collect();
        let mut builders: Vec<TypeDetailsBuilder> = details.iter().map(TypeDetailsBuilder::from_existing).collect();

        for matcher in &matchers {
            match matcher {
                Matcher::Field(m) => {
                    for (detail, builder) in details.iter().zip(builders.iter_mut()) {
                        for (field, target) in detail.declared_fields().iter().zip(builder.fields_mut()) {
                            if m.is_match(field) {
                                target.custom_data_mut().put(m.key(), m.tag_value(field));
                            }
                        }
                    }
                }
                Matcher::Method(m) => {
                    let names = m.method_names(details, &plural);
                    for (detail, builder) in details.iter().zip(builders.iter_mut()) {
                        for (method, target) in detail.declared_methods().iter().zip(builder.methods_mut()) {
                            if names.contains(method.method_name()) {
                                target.custom_data_mut().tag(m.key());
                            }
                        }
                    }
                }
                Matcher::Constructor(m) => {
                    for (detail, builder) in details.iter().zip(builders.iter_mut()) {
                        for (constructor, target) in detail.declared_constructors().iter().zip(builder.constructors_mut()) {
                            if m.is_match(constructor) {
                                target.custom_data_mut().tag(m.key());
                            }
                        }
                    }
                }
                Matcher::Type(m) => {
                    for (detail, builder) in details.iter().zip(builders.iter_mut()) {
                        if m.is_match(detail) {
                            builder.custom_data_mut().tag(m.key());
                        }
                    }
                }
            }
        }

        let decorated = builders
            .iter()
            .map(TypeDetailsBuilder::build)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(MemberDetails::new(decorated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagging::{keys, persistence_matchers, FieldMatcher};
    use itd_builder::{AnnotationMetadataBuilder, FieldMetadataBuilder, MethodMetadataBuilder, Modifier, PhysicalTypeCategory};
    use itd_model::{well_known, JavaSymbolName, JavaType, LogicalPath, MetadataKind, PathKind};

    fn person() -> MemberDetails {
        let ty = JavaType::new("com.foo.Person");
        let id = MetadataId::for_type(MetadataKind::PhysicalType, LogicalPath::root_module(PathKind::SrcMainJava), ty.clone());
        let mut b = TypeDetailsBuilder::new(&id, Modifier::PUBLIC, ty, PhysicalTypeCategory::Class);
        let mut id_field = FieldMetadataBuilder::new(&id, Modifier::PRIVATE, JavaSymbolName::new("id"), well_known::LONG_OBJECT.clone());
        id_field.add_annotation(AnnotationMetadataBuilder::new(&well_known::ID));
        b.add_field(id_field).unwrap();
        let mut column = AnnotationMetadataBuilder::new(&well_known::COLUMN);
        column.add_integer_attribute("length", 30);
        let mut name = FieldMetadataBuilder::new(&id, Modifier::PRIVATE, JavaSymbolName::new("name"), well_known::STRING.clone());
        name.add_annotation(column);
        b.add_field(name).unwrap();
        b.add_method(MethodMetadataBuilder::new(&id, Modifier::PUBLIC, JavaSymbolName::new("getId"), well_known::LONG_OBJECT.clone(), "return id;"))
            .unwrap();
        MemberDetails::new(vec![b.build().unwrap()])
    }

    #[test]
    fn decorate_tags_matching_members() {
        let decorator = CustomDataKeyDecorator::new();
        decorator.register_matchers("com.foo.Jpa", persistence_matchers());
        let decorated = decorator.decorate(&person()).unwrap();

        let ids: Vec<_> = decorated.fields_with_tag(keys::IDENTIFIER_FIELD).collect();
        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].field_name().symbol_name(), "id");

        let name = decorated.field(&JavaSymbolName::new("name")).unwrap();
        assert_eq!(name.custom_data().i64_property(keys::COLUMN_FIELD, "length"), Some(30));
        assert_eq!(decorated.methods_with_tag(keys::IDENTIFIER_ACCESSOR_METHOD).count(), 1);
    }

    #[test]
    fn decoration_leaves_input_untouched() {
        let decorator = CustomDataKeyDecorator::new();
        decorator.register_matchers("com.foo.Jpa", persistence_matchers());
        let original = person();
        let _ = decorator.decorate(&original).unwrap();
        assert_eq!(original.fields_with_tag(keys::IDENTIFIER_FIELD).count(), 0);
    }

    #[test]
    fn unregister_by_class_prefix() {
        let decorator = CustomDataKeyDecorator::new();
        decorator.register_matcher("com.foo.A", FieldMatcher::new("X", vec![well_known::ID.clone()]));
        decorator.register_matcher("com.foo.A", FieldMatcher::new("Y", vec![well_known::ID.clone()]));
        decorator.register_matcher("com.foo.B", FieldMatcher::new("X", vec![well_known::ID.clone()]));
        assert_eq!(decorator.matcher_count(), 3);
        assert_eq!(decorator.unregister_matchers("com.foo.A"), 2);
        assert_eq!(decorator.unregister_matchers("com.foo.A"), 0);
        assert_eq!(decorator.matcher_count(), 1);
    }

    #[test]
    fn plurals_are_cached_per_declaration() {
        let decorator = CustomDataKeyDecorator::new();
        let details = person();
        assert_eq!(decorator.plural_for(&details.details()[0]), "People");
        assert_eq!(decorator.plurals.len(), 1);
    }
}
