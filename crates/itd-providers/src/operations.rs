//! Persistence operation call descriptors
//!
//! Providers never know how an entity is found or saved. A persistence
//! binding supplies one [`MemberTypeAdditions`] per operation, carrying the
//! call text to splice into generated bodies plus any field or import the
//! call needs in the calling unit.

use indexmap::IndexMap;
use itd_builder::{ClassOrInterfaceTypeDetails, FieldMetadataBuilder, ItdTypeDetailsBuilder};
use itd_model::JavaType;
use std::fmt;

/// Persistence operations a provider may call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    Find,
    FindAll,
    FindEntries,
    CountAll,
    Persist,
    Merge,
    Remove,
    Flush,
}

impl OperationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::FindAll => "findAll",
            Self::FindEntries => "findEntries",
            Self::CountAll => "countAll",
            Self::Persist => "persist",
            Self::Merge => "merge",
            Self::Remove => "remove",
            Self::Flush => "flush",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation call plus what the caller needs to make it
#[derive(Debug, Clone, PartialEq)]
pub struct MemberTypeAdditions {
    method_name: String,
    method_call: String,
    fields: Vec<FieldMetadataBuilder>,
    imports: Vec<JavaType>,
}

impl MemberTypeAdditions {
    #[must_use]
    pub fn new(method_name: impl Into<String>, method_call: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            method_call: method_call.into(),
            fields: Vec::new(),
            imports: Vec::new(),
        }
    }

    /// Companion field, e.g. an injected repository
    #[must_use]
    pub fn with_field(mut self, field: FieldMetadataBuilder) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_import(mut self, java_type: JavaType) -> Self {
        self.imports.push(java_type);
        self
    }

    #[inline]
    #[must_use]
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Call expression without a trailing semicolon
    #[inline]
    #[must_use]
    pub fn method_call(&self) -> &str {
        &self.method_call
    }

    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[FieldMetadataBuilder] {
        &self.fields
    }

    #[inline]
    #[must_use]
    pub fn imports(&self) -> &[JavaType] {
        &self.imports
    }

    /// Merge companion fields and imports into `builder`
    ///
    /// Fields already declared by `governor` or by the builder are skipped.
    pub fn copy_additions_to(&self, builder: &mut ItdTypeDetailsBuilder, governor: &ClassOrInterfaceTypeDetails) {
        for field in &self.fields {
            if governor.declared_field(field.field_name()).is_none() {
                let mut field = field.clone();
                field.set_declared_by(builder.declared_by());
                builder.add_field(field);
            }
        }
        for import in &self.imports {
            builder.add_import(import);
        }
    }
}

/// The operations available for one entity, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationSet(IndexMap<OperationKind, MemberTypeAdditions>);

impl OperationSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, kind: OperationKind, additions: MemberTypeAdditions) -> Self {
        self.0.insert(kind, additions);
        self
    }

    pub fn insert(&mut self, kind: OperationKind, additions: MemberTypeAdditions) {
        self.0.insert(kind, additions);
    }

    #[must_use]
    pub fn get(&self, kind: OperationKind) -> Option<&MemberTypeAdditions> {
        self.0.get(&kind)
    }

    #[must_use]
    pub fn contains(&self, kind: OperationKind) -> bool {
        self.0.contains_key(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OperationKind, &MemberTypeAdditions)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itd_builder::{ItdTypeDetails, Modifier, PhysicalTypeCategory, TypeDetailsBuilder};
    use itd_model::{JavaSymbolName, LogicalPath, MetadataId, MetadataKind, PathKind};

    fn ids() -> (MetadataId, MetadataId) {
        let path = LogicalPath::root_module(PathKind::SrcMainJava);
        let ty = JavaType::new("com.foo.PersonController");
        (
            MetadataId::for_type(MetadataKind::PhysicalType, path.clone(), ty.clone()),
            MetadataId::for_type(MetadataKind::WebScaffold, path, ty),
        )
    }

    #[test]
    fn additions_skip_governor_fields() {
        let (physical, scaffold) = ids();
        let repo = JavaType::new("com.foo.PersonRepository");
        let mut governor = TypeDetailsBuilder::new(&physical, Modifier::PUBLIC, JavaType::new("com.foo.PersonController"), PhysicalTypeCategory::Class);
        governor
            .add_field(FieldMetadataBuilder::new(&physical, Modifier::PRIVATE, JavaSymbolName::new("personRepository"), repo.clone()))
            .unwrap();
        let governor = governor.build().unwrap();

        let additions = MemberTypeAdditions::new("save", "personRepository.save(person)")
            .with_field(FieldMetadataBuilder::new(&physical, Modifier::PRIVATE, JavaSymbolName::new("personRepository"), repo.clone()))
            .with_field(FieldMetadataBuilder::new(&physical, Modifier::PRIVATE, JavaSymbolName::new("auditLog"), repo.clone()))
            .with_import(repo);

        let mut itd = ItdTypeDetailsBuilder::new(&scaffold, &governor, ItdTypeDetails::aspect_name(governor.name(), "Controller"), true);
        additions.copy_additions_to(&mut itd, &governor);
        additions.copy_additions_to(&mut itd, &governor);

        let built = itd.build().unwrap();
        let names: Vec<_> = built.members().declared_fields().iter().map(|f| f.field_name().symbol_name().to_string()).collect();
        assert_eq!(names, vec!["auditLog"]);
        assert_eq!(built.members().declared_fields()[0].declared_by(), &scaffold);
    }

    #[test]
    fn operation_set_lookup() {
        let ops = OperationSet::new()
            .with(OperationKind::Find, MemberTypeAdditions::new("findPerson", "Person.findPerson(id)"))
            .with(OperationKind::Persist, MemberTypeAdditions::new("persist", "person.persist()"));
        assert_eq!(ops.get(OperationKind::Find).map(MemberTypeAdditions::method_call), Some("Person.findPerson(id)"));
        assert!(!ops.contains(OperationKind::Merge));
        assert_eq!(ops.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec![OperationKind::Find, OperationKind::Persist]);
    }
}
