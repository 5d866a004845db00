//! Testing utilities for the ITD workspace
//!
//! Shared fixtures: ids, governors, a `Person` entity, editor inputs and a
//! ready-wired engine context over an in-memory store.

#![allow(missing_docs)]

use indexmap::IndexMap;
use itd_builder::{
    AnnotationMetadataBuilder, ClassOrInterfaceTypeDetails, FieldMetadataBuilder, MemberDetails, Modifier,
    PhysicalTypeCategory, TypeDetailsBuilder,
};
use itd_core::{EngineConfig, EngineContext};
use itd_model::{well_known, JavaSymbolName, JavaType, LogicalPath, MetadataId, MetadataKind, PathKind};
use itd_providers::{DataOnDemandInput, EditorInput, MemberTypeAdditions, OperationKind, OperationSet, DEFAULT_QUANTITY};
use itd_roundtrip::{FileStore, MemoryFileStore};
use std::sync::Arc;

pub const PERSON: &str = "com.foo.domain.Person";
pub const PERSON_EDITOR: &str = "com.foo.web.PersonEditor";
pub const PERSON_DOD: &str = "com.foo.domain.PersonDataOnDemand";

/// Route test output through the harness's capture; safe to call repeatedly
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn src_main_java() -> LogicalPath {
    LogicalPath::root_module(PathKind::SrcMainJava)
}

pub fn instance_id(kind: MetadataKind, fqn: &str) -> MetadataId {
    MetadataId::for_type(kind, src_main_java(), JavaType::new(fqn))
}

pub fn physical_id(fqn: &str) -> MetadataId {
    instance_id(MetadataKind::PhysicalType, fqn)
}

/// Empty public class declared by its physical-type id
pub fn class_builder(fqn: &str) -> TypeDetailsBuilder {
    TypeDetailsBuilder::new(&physical_id(fqn), Modifier::PUBLIC, JavaType::new(fqn), PhysicalTypeCategory::Class)
}

pub fn empty_class(fqn: &str) -> ClassOrInterfaceTypeDetails {
    class_builder(fqn).build().unwrap()
}

/// `Person` with `@Id id: Long`, `name: String @Size(min = 5, max = 10)`
/// and `age: Integer`
pub fn person_entity() -> ClassOrInterfaceTypeDetails {
    let id = physical_id(PERSON);
    let mut b = class_builder(PERSON);
    let mut pk = FieldMetadataBuilder::new(&id, Modifier::PRIVATE, JavaSymbolName::new("id"), well_known::LONG_OBJECT.clone());
    pk.add_annotation(AnnotationMetadataBuilder::new(&well_known::ID));
    b.add_field(pk).unwrap();
    let mut size = AnnotationMetadataBuilder::new(&well_known::SIZE);
    size.add_integer_attribute("min", 5).add_integer_attribute("max", 10);
    let mut name = FieldMetadataBuilder::new(&id, Modifier::PRIVATE, JavaSymbolName::new("name"), well_known::STRING.clone());
    name.add_annotation(size);
    b.add_field(name).unwrap();
    b.add_field(FieldMetadataBuilder::new(&id, Modifier::PRIVATE, JavaSymbolName::new("age"), well_known::INT_OBJECT.clone()))
        .unwrap();
    b.build().unwrap()
}

pub fn find_person() -> MemberTypeAdditions {
    MemberTypeAdditions::new("findPerson", "Person.findPerson(identifier)")
}

/// Active-record style calls on `Person`
pub fn person_operations() -> OperationSet {
    OperationSet::new()
        .with(OperationKind::Find, find_person())
        .with(OperationKind::FindAll, MemberTypeAdditions::new("findAllPeople", "Person.findAllPeople()"))
        .with(OperationKind::FindEntries, MemberTypeAdditions::new("findPersonEntries", "Person.findPersonEntries(firstResult, maxResults)"))
        .with(OperationKind::CountAll, MemberTypeAdditions::new("countPeople", "Person.countPeople()"))
        .with(OperationKind::Persist, MemberTypeAdditions::new("persist", "person.persist()"))
        .with(OperationKind::Merge, MemberTypeAdditions::new("merge", "person.merge()"))
        .with(OperationKind::Remove, MemberTypeAdditions::new("remove", "person.remove()"))
        .with(OperationKind::Flush, MemberTypeAdditions::new("flush", "person.flush()"))
}

pub fn editor_id() -> MetadataId {
    instance_id(MetadataKind::Editor, PERSON_EDITOR)
}

/// Editor input for `PersonEditor` over `governor`
pub fn person_editor_input(governor: ClassOrInterfaceTypeDetails) -> EditorInput {
    EditorInput {
        governor,
        entity: JavaType::new(PERSON),
        identifier_type: well_known::LONG_OBJECT.clone(),
        identifier_accessor: JavaSymbolName::new("getId"),
        find: Some(find_person()),
        upstream: Vec::new(),
    }
}

pub fn dod_id() -> MetadataId {
    MetadataId::for_type(
        MetadataKind::DataOnDemand,
        LogicalPath::root_module(PathKind::SrcTestJava),
        JavaType::new(PERSON_DOD),
    )
}

/// Empty `PersonDataOnDemand` governor
pub fn dod_governor() -> ClassOrInterfaceTypeDetails {
    let physical = dod_id().with_kind(MetadataKind::PhysicalType);
    TypeDetailsBuilder::new(&physical, Modifier::PUBLIC, JavaType::new(PERSON_DOD), PhysicalTypeCategory::Class)
        .build()
        .unwrap()
}

/// Sample-data input for `Person` as declared by `entity`
pub fn person_dod_input(entity: ClassOrInterfaceTypeDetails) -> DataOnDemandInput {
    DataOnDemandInput {
        governor: dod_governor(),
        entity: JavaType::new(PERSON),
        entity_members: MemberDetails::new(vec![entity]),
        quantity: DEFAULT_QUANTITY,
        identifier_accessor: JavaSymbolName::new("getId"),
        identifier_type: well_known::LONG_OBJECT.clone(),
        operations: person_operations(),
        collaborators: IndexMap::new(),
        embedded_identifier: None,
        embedded: Vec::new(),
        upstream: vec![physical_id(PERSON)],
    }
}

/// Context over a fresh in-memory store, writing immediately
pub fn setup_test_context() -> (Arc<MemoryFileStore>, EngineContext) {
    setup_test_context_with(EngineConfig::default().with_immediate_writes(true))
}

pub fn setup_test_context_with(config: EngineConfig) -> (Arc<MemoryFileStore>, EngineContext) {
    let store = Arc::new(MemoryFileStore::new());
    let context = EngineContext::new(config, Arc::clone(&store) as Arc<dyn FileStore>).unwrap();
    (store, context)
}
