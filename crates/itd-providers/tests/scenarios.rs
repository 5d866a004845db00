use indexmap::IndexMap;
use itd_builder::{
    AnnotationMetadataBuilder, ClassOrInterfaceTypeDetails, FieldMetadataBuilder, MemberDetails, Modifier, PhysicalTypeCategory,
    TypeDetailsBuilder,
};
use itd_graph::DependencyRegistry;
use itd_model::{well_known, JavaSymbolName, JavaType, LogicalPath, MetadataId, MetadataKind, PathKind};
use itd_providers::naming::{resolve_field_name, FieldRef};
use itd_providers::{
    field_initializer, field_validation_body, max_pages, persistence_matchers, CustomDataKeyDecorator, DataOnDemandInput,
    DataOnDemandProvider, InputTable, MemberTypeAdditions, MetadataProvider, OperationKind, OperationSet, ProvidedMetadata,
    ProviderContext, ValueTarget, DEFAULT_QUANTITY,
};
use pretty_assertions::assert_eq;

fn person() -> JavaType {
    JavaType::new("com.foo.Person")
}

fn entity_id() -> MetadataId {
    MetadataId::for_type(MetadataKind::PhysicalType, LogicalPath::root_module(PathKind::SrcMainJava), person())
}

fn dod_type() -> JavaType {
    JavaType::new("com.foo.PersonDataOnDemand")
}

fn dod_id() -> MetadataId {
    MetadataId::for_type(MetadataKind::DataOnDemand, LogicalPath::root_module(PathKind::SrcTestJava), dod_type())
}

fn entity(fields: Vec<FieldMetadataBuilder>) -> MemberDetails {
    let id = entity_id();
    let mut b = TypeDetailsBuilder::new(&id, Modifier::PUBLIC, person(), PhysicalTypeCategory::Class);
    let mut pk = FieldMetadataBuilder::new(&id, Modifier::PRIVATE, JavaSymbolName::new("id"), well_known::LONG_OBJECT.clone());
    pk.add_annotation(AnnotationMetadataBuilder::new(&well_known::ID));
    b.add_field(pk).unwrap();
    for field in fields {
        b.add_field(field).unwrap();
    }
    MemberDetails::new(vec![b.build().unwrap()])
}

fn governor(fields: Vec<FieldMetadataBuilder>) -> ClassOrInterfaceTypeDetails {
    let id = dod_id().with_kind(MetadataKind::PhysicalType);
    let mut b = TypeDetailsBuilder::new(&id, Modifier::PUBLIC, dod_type(), PhysicalTypeCategory::Class);
    for mut field in fields {
        field.set_declared_by(&id);
        b.add_field(field).unwrap();
    }
    b.build().unwrap()
}

fn input(governor: ClassOrInterfaceTypeDetails, members: MemberDetails) -> DataOnDemandInput {
    DataOnDemandInput {
        governor,
        entity: person(),
        entity_members: members,
        quantity: DEFAULT_QUANTITY,
        identifier_accessor: JavaSymbolName::new("getId"),
        identifier_type: well_known::LONG_OBJECT.clone(),
        operations: OperationSet::new()
            .with(OperationKind::Find, MemberTypeAdditions::new("findPerson", "Person.findPerson(id)"))
            .with(OperationKind::FindEntries, MemberTypeAdditions::new("findPersonEntries", "Person.findPersonEntries(from, to)"))
            .with(OperationKind::Persist, MemberTypeAdditions::new("persist", "obj.persist()")),
        collaborators: IndexMap::new(),
        embedded_identifier: None,
        embedded: Vec::new(),
        upstream: vec![entity_id()],
    }
}

fn compute(input: DataOnDemandInput) -> (ProvidedMetadata, DependencyRegistry) {
    let table = InputTable::new();
    table.insert(dod_id(), input);
    let provider = DataOnDemandProvider::new(table);
    let graph = DependencyRegistry::new();
    let decorator = CustomDataKeyDecorator::new();
    decorator.register_matchers("com.foo.Jpa", persistence_matchers());
    let ctx = ProviderContext { registry: &graph, decorator: &decorator, indent_width: 4 };
    let provided = provider.compute(&dod_id(), &ctx).unwrap().unwrap();
    (provided, graph)
}

#[test]
fn unconstrained_string_uses_name_and_index() {
    let field = FieldMetadataBuilder::new(&entity_id(), Modifier::PRIVATE, JavaSymbolName::new("name"), well_known::STRING.clone())
        .build()
        .unwrap();
    let init = field_initializer(&field, &person(), &IndexMap::new()).unwrap();
    assert_eq!(init.expression, "\"name_\" + index");
    assert!(init.collaborator.is_none());

    let (provided, _) = compute(input(
        governor(vec![]),
        entity(vec![FieldMetadataBuilder::new(&entity_id(), Modifier::PRIVATE, JavaSymbolName::new("name"), well_known::STRING.clone())]),
    ));
    let text = provided.as_itd().unwrap().emit().unwrap();
    assert!(text.contains("String name = \"name_\" + index;"));
    assert!(text.contains("obj.setName(name);"));
}

#[test]
fn digits_clamp_to_largest_representable_value() {
    let mut digits = AnnotationMetadataBuilder::new(&well_known::DIGITS);
    digits.add_integer_attribute("integer", 3);
    digits.add_integer_attribute("fraction", 2);
    let mut price = FieldMetadataBuilder::new(&entity_id(), Modifier::PRIVATE, JavaSymbolName::new("price"), well_known::BIG_DECIMAL.clone());
    price.add_annotation(digits);
    let field = price.clone().build().unwrap();

    let init = field_initializer(&field, &person(), &IndexMap::new()).unwrap();
    let body = field_validation_body(&field, &init.expression, ValueTarget::Mutator("setPrice"), 4).unwrap().body;
    assert!(body.contains("if (price.compareTo(new BigDecimal(\"999.99\")) == 1) {"));
    assert!(body.contains("    price = new BigDecimal(\"999.99\");"));

    let (provided, _) = compute(input(governor(vec![]), entity(vec![price])));
    let text = provided.as_itd().unwrap().emit().unwrap();
    assert!(text.contains("price = new BigDecimal(\"999.99\");"));
}

#[test]
fn rnd_is_allocated_or_reused() {
    let required = &*well_known::RANDOM;
    let allocated = resolve_field_name(&[], &dod_id(), "rnd", required, Some("new SecureRandom()"));
    assert!(matches!(&allocated, FieldRef::Allocated(f) if f.field_name().symbol_name() == "rnd"));

    let donated = FieldMetadataBuilder::new(&dod_id(), Modifier::PRIVATE, JavaSymbolName::new("rnd"), required.clone());
    let existing = vec![donated.clone().build().unwrap()];
    let reused = resolve_field_name(&existing, &dod_id(), "rnd", required, None);
    assert_eq!(reused, FieldRef::Reused(JavaSymbolName::new("rnd")));

    let (with_rnd, _) = compute(input(governor(vec![donated]), entity(vec![])));
    let members = with_rnd.as_itd().unwrap().itd().unwrap().members();
    assert!(members.declared_field(&JavaSymbolName::new("rnd")).is_none());
    assert!(members.declared_field(&JavaSymbolName::new("rnd_")).is_none());

    let (without, _) = compute(input(governor(vec![]), entity(vec![])));
    let members = without.as_itd().unwrap().itd().unwrap().members();
    let rnd = members.declared_field(&JavaSymbolName::new("rnd")).unwrap();
    assert_eq!(rnd.field_type(), required);
}

#[test]
fn list_pagination_rounds_up() {
    assert_eq!(max_pages(25, 10), 3);
    assert_eq!(max_pages(30, 10), 3);
    assert_eq!(max_pages(0, 10), 1);
}

#[test]
fn provider_registers_upstream_edges() {
    let (provided, graph) = compute(input(governor(vec![]), entity(vec![])));
    assert!(provided.is_valid());
    assert!(graph.contains_dependency(&entity_id(), &dod_id()));
    assert!(graph.contains_dependency(&dod_id().with_kind(MetadataKind::PhysicalType), &dod_id()));
}
