use indexmap::IndexMap;
use itd_builder::{AnnotationMetadataBuilder, FieldMetadata, FieldMetadataBuilder, MemberDetails, Modifier, PhysicalTypeCategory, TypeDetailsBuilder};
use itd_model::{well_known, JavaSymbolName, JavaType, LogicalPath, MetadataId, MetadataKind, PathKind};
use itd_providers::naming::{candidate_name, resolve_field_name, FieldRef};
use itd_providers::{
    build_data_on_demand, field_initializer, field_validation_body, persistence_matchers, CustomDataKeyDecorator,
    DataOnDemandInput, MemberTypeAdditions, OperationKind, OperationSet, ValueTarget, DEFAULT_QUANTITY,
};
use proptest::prelude::*;

fn person() -> JavaType {
    JavaType::new("com.foo.Person")
}

fn entity_id() -> MetadataId {
    MetadataId::for_type(MetadataKind::PhysicalType, LogicalPath::root_module(PathKind::SrcMainJava), person())
}

fn dod_id() -> MetadataId {
    MetadataId::for_type(
        MetadataKind::DataOnDemand,
        LogicalPath::root_module(PathKind::SrcTestJava),
        JavaType::new("com.foo.PersonDataOnDemand"),
    )
}

const FIELD_TYPES: &[&str] = &[
    "java.lang.String",
    "java.lang.Integer",
    "java.util.Date",
    "java.math.BigDecimal",
    "java.lang.Boolean",
    "java.util.Calendar",
    "java.lang.Long",
];

/// Evaluate `"lit" + index + "lit"` style sample expressions
fn evaluate(expression: &str, index: u32) -> Option<String> {
    let mut out = String::new();
    for part in expression.split(" + ") {
        if part == "index" {
            out.push_str(&index.to_string());
        } else if part.len() >= 2 && part.starts_with('"') && part.ends_with('"') {
            out.push_str(&part[1..part.len() - 1]);
        } else if let Some(arg) = part.strip_prefix("String.valueOf(").and_then(|p| p.strip_suffix(')')) {
            if arg != "index" {
                return None;
            }
            out.push_str(&index.to_string());
        } else {
            return None;
        }
    }
    Some(out)
}

/// Apply a `substring(0, max)` clamp if the mutator body carries one
fn clamp(body: &str, name: &str, value: String) -> String {
    let marker = format!("{name} = {name}.substring(0, ");
    let Some(start) = body.find(&marker) else {
        return value;
    };
    let rest = &body[start + marker.len()..];
    let max: usize = rest[..rest.find(')').unwrap_or(0)].parse().unwrap_or(usize::MAX);
    if value.chars().count() > max {
        value.chars().take(max).collect()
    } else {
        value
    }
}

fn existing_rnd_fields(shapes: &[(bool, bool)]) -> Vec<FieldMetadata> {
    shapes
        .iter()
        .enumerate()
        .map(|(i, (private, random))| {
            let modifier = if *private { Modifier::PRIVATE } else { Modifier::PUBLIC };
            let ty = if *random { well_known::RANDOM.clone() } else { well_known::INT_PRIMITIVE.clone() };
            FieldMetadataBuilder::new(&dod_id(), modifier, candidate_name("rnd", i), ty).build().unwrap()
        })
        .collect()
}

fn dod_input(field_types: &[usize]) -> DataOnDemandInput {
    let id = entity_id();
    let mut entity = TypeDetailsBuilder::new(&id, Modifier::PUBLIC, person(), PhysicalTypeCategory::Class);
    for (i, t) in field_types.iter().enumerate() {
        entity
            .add_field(FieldMetadataBuilder::new(&id, Modifier::PRIVATE, JavaSymbolName::new(format!("field{i}")), JavaType::new(FIELD_TYPES[*t])))
            .unwrap();
    }
    let governor_id = dod_id().with_kind(MetadataKind::PhysicalType);
    let governor = TypeDetailsBuilder::new(&governor_id, Modifier::PUBLIC, JavaType::new("com.foo.PersonDataOnDemand"), PhysicalTypeCategory::Class);
    DataOnDemandInput {
        governor: governor.build().unwrap(),
        entity: person(),
        entity_members: MemberDetails::new(vec![entity.build().unwrap()]),
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
        upstream: Vec::new(),
    }
}

fn emit_dod(input: &DataOnDemandInput) -> String {
    let decorator = CustomDataKeyDecorator::new();
    decorator.register_matchers("com.foo.Jpa", persistence_matchers());
    let decorated = decorator.decorate(&input.entity_members).unwrap();
    build_data_on_demand(&dod_id(), input, &decorated, 4).unwrap().emit().unwrap()
}

proptest! {
    #[test]
    fn prop_resolved_name_never_shadows_incompatible_fields(
        shapes in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..6)
    ) {
        let existing = existing_rnd_fields(&shapes);
        let resolved = resolve_field_name(&existing, &dod_id(), "rnd", &well_known::RANDOM, None);
        let first_compatible = shapes.iter().position(|(private, random)| *private && *random);

        match (&resolved, first_compatible) {
            (FieldRef::Reused(name), Some(i)) => prop_assert_eq!(name, &candidate_name("rnd", i)),
            (FieldRef::Allocated(field), None) => {
                prop_assert_eq!(field.field_name(), &candidate_name("rnd", shapes.len()));
                prop_assert!(existing.iter().all(|f| f.field_name() != field.field_name()));
            }
            (other, expected) => prop_assert!(false, "resolved {:?} but first compatible was {:?}", other, expected),
        }
        prop_assert_eq!(resolve_field_name(&existing, &dod_id(), "rnd", &well_known::RANDOM, None), resolved);
    }

    #[test]
    fn prop_sized_strings_stay_within_bounds(name in "[a-z][a-zA-Z]{0,14}", index in 0u32..u32::MAX) {
        let mut size = AnnotationMetadataBuilder::new(&well_known::SIZE);
        size.add_integer_attribute("min", 5);
        size.add_integer_attribute("max", 10);
        let mut field = FieldMetadataBuilder::new(&entity_id(), Modifier::PRIVATE, JavaSymbolName::new(name.clone()), well_known::STRING.clone());
        field.add_annotation(size);
        let field = field.build().unwrap();

        let init = field_initializer(&field, &person(), &IndexMap::new()).unwrap();
        let body = field_validation_body(&field, &init.expression, ValueTarget::Mutator("setValue"), 4).unwrap().body;
        let raw = evaluate(&init.expression, index);
        prop_assert!(raw.is_some(), "unexpected initializer {}", init.expression);
        let value = clamp(&body, &name, raw.unwrap_or_default());
        let length = value.chars().count();
        prop_assert!((5..=10).contains(&length), "{:?} has length {}", value, length);
    }

    #[test]
    fn prop_sample_data_emission_is_deterministic(types in proptest::collection::vec(0..FIELD_TYPES.len(), 0..8)) {
        let input = dod_input(&types);
        prop_assert_eq!(emit_dod(&input), emit_dod(&input));
    }
}
