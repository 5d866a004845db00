use itd_builder::emit::emit_compilation_unit;
use itd_builder::{FieldMetadataBuilder, Modifier, PhysicalTypeCategory, TypeDetailsBuilder};
use itd_model::{JavaSymbolName, JavaType, LogicalPath, MetadataId, MetadataKind, PathKind};
use proptest::prelude::*;

const TYPES: &[&str] = &[
    "java.lang.String",
    "java.util.Date",
    "java.sql.Date",
    "java.math.BigDecimal",
    "com.foo.Order",
    "com.bar.Order",
    "com.foo.Order.LineId",
    "java.util.Calendar",
];

fn person() -> (MetadataId, TypeDetailsBuilder) {
    let ty = JavaType::new("com.foo.Person");
    let id = MetadataId::for_type(
        MetadataKind::PhysicalType,
        LogicalPath::root_module(PathKind::SrcMainJava),
        ty.clone(),
    );
    let builder = TypeDetailsBuilder::new(&id, Modifier::PUBLIC, ty, PhysicalTypeCategory::Class);
    (id, builder)
}

fn emit(field_types: &[usize]) -> String {
    let (id, mut b) = person();
    for (i, t) in field_types.iter().enumerate() {
        b.add_field(FieldMetadataBuilder::new(
            &id,
            Modifier::PRIVATE,
            JavaSymbolName::new(format!("f{i}")),
            JavaType::new(TYPES[*t]),
        ))
        .unwrap();
    }
    emit_compilation_unit(&b.build().unwrap())
}

proptest! {
    #[test]
    fn prop_emission_is_deterministic(types in proptest::collection::vec(0..TYPES.len(), 0..12)) {
        prop_assert_eq!(emit(&types), emit(&types));
    }

    #[test]
    fn prop_imports_sorted_and_unique(types in proptest::collection::vec(0..TYPES.len(), 0..12)) {
        let text = emit(&types);
        let imports: Vec<&str> = text
            .lines()
            .filter_map(|l| l.strip_prefix("import "))
            .collect();
        let mut sorted = imports.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(&imports, &sorted);
        prop_assert!(!imports.iter().any(|i| i.starts_with("java.lang.")));
        prop_assert!(!imports.contains(&"com.foo.Order;"));
    }
}

#[test]
fn clashing_order_types_keep_first_import() {
    let text = emit(&[5, 4]);
    assert!(text.contains("import com.bar.Order;"));
    assert!(text.contains("    private Order f0;"));
    assert!(text.contains("    private com.foo.Order f1;"));
}
