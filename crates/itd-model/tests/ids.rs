use itd_model::{JavaType, LogicalPath, MetadataId, MetadataKind, PathKind};
use proptest::prelude::*;

fn package_segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}"
}

fn type_segment() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9]{0,8}"
}

fn path_kind() -> impl Strategy<Value = PathKind> {
    prop_oneof![
        Just(PathKind::SrcMainJava),
        Just(PathKind::SrcTestJava),
        Just(PathKind::SrcMainResources),
        Just(PathKind::SrcTestResources),
        Just(PathKind::SrcMainWebapp),
        Just(PathKind::Root),
    ]
}

fn kind() -> impl Strategy<Value = MetadataKind> {
    prop_oneof![
        Just(MetadataKind::PhysicalType),
        Just(MetadataKind::DataOnDemand),
        Just(MetadataKind::Identifier),
        Just(MetadataKind::Editor),
        Just(MetadataKind::WebScaffold),
        Just(MetadataKind::Plural),
        "x-[a-z]{1,8}".prop_map(MetadataKind::Other),
    ]
}

proptest! {
    #[test]
    fn prop_instance_id_parses_back(
        packages in proptest::collection::vec(package_segment(), 0..4),
        simple in type_segment(),
        module in "([a-z][a-z0-9]{0,5})?",
        path_kind in path_kind(),
        kind in kind(),
    ) {
        let mut segments = packages;
        segments.push(simple);
        let java_type = JavaType::new(segments.join("."));
        let id = MetadataId::for_type(kind, LogicalPath::new(module, path_kind), java_type);

        let parsed = MetadataId::parse(&id.to_string()).unwrap();
        prop_assert_eq!(&parsed, &id);
        prop_assert!(parsed.is_instance_level());
        prop_assert_eq!(parsed.to_class_level().to_string(), format!("MID:{}", id.kind()));
    }

    #[test]
    fn prop_package_excludes_type_segments(
        packages in proptest::collection::vec(package_segment(), 1..4),
        outer in type_segment(),
        inner in type_segment(),
    ) {
        let package = packages.join(".");
        let nested = JavaType::new(format!("{package}.{outer}.{inner}"));
        let nested_package = nested.package();
        prop_assert_eq!(nested_package.fully_qualified_package_name(), package.as_str());
        prop_assert_eq!(nested.simple_type_name(), inner.as_str());
    }
}

#[test]
fn parse_rejects_trailing_dot_in_instance() {
    assert!(MetadataId::parse("MID:dod#SRC_MAIN_JAVA?com.foo.").is_err());
}
