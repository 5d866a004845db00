//! Compilation unit emission

use super::{seeded_resolver, write_preamble, write_type, EmitOptions, MemberStyle};
use crate::type_details::ClassOrInterfaceTypeDetails;

/// Emit a `.java` compilation unit with default layout
#[must_use]
pub fn emit_compilation_unit(details: &ClassOrInterfaceTypeDetails) -> String {
    emit_compilation_unit_with(details, EmitOptions::default())
}

/// Emit a `.java` compilation unit
#[must_use]
pub fn emit_compilation_unit_with(details: &ClassOrInterfaceTypeDetails, opts: EmitOptions) -> String {
    let mut resolver = seeded_resolver(details.name(), details.registered_imports());
    let mut body = String::new();
    write_type(&mut body, details, MemberStyle::Declared, &mut resolver, opts, 0);

    let mut out = String::new();
    write_preamble(&mut out, &details.name().package(), &resolver.imports());
    out.push_str(&body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationMetadataBuilder;
    use crate::body::InvocableMemberBodyBuilder;
    use crate::field::FieldMetadataBuilder;
    use crate::method::{ConstructorMetadataBuilder, MethodMetadataBuilder, MethodParameter};
    use crate::modifier::Modifier;
    use crate::type_details::{PhysicalTypeCategory, TypeDetailsBuilder};
    use itd_model::{well_known, JavaSymbolName, JavaType, LogicalPath, MetadataId, MetadataKind, PathKind};
    use pretty_assertions::assert_eq;

    fn id(ty: &str) -> MetadataId {
        MetadataId::for_type(
            MetadataKind::PhysicalType,
            LogicalPath::root_module(PathKind::SrcMainJava),
            JavaType::new(ty),
        )
    }

    #[test]
    fn class_with_members() {
        let id = id("com.foo.Person");
        let mut b = TypeDetailsBuilder::new(&id, Modifier::PUBLIC, JavaType::new("com.foo.Person"), PhysicalTypeCategory::Class);
        b.add_annotation(AnnotationMetadataBuilder::new(&JavaType::new("javax.persistence.Entity")));
        b.add_implements(JavaType::new("java.io.Serializable"));

        let mut size = AnnotationMetadataBuilder::new(&well_known::SIZE);
        size.add_integer_attribute("min", 5).add_integer_attribute("max", 10);
        let mut name = FieldMetadataBuilder::new(&id, Modifier::PRIVATE, JavaSymbolName::new("name"), well_known::STRING.clone());
        name.add_annotation(size);
        b.add_field(name).unwrap();
        b.add_field(FieldMetadataBuilder::new(&id, Modifier::PRIVATE, JavaSymbolName::new("born"), well_known::DATE.clone()))
            .unwrap();

        b.add_constructor(ConstructorMetadataBuilder::new(&id, Modifier::PUBLIC, "super();")).unwrap();

        let mut body = InvocableMemberBodyBuilder::new();
        body.append_formal_line("if (name == null) {")
            .indent()
            .append_formal_line("return \"\";")
            .indent_remove()
            .append_formal_line("}")
            .new_line()
            .append_formal_line("return name;");
        b.add_method(
            MethodMetadataBuilder::new(&id, Modifier::PUBLIC, JavaSymbolName::new("getName"), well_known::STRING.clone(), body.into_output()),
        )
        .unwrap();

        let text = emit_compilation_unit(&b.build().unwrap());
        let expected = "\
package com.foo;

import java.io.Serializable;
import java.util.Date;
import javax.persistence.Entity;
import javax.validation.constraints.Size;

@Entity
public class Person implements Serializable {

    @Size(min = 5, max = 10)
    private String name;

    private Date born;

    public Person() {
        super();
    }

    public String getName() {
        if (name == null) {
            return \"\";
        }

        return name;
    }
}
";
        assert_eq!(text, expected);
    }

    #[test]
    fn enum_with_constants_and_inner_type() {
        let id = id("com.foo.Color");
        let mut b = TypeDetailsBuilder::new(&id, Modifier::PUBLIC, JavaType::new("com.foo.Color"), PhysicalTypeCategory::Enumeration);
        b.add_enum_constant(JavaSymbolName::new("RED")).unwrap();
        b.add_enum_constant(JavaSymbolName::new("GREEN")).unwrap();
        let inner = TypeDetailsBuilder::new(
            &id,
            Modifier::PUBLIC | Modifier::STATIC,
            JavaType::new("com.foo.Color.Shade"),
            PhysicalTypeCategory::Interface,
        );
        b.add_inner_type(inner);

        let text = emit_compilation_unit(&b.build().unwrap());
        let expected = "\
package com.foo;

public enum Color {

    RED, GREEN;

    public static interface Shade {
    }
}
";
        assert_eq!(text, expected);
    }

    #[test]
    fn parameters_keep_order_and_annotations() {
        let id = id("com.foo.web.PersonController");
        let mut b = TypeDetailsBuilder::new(
            &id,
            Modifier::PUBLIC,
            JavaType::new("com.foo.web.PersonController"),
            PhysicalTypeCategory::Class,
        );
        let mut path_variable = AnnotationMetadataBuilder::new(&well_known::PATH_VARIABLE);
        path_variable.add_string_attribute("value", "id");
        b.add_method(
            MethodMetadataBuilder::new(&id, Modifier::PUBLIC, JavaSymbolName::new("show"), well_known::STRING.clone(), "return \"x\";")
                .with_parameters(vec![
                    MethodParameter::new(well_known::LONG_OBJECT.clone(), "id").annotated(path_variable.build()),
                    MethodParameter::new(well_known::MODEL.clone(), "uiModel"),
                ]),
        )
        .unwrap();
        let text = emit_compilation_unit(&b.build().unwrap());
        assert!(text.contains("    public String show(@PathVariable(\"id\") Long id, Model uiModel) {\n"));
        assert!(text.contains("import org.springframework.ui.Model;\n"));
    }

    #[test]
    fn default_package_has_no_package_line() {
        let id = id("Thing");
        let b = TypeDetailsBuilder::new(&id, Modifier::PUBLIC, JavaType::new("Thing"), PhysicalTypeCategory::Class);
        assert_eq!(emit_compilation_unit(&b.build().unwrap()), "public class Thing {\n}\n");
    }
}
