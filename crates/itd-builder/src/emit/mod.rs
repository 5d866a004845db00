//! Source emission
//!
//! Turns type snapshots back into compilable text. Member order, modifier
//! order, annotation attribute order and parameter order are written
//! exactly as built; only the import list is sorted.

mod itd;
mod java;

pub use itd::{emit_introduction_unit, emit_introduction_unit_with, INTRODUCTION_UNIT_HEADER};
pub use java::{emit_compilation_unit, emit_compilation_unit_with};

use crate::annotation::{AnnotationMetadata, AnnotationValue};
use crate::field::FieldMetadata;
use crate::imports::ImportRegistrationResolver;
use crate::method::{ConstructorMetadata, InitializerMetadata, MethodMetadata, MethodParameter};
use crate::modifier::Modifier;
use crate::type_details::{ClassOrInterfaceTypeDetails, PhysicalTypeCategory};
use itd_model::{JavaPackage, JavaType};
use std::fmt::Write as _;

/// Layout settings for emitted text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    /// Spaces per indentation level
    pub indent_width: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

impl EmitOptions {
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    fn pad(self, level: usize) -> String {
        " ".repeat(self.indent_width * level)
    }
}

/// How member names are written inside a type body
#[derive(Debug, Clone, Copy)]
enum MemberStyle<'a> {
    /// Plain class body
    Declared,
    /// Inter-type declaration, names qualified with the governor (`Person.name`)
    Introduced(&'a str),
}

impl MemberStyle<'_> {
    fn qualify(self, name: &str) -> String {
        match self {
            Self::Declared => name.to_string(),
            Self::Introduced(governor) => format!("{governor}.{name}"),
        }
    }
}

fn modifier_prefix(modifier: Modifier) -> String {
    if modifier.is_empty() {
        String::new()
    } else {
        format!("{modifier} ")
    }
}

fn escape_java(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

fn render_value(value: &AnnotationValue, r: &mut ImportRegistrationResolver) -> String {
    match value {
        AnnotationValue::Boolean(b) => b.to_string(),
        AnnotationValue::Char(c) => match c {
            '\'' => "'\\''".to_string(),
            '\\' => "'\\\\'".to_string(),
            other => format!("'{other}'"),
        },
        AnnotationValue::Integer(i) => i.to_string(),
        AnnotationValue::Long(l) => format!("{l}L"),
        AnnotationValue::Double(d) => format!("{d:?}"),
        AnnotationValue::String(s) => format!("\"{}\"", escape_java(s)),
        AnnotationValue::Class(t) => format!("{}.class", r.name_of(t)),
        AnnotationValue::Enum(e) => format!("{}.{}", r.name_of(&e.enum_type), e.name),
        AnnotationValue::Nested(a) => render_annotation(a, r),
        AnnotationValue::Array(values) if values.is_empty() => "{}".to_string(),
        AnnotationValue::Array(values) => {
            let items: Vec<String> = values.iter().map(|v| render_value(v, r)).collect();
            format!("{{ {} }}", items.join(", "))
        }
    }
}

/// `@Size(min = 5, max = 10)`, `@PathVariable("id")` or `@Component`
pub(crate) fn render_annotation(
    annotation: &AnnotationMetadata,
    r: &mut ImportRegistrationResolver,
) -> String {
    let mut out = format!("@{}", r.name_of(annotation.annotation_type()));
    match annotation.attributes() {
        [] => {}
        [only] if only.name == "value" => {
            let _ = write!(out, "({})", render_value(&only.value, r));
        }
        attributes => {
            let rendered: Vec<String> = attributes
                .iter()
                .map(|a| format!("{} = {}", a.name, render_value(&a.value, r)))
                .collect();
            let _ = write!(out, "({})", rendered.join(", "));
        }
    }
    out
}

fn render_parameters(parameters: &[MethodParameter], r: &mut ImportRegistrationResolver) -> String {
    parameters
        .iter()
        .map(|p| {
            let mut rendered = String::new();
            for annotation in &p.annotations {
                rendered.push_str(&render_annotation(annotation, r));
                rendered.push(' ');
            }
            let _ = write!(rendered, "{} {}", r.name_of(&p.java_type), p.name);
            rendered
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_throws(throws: &[JavaType], r: &mut ImportRegistrationResolver) -> String {
    if throws.is_empty() {
        return String::new();
    }
    let names: Vec<String> = throws.iter().map(|t| r.name_of(t)).collect();
    format!(" throws {}", names.join(", "))
}

fn write_annotations(
    out: &mut String,
    annotations: &[AnnotationMetadata],
    r: &mut ImportRegistrationResolver,
    pad: &str,
) {
    for annotation in annotations {
        let _ = writeln!(out, "{pad}{}", render_annotation(annotation, r));
    }
}

fn write_body(out: &mut String, body: &str, pad: &str) {
    for line in body.lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, "{pad}{line}");
        }
    }
}

fn render_field(
    field: &FieldMetadata,
    style: MemberStyle<'_>,
    r: &mut ImportRegistrationResolver,
    opts: EmitOptions,
    level: usize,
) -> String {
    let pad = opts.pad(level);
    let mut out = String::new();
    write_annotations(&mut out, field.annotations(), r, &pad);
    let _ = write!(
        out,
        "{pad}{}{} {}",
        modifier_prefix(field.modifier()),
        r.name_of(field.field_type()),
        style.qualify(field.field_name().symbol_name())
    );
    if let Some(initializer) = field.initializer() {
        let _ = write!(out, " = {initializer}");
    }
    out.push_str(";\n");
    out
}

fn render_constructor(
    constructor: &ConstructorMetadata,
    type_name: &str,
    style: MemberStyle<'_>,
    r: &mut ImportRegistrationResolver,
    opts: EmitOptions,
    level: usize,
) -> String {
    let pad = opts.pad(level);
    let mut out = String::new();
    write_annotations(&mut out, constructor.annotations(), r, &pad);
    let name = match style {
        MemberStyle::Declared => type_name.to_string(),
        MemberStyle::Introduced(_) => style.qualify("new"),
    };
    let _ = writeln!(
        out,
        "{pad}{}{name}({}){} {{",
        modifier_prefix(constructor.modifier()),
        render_parameters(constructor.parameters(), r),
        render_throws(constructor.throws(), r)
    );
    write_body(&mut out, constructor.body(), &opts.pad(level + 1));
    let _ = writeln!(out, "{pad}}}");
    out
}

fn render_method(
    method: &MethodMetadata,
    style: MemberStyle<'_>,
    r: &mut ImportRegistrationResolver,
    opts: EmitOptions,
    level: usize,
) -> String {
    let pad = opts.pad(level);
    let mut out = String::new();
    write_annotations(&mut out, method.annotations(), r, &pad);
    let _ = write!(
        out,
        "{pad}{}{} {}({}){}",
        modifier_prefix(method.modifier()),
        r.name_of(method.return_type()),
        style.qualify(method.method_name().symbol_name()),
        render_parameters(method.parameters(), r),
        render_throws(method.throws(), r)
    );
    match method.body() {
        Some(body) => {
            out.push_str(" {\n");
            write_body(&mut out, body, &opts.pad(level + 1));
            let _ = writeln!(out, "{pad}}}");
        }
        None => out.push_str(";\n"),
    }
    out
}

fn render_initializer(initializer: &InitializerMetadata, opts: EmitOptions, level: usize) -> String {
    let pad = opts.pad(level);
    let mut out = String::new();
    let _ = writeln!(out, "{pad}{}{{", if initializer.is_static() { "static " } else { "" });
    write_body(&mut out, initializer.body(), &opts.pad(level + 1));
    let _ = writeln!(out, "{pad}}}");
    out
}

/// Simple name plus type variables (`Person`, `Page<T>`)
fn declaration_name(java_type: &JavaType, r: &mut ImportRegistrationResolver) -> String {
    let mut name = java_type.simple_type_name().to_string();
    if !java_type.parameters().is_empty() {
        let params: Vec<String> = java_type.parameters().iter().map(|p| r.name_of(p)).collect();
        let _ = write!(name, "<{}>", params.join(", "));
    }
    name
}

/// Every member block of a type body, in emission order
fn member_blocks(
    details: &ClassOrInterfaceTypeDetails,
    style: MemberStyle<'_>,
    r: &mut ImportRegistrationResolver,
    opts: EmitOptions,
    level: usize,
) -> Vec<String> {
    let mut blocks = Vec::new();
    if !details.enum_constants().is_empty() {
        let constants: Vec<&str> = details
            .enum_constants()
            .iter()
            .map(|c| c.symbol_name())
            .collect();
        blocks.push(format!("{}{};\n", opts.pad(level), constants.join(", ")));
    }
    for field in details.declared_fields() {
        blocks.push(render_field(field, style, r, opts, level));
    }
    for initializer in details.declared_initializers() {
        blocks.push(render_initializer(initializer, opts, level));
    }
    let type_name = details.name().simple_type_name().to_string();
    for constructor in details.declared_constructors() {
        blocks.push(render_constructor(constructor, &type_name, style, r, opts, level));
    }
    for method in details.declared_methods() {
        blocks.push(render_method(method, style, r, opts, level));
    }
    for inner in details.inner_types() {
        let mut block = String::new();
        write_type(&mut block, inner, style, r, opts, level);
        blocks.push(block);
    }
    blocks
}

/// Type declaration with annotations and members at `level`
fn write_type(
    out: &mut String,
    details: &ClassOrInterfaceTypeDetails,
    style: MemberStyle<'_>,
    r: &mut ImportRegistrationResolver,
    opts: EmitOptions,
    level: usize,
) {
    let pad = opts.pad(level);
    write_annotations(out, details.annotations(), r, &pad);

    let name = declaration_name(details.name(), r);
    let _ = write!(
        out,
        "{pad}{}{} {}",
        modifier_prefix(details.modifier()),
        details.category().keyword(),
        style.qualify(&name)
    );

    let supertypes = |types: &[JavaType], r: &mut ImportRegistrationResolver| {
        types.iter().map(|t| r.name_of(t)).collect::<Vec<_>>().join(", ")
    };
    match details.category() {
        PhysicalTypeCategory::Interface if !details.extends_types().is_empty() => {
            let _ = write!(out, " extends {}", supertypes(details.extends_types(), r));
        }
        PhysicalTypeCategory::Class => {
            if let Some(parent) = details.extends_types().first() {
                let _ = write!(out, " extends {}", r.name_of(parent));
            }
        }
        _ => {}
    }
    if details.category() != PhysicalTypeCategory::Interface && !details.implements_types().is_empty() {
        let _ = write!(out, " implements {}", supertypes(details.implements_types(), r));
    }
    out.push_str(" {\n");

    // only the type name is qualified; its own members are plain declarations
    for block in member_blocks(details, MemberStyle::Declared, r, opts, level + 1) {
        out.push('\n');
        out.push_str(&block);
    }
    let _ = writeln!(out, "{pad}}}");
}

/// `package x;` and the sorted import block
fn write_preamble(out: &mut String, package: &JavaPackage, imports: &[JavaType]) {
    if !package.is_default() {
        let _ = writeln!(out, "package {package};");
        out.push('\n');
    }
    if !imports.is_empty() {
        let mut names: Vec<&str> = imports.iter().map(JavaType::fully_qualified_type_name).collect();
        names.sort_unstable();
        names.dedup();
        for name in names {
            let _ = writeln!(out, "import {name};");
        }
        out.push('\n');
    }
}

/// Resolver for a unit declaring `unit_type`, seeded with previously registered imports
fn seeded_resolver(unit_type: &JavaType, registered: &[JavaType]) -> ImportRegistrationResolver {
    let mut r = ImportRegistrationResolver::for_type(unit_type);
    for import in registered {
        r.add_import(import);
    }
    r
}
