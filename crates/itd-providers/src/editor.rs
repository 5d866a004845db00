//! Property editor units (`_Roo_Editor`)

use crate::error::{ProviderError, Result};
use crate::operations::MemberTypeAdditions;
use crate::provider::{ensure_instance_of, register_upstream, InputResolver, ItdMetadata, MetadataProvider, ProvidedMetadata, ProviderContext};
use itd_builder::{
    ClassOrInterfaceTypeDetails, FieldMetadataBuilder, InvocableMemberBodyBuilder, ItdTypeDetails, ItdTypeDetailsBuilder,
    MethodMetadataBuilder, MethodParameter, Modifier,
};
use itd_model::{well_known, JavaSymbolName, JavaType, MetadataId, MetadataKind};
use std::sync::Arc;
use tracing::debug;

const ASPECT_SUFFIX: &str = "Editor";
const CONVERTER_FIELD: &str = "typeConverter";

/// Inputs for one editor type
#[derive(Debug, Clone)]
pub struct EditorInput {
    pub governor: ClassOrInterfaceTypeDetails,
    /// Entity the editor converts
    pub entity: JavaType,
    pub identifier_type: JavaType,
    pub identifier_accessor: JavaSymbolName,
    /// Lookup by identifier; absent means no editor can be generated
    pub find: Option<MemberTypeAdditions>,
    pub upstream: Vec<MetadataId>,
}

fn check_return(governor: &ClassOrInterfaceTypeDetails, name: &str, params: &[JavaType], expected: &JavaType) -> Result<bool> {
    match governor.method(&JavaSymbolName::new(name), params) {
        Some(m) if m.return_type() != expected => Err(ProviderError::precondition(format!(
            "method '{name}' on '{}' must return '{expected}'",
            governor.name()
        ))),
        Some(_) => Ok(true),
        None => Ok(false),
    }
}

/// Build the editor unit
///
/// # Errors
/// Fails when the governor declares a conflicting `typeConverter` field or
/// conversion method
pub fn build_editor(id: &MetadataId, input: &EditorInput, indent_width: usize) -> Result<ItdMetadata> {
    let governor = &input.governor;
    let aspect = ItdTypeDetails::aspect_name(governor.name(), ASPECT_SUFFIX);
    let Some(find) = &input.find else {
        debug!(%id, entity = %input.entity, "entity has no find operation");
        return Ok(ItdMetadata::invalid(id, governor.name(), aspect));
    };

    let mut builder = ItdTypeDetailsBuilder::new(id, governor, aspect, true);
    builder.add_extends_type(well_known::PROPERTY_EDITOR_SUPPORT.clone());

    let converter_name = JavaSymbolName::new(CONVERTER_FIELD);
    let converter_type = &*well_known::SIMPLE_TYPE_CONVERTER;
    match governor.declared_field(&converter_name) {
        Some(existing) if existing.field_type() != converter_type => {
            return Err(ProviderError::precondition(format!(
                "field '{CONVERTER_FIELD}' on '{}' must be of type '{converter_type}'",
                governor.name()
            )));
        }
        Some(_) => {}
        None => {
            let simple = builder.name_of(converter_type);
            builder.add_field(
                FieldMetadataBuilder::new(id, Modifier::PRIVATE, converter_name, converter_type.clone())
                    .with_initializer(format!("new {simple}()")),
            );
        }
    }

    let entity = builder.name_of(&input.entity);

    if !check_return(governor, "getAsText", &[], &well_known::STRING)? {
        let mut body = InvocableMemberBodyBuilder::with_indent_width(indent_width);
        body.append_formal_line("Object obj = getValue();");
        body.append_formal_line("if (obj == null) {");
        body.indent();
        body.append_formal_line("return null;");
        body.indent_remove();
        body.append_formal_line("}");
        body.append_formal_line(format!(
            "return (String) {CONVERTER_FIELD}.convertIfNecessary((({entity}) obj).{}(), String.class);",
            input.identifier_accessor
        ));
        builder.add_method(MethodMetadataBuilder::new(
            id,
            Modifier::PUBLIC,
            JavaSymbolName::new("getAsText"),
            well_known::STRING.clone(),
            body.into_output(),
        ));
    }

    if !check_return(governor, "setAsText", &[well_known::STRING.clone()], &well_known::VOID_PRIMITIVE)? {
        let id_name = builder.name_of(&input.identifier_type);
        let mut body = InvocableMemberBodyBuilder::with_indent_width(indent_width);
        body.append_formal_line("if (text == null || 0 == text.length()) {");
        body.indent();
        body.append_formal_line("setValue(null);");
        body.append_formal_line("return;");
        body.indent_remove();
        body.append_formal_line("}");
        body.new_line();
        body.append_formal_line(format!(
            "{id_name} identifier = ({id_name}) {CONVERTER_FIELD}.convertIfNecessary(text, {id_name}.class);"
        ));
        body.append_formal_line("if (identifier == null) {");
        body.indent();
        body.append_formal_line("setValue(null);");
        body.append_formal_line("return;");
        body.indent_remove();
        body.append_formal_line("}");
        body.new_line();
        body.append_formal_line(format!("setValue({entity}.{}(identifier));", find.method_name()));
        find.copy_additions_to(&mut builder, governor);
        builder.add_method(
            MethodMetadataBuilder::new(
                id,
                Modifier::PUBLIC,
                JavaSymbolName::new("setAsText"),
                well_known::VOID_PRIMITIVE.clone(),
                body.into_output(),
            )
            .with_parameters(vec![MethodParameter::new(well_known::STRING.clone(), "text")]),
        );
    }

    Ok(ItdMetadata::valid(id, builder.build()?))
}

/// Produces `_Roo_Editor` units
pub struct EditorProvider {
    inputs: Arc<dyn InputResolver<EditorInput>>,
}

impl std::fmt::Debug for EditorProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorProvider").finish_non_exhaustive()
    }
}

impl EditorProvider {
    #[must_use]
    pub fn new(inputs: impl InputResolver<EditorInput> + 'static) -> Self {
        Self { inputs: Arc::new(inputs) }
    }
}

impl MetadataProvider for EditorProvider {
    fn kind(&self) -> MetadataKind {
        MetadataKind::Editor
    }

    fn compute(&self, id: &MetadataId, ctx: &ProviderContext<'_>) -> Result<Option<ProvidedMetadata>> {
        ensure_instance_of(&MetadataKind::Editor, id)?;
        let Some(input) = self.inputs.resolve(id) else {
            debug!(%id, "no editor inputs");
            return Ok(None);
        };
        let mut upstream = vec![id.with_kind(MetadataKind::PhysicalType)];
        upstream.extend(input.upstream.iter().cloned());
        register_upstream(ctx, &upstream, id);
        build_editor(id, &input, ctx.indent_width).map(|m| Some(ProvidedMetadata::Itd(m)))
    }
}
