//! Embeddable composite identifier units (`_Roo_Identifier`)

use crate::error::{ProviderError, Result};
use crate::naming::{accessor_name, mutator_name};
use crate::provider::{ensure_instance_of, register_upstream, InputResolver, ItdMetadata, MetadataProvider, ProvidedMetadata, ProviderContext};
use crate::tagging::keys;
use itd_builder::{
    AnnotationMetadataBuilder, ClassOrInterfaceTypeDetails, ConstructorMetadataBuilder, FieldMetadataBuilder,
    InvocableMemberBodyBuilder, ItdTypeDetails, ItdTypeDetailsBuilder, MethodMetadataBuilder, MethodParameter, Modifier,
};
use itd_model::{well_known, JavaSymbolName, JavaType, MetadataId, MetadataKind};
use std::sync::Arc;
use tracing::debug;

const ASPECT_SUFFIX: &str = "Identifier";

/// Columns at least this wide are not given an explicit `length`
const MAX_EXPLICIT_LENGTH: u32 = 4000;

/// Values of the identifier marker annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierAnnotationValues {
    pub no_arg_constructor: bool,
    pub getters_by_default: bool,
    pub setters_by_default: bool,
}

impl Default for IdentifierAnnotationValues {
    fn default() -> Self {
        Self {
            no_arg_constructor: true,
            getters_by_default: true,
            setters_by_default: false,
        }
    }
}

/// One identifier column, as discovered from a database or descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierField {
    pub field_name: JavaSymbolName,
    pub field_type: JavaType,
    pub column_name: String,
    pub column_definition: Option<String>,
    pub column_size: u32,
    pub scale: u32,
}

impl IdentifierField {
    #[must_use]
    pub fn new(field_name: &str, field_type: JavaType, column_name: impl Into<String>) -> Self {
        Self {
            field_name: JavaSymbolName::new(field_name),
            field_type,
            column_name: column_name.into(),
            column_definition: None,
            column_size: 0,
            scale: 0,
        }
    }

    #[must_use]
    pub fn with_column_size(mut self, size: u32) -> Self {
        self.column_size = size;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_column_definition(mut self, definition: impl Into<String>) -> Self {
        self.column_definition = Some(definition.into());
        self
    }

    fn column(&self) -> AnnotationMetadataBuilder {
        let mut column = AnnotationMetadataBuilder::new(&well_known::COLUMN);
        column.add_string_attribute("name", self.column_name.clone());
        if let Some(definition) = self.column_definition.as_deref().filter(|d| !d.trim().is_empty()) {
            column.add_string_attribute("columnDefinition", definition);
        }
        column.add_boolean_attribute("nullable", false);
        let size = i32::try_from(self.column_size).unwrap_or(i32::MAX);
        if self.column_size < MAX_EXPLICIT_LENGTH && self.field_type == *well_known::STRING {
            column.add_integer_attribute("length", size);
        }
        let decimal = self.field_type == *well_known::DOUBLE_OBJECT
            || self.field_type == *well_known::DOUBLE_PRIMITIVE
            || self.field_type == *well_known::BIG_DECIMAL;
        if self.scale > 0 && decimal {
            column.add_integer_attribute("precision", size);
            column.add_integer_attribute("scale", i32::try_from(self.scale).unwrap_or(i32::MAX));
        }
        column
    }

    /// `@Temporal` plus `@DateTimeFormat` for date columns
    fn date_annotations(&self) -> Vec<AnnotationMetadataBuilder> {
        let mut temporal_type = self
            .column_definition
            .as_deref()
            .map(str::to_uppercase)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "DATE".to_string());
        if temporal_type == "DATETIME" {
            temporal_type = "TIMESTAMP".to_string();
        }
        let mut temporal = AnnotationMetadataBuilder::new(&well_known::TEMPORAL);
        temporal.add_enum_attribute("value", &well_known::TEMPORAL_TYPE, &temporal_type);
        let mut format = AnnotationMetadataBuilder::new(&well_known::DATE_TIME_FORMAT);
        format.add_string_attribute("style", "M-");
        vec![temporal, format]
    }

    fn to_field(&self, declared_by: &MetadataId) -> FieldMetadataBuilder {
        let mut annotations = vec![self.column()];
        if self.field_type == *well_known::DATE {
            annotations.extend(self.date_annotations());
        }
        FieldMetadataBuilder::new(declared_by, Modifier::PRIVATE, self.field_name.clone(), self.field_type.clone())
            .with_annotations(annotations)
    }
}

/// Inputs for one identifier type
#[derive(Debug, Clone)]
pub struct IdentifierInput {
    pub governor: ClassOrInterfaceTypeDetails,
    /// `None` when the governor lost its marker annotation between notification and computation
    pub annotation_values: Option<IdentifierAnnotationValues>,
    /// Columns from an external identifier source, if any
    pub identifier_fields: Vec<IdentifierField>,
}

/// Fields the identifier type carries, in constructor parameter order
fn identifier_fields(id: &MetadataId, input: &IdentifierInput) -> Vec<FieldMetadataBuilder> {
    let governor = &input.governor;
    let mut fields: Vec<FieldMetadataBuilder> = input
        .identifier_fields
        .iter()
        .filter(|f| governor.declared_field(&f.field_name).is_none())
        .map(|f| f.to_field(id))
        .collect();
    fields.extend(
        governor
            .declared_fields()
            .iter()
            .filter(|f| !f.modifier().is_static() && !f.modifier().is_transient())
            .filter(|f| f.annotation(&well_known::TRANSIENT).is_none())
            .map(FieldMetadataBuilder::from_existing),
    );
    if fields.is_empty() {
        let mut column = AnnotationMetadataBuilder::new(&well_known::COLUMN);
        column.add_string_attribute("name", "id");
        column.add_boolean_attribute("nullable", false);
        fields.push(
            FieldMetadataBuilder::new(id, Modifier::PRIVATE, JavaSymbolName::new("id"), well_known::LONG_OBJECT.clone())
                .with_annotations(vec![column]),
        );
    }
    fields
}

/// Build the identifier unit
///
/// # Errors
/// Fails when the annotation values are missing or a user-declared accessor
/// or mutator is not public
pub fn build_identifier(id: &MetadataId, input: &IdentifierInput, indent_width: usize) -> Result<ItdMetadata> {
    let values = input
        .annotation_values
        .ok_or_else(|| ProviderError::precondition(format!("annotation values required for {id}")))?;
    let governor = &input.governor;
    let aspect = ItdTypeDetails::aspect_name(governor.name(), ASPECT_SUFFIX);
    let mut builder = ItdTypeDetailsBuilder::new(id, governor, aspect, true);
    let body = || InvocableMemberBodyBuilder::with_indent_width(indent_width);

    builder.add_annotation(AnnotationMetadataBuilder::new(&well_known::EMBEDDABLE));

    let fields = identifier_fields(id, input);
    for field in &fields {
        builder.add_field(field.clone());
    }

    let parameter_types: Vec<JavaType> = fields.iter().map(|f| f.field_type().clone()).collect();
    let has_parameterized = governor.declared_constructor(&parameter_types).is_some();
    if !has_parameterized {
        let mut ctor_body = body();
        ctor_body.append_formal_line("super();");
        for field in &fields {
            let name = field.field_name();
            ctor_body.append_formal_line(format!("this.{name} = {name};"));
        }
        let params = fields
            .iter()
            .map(|f| MethodParameter::new(f.field_type().clone(), f.field_name().symbol_name()))
            .collect();
        builder.add_constructor(
            ConstructorMetadataBuilder::new(id, Modifier::PUBLIC, ctor_body.into_output()).with_parameters(params),
        );
    }

    if values.no_arg_constructor && governor.declared_constructor(&[]).is_none() {
        let mut ctor_body = body();
        ctor_body.append_formal_line("super();");
        let modifier = if has_parameterized { Modifier::PUBLIC } else { Modifier::PRIVATE };
        builder.add_constructor(ConstructorMetadataBuilder::new(id, modifier, ctor_body.into_output()));
    }

    if values.getters_by_default {
        for field in &fields {
            let name = accessor_name(field.field_name(), field.field_type());
            if let Some(existing) = governor.method(&name, &[]) {
                if !existing.modifier().is_public() {
                    return Err(ProviderError::precondition(format!(
                        "user provided field but failed to provide a public '{name}()' method in '{}'",
                        governor.name()
                    )));
                }
                continue;
            }
            let mut accessor = body();
            accessor.append_formal_line(format!("return {};", field.field_name()));
            builder.add_method(MethodMetadataBuilder::new(
                id,
                Modifier::PUBLIC,
                name,
                field.field_type().clone(),
                accessor.into_output(),
            ));
        }
    }

    if values.setters_by_default {
        for field in &fields {
            let name = mutator_name(field.field_name());
            if let Some(existing) = governor.method(&name, &[field.field_type().clone()]) {
                if !existing.modifier().is_public() {
                    return Err(ProviderError::precondition(format!(
                        "user provided field but failed to provide a public '{name}({})' method in '{}'",
                        field.field_name(),
                        governor.name()
                    )));
                }
                continue;
            }
            let field_name = field.field_name().symbol_name();
            let mut mutator = body();
            mutator.append_formal_line(format!("this.{field_name} = {field_name};"));
            builder.add_method(
                MethodMetadataBuilder::new(id, Modifier::PUBLIC, name, well_known::VOID_PRIMITIVE.clone(), mutator.into_output())
                    .with_parameters(vec![MethodParameter::new(field.field_type().clone(), field_name)]),
            );
        }
    }

    builder.members_mut().custom_data_mut().tag(keys::IDENTIFIER_TYPE);
    Ok(ItdMetadata::valid(id, builder.build()?))
}

/// Produces `_Roo_Identifier` units
pub struct IdentifierProvider {
    inputs: Arc<dyn InputResolver<IdentifierInput>>,
}

impl std::fmt::Debug for IdentifierProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifierProvider").finish_non_exhaustive()
    }
}

impl IdentifierProvider {
    #[must_use]
    pub fn new(inputs: impl InputResolver<IdentifierInput> + 'static) -> Self {
        Self { inputs: Arc::new(inputs) }
    }
}

impl MetadataProvider for IdentifierProvider {
    fn kind(&self) -> MetadataKind {
        MetadataKind::Identifier
    }

    fn compute(&self, id: &MetadataId, ctx: &ProviderContext<'_>) -> Result<Option<ProvidedMetadata>> {
        ensure_instance_of(&MetadataKind::Identifier, id)?;
        let Some(input) = self.inputs.resolve(id) else {
            debug!(%id, "no identifier inputs");
            return Ok(None);
        };
        register_upstream(ctx, &[id.with_kind(MetadataKind::PhysicalType)], id);
        build_identifier(id, &input, ctx.indent_width).map(|m| Some(ProvidedMetadata::Itd(m)))
    }
}
