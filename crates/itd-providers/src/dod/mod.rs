//! Sample-data ("data on demand") introduction units
//!
//! For an entity `E`, the governor `EDataOnDemand` receives members that
//! create transient instances with constraint-satisfying values, persist a
//! batch of them and hand out specific or random persisted instances.

mod initializer;
mod validation;

pub use initializer::{collaborator_field_name, collaborator_type, field_initializer, Initializer};
pub use validation::{field_validation_body, ValidationBody, ValueTarget};

use crate::error::{ProviderError, Result};
use crate::naming::{mutator_name, resolve_field_name, FieldRef};
use crate::operations::{MemberTypeAdditions, OperationKind, OperationSet};
use crate::provider::{ensure_instance_of, register_upstream, InputResolver, ItdMetadata, MetadataProvider, ProvidedMetadata, ProviderContext};
use crate::tagging::keys;
use indexmap::IndexMap;
use initializer::{INDEX_VAR, OBJ_VAR};
use itd_builder::{
    AnnotationMetadataBuilder, ClassOrInterfaceTypeDetails, FieldMetadata, FieldMetadataBuilder, InvocableMemberBodyBuilder,
    ItdTypeDetails, ItdTypeDetailsBuilder, MemberDetails, MethodMetadataBuilder, MethodParameter, Modifier,
};
use itd_model::{capitalize, well_known, JavaSymbolName, JavaType, MetadataId, MetadataKind};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Number of instances `init()` persists unless configured otherwise
pub const DEFAULT_QUANTITY: u32 = 10;

const ASPECT_SUFFIX: &str = "DataOnDemand";

/// Composite key held in the entity's `@EmbeddedId` field
#[derive(Debug, Clone)]
pub struct EmbeddedIdentifier {
    /// The `@EmbeddedId` field; its type is the key class
    pub field: FieldMetadata,
    /// Entity method storing the key
    pub mutator: JavaSymbolName,
    /// Key class fields in constructor parameter order
    pub key_fields: Vec<FieldMetadata>,
}

/// An `@Embedded` value object on the entity
#[derive(Debug, Clone)]
pub struct EmbeddedValue {
    pub field: FieldMetadata,
    pub mutator: JavaSymbolName,
    /// Fields of the embeddable class that receive sample values
    pub fields: Vec<FieldMetadata>,
}

impl EmbeddedValue {
    /// `setHomeStreet` for field `street` of embedded `home`
    fn field_mutator(&self, field: &FieldMetadata) -> JavaSymbolName {
        mutator_name(&JavaSymbolName::new(format!(
            "{}{}",
            self.field.field_name().symbol_name(),
            capitalize(field.field_name().symbol_name())
        )))
    }
}

/// Everything the sample-data provider reads for one governor
#[derive(Debug, Clone)]
pub struct DataOnDemandInput {
    pub governor: ClassOrInterfaceTypeDetails,
    pub entity: JavaType,
    /// Entity declarations, most general first; decorated before use
    pub entity_members: MemberDetails,
    pub quantity: u32,
    pub identifier_accessor: JavaSymbolName,
    pub identifier_type: JavaType,
    pub operations: OperationSet,
    /// Related entity type → id of its own sample-data unit
    pub collaborators: IndexMap<JavaType, MetadataId>,
    pub embedded_identifier: Option<EmbeddedIdentifier>,
    pub embedded: Vec<EmbeddedValue>,
    /// Further ids this unit is derived from, such as the entity's declaration
    pub upstream: Vec<MetadataId>,
}

/// Fields of the entity that receive sample values
///
/// Static, transient, identifier, embedded and version fields are skipped,
/// as are collection-typed fields. A name declared twice is taken once.
#[must_use]
pub fn located_fields(members: &MemberDetails) -> Vec<&FieldMetadata> {
    let mut seen = HashSet::new();
    members
        .fields()
        .filter(|f| !f.modifier().is_static() && !f.modifier().is_transient())
        .filter(|f| {
            let data = f.custom_data();
            !data.contains(keys::TRANSIENT_FIELD)
                && !data.contains(keys::IDENTIFIER_FIELD)
                && !data.contains(keys::EMBEDDED_ID_FIELD)
                && !data.contains(keys::EMBEDDED_FIELD)
                && !data.contains(keys::VERSION_FIELD)
        })
        .filter(|f| f.annotation(&well_known::TRANSIENT).is_none())
        .filter(|f| !f.field_type().is_common_collection())
        .filter(|f| seen.insert(f.field_name().symbol_name().to_string()))
        .collect()
}

/// A user-declared method with the generated signature must return `expected`
fn check_user_method(
    governor: &ClassOrInterfaceTypeDetails,
    name: &str,
    parameter_types: &[JavaType],
    expected: &JavaType,
) -> Result<()> {
    match governor.method(&JavaSymbolName::new(name), parameter_types) {
        Some(method) if method.return_type() != expected => Err(ProviderError::precondition(format!(
            "method '{name}' on '{}' must return '{expected}'",
            governor.name()
        ))),
        _ => Ok(()),
    }
}

/// `setEmbeddedIdClass`, with underscores appended past any located field name
fn embedded_id_mutator_name(fields: &[&FieldMetadata]) -> JavaSymbolName {
    let taken: HashSet<&str> = fields.iter().map(|f| f.field_name().symbol_name()).collect();
    let mut name = String::from("embeddedIdClass");
    while taken.contains(name.as_str()) {
        name.push('_');
    }
    mutator_name(&JavaSymbolName::new(name))
}

fn statement(call: &MemberTypeAdditions) -> String {
    format!("{};", call.method_call().trim_end_matches(';'))
}

struct DataOnDemandBuilder<'a> {
    id: &'a MetadataId,
    input: &'a DataOnDemandInput,
    builder: ItdTypeDetailsBuilder,
    indent_width: usize,
    entity_name: String,
}

impl<'a> DataOnDemandBuilder<'a> {
    fn body(&self) -> InvocableMemberBodyBuilder {
        InvocableMemberBodyBuilder::with_indent_width(self.indent_width)
    }

    fn governor(&self) -> &'a ClassOrInterfaceTypeDetails {
        &self.input.governor
    }

    fn add_method(&mut self, method: MethodMetadataBuilder) {
        if !self.builder.add_method(method) {
            debug!(aspect = %self.builder.declared_by(), "governor supplies its own method");
        }
    }

    fn synthetic_field(&mut self, base: &str, ty: &JavaType, initializer: Option<&str>) -> JavaSymbolName {
        let resolved = resolve_field_name(self.governor().declared_fields(), self.id, base, ty, initializer);
        let name = resolved.name().clone();
        if let FieldRef::Allocated(field) = resolved {
            self.builder.add_field(field);
        }
        name
    }

    fn collaborator_fields(&mut self, related: &[JavaType]) -> Result<()> {
        for entity in related {
            let name = JavaSymbolName::new(collaborator_field_name(entity));
            let ty = collaborator_type(entity);
            if let Some(existing) = self.governor().declared_field(&name) {
                if existing.field_type() != &ty
                    || !existing.modifier().is_private()
                    || existing.annotation(&well_known::AUTOWIRED).is_none()
                {
                    return Err(ProviderError::precondition(format!(
                        "field '{name}' on '{}' must be a private @Autowired {ty}",
                        self.governor().name()
                    )));
                }
                continue;
            }
            self.builder.add_import(&ty);
            let mut field = FieldMetadataBuilder::new(self.id, Modifier::PRIVATE, name, ty);
            field.add_annotation(AnnotationMetadataBuilder::new(&well_known::AUTOWIRED));
            self.builder.add_field(field);
        }
        Ok(())
    }

    fn new_transient_method(&mut self, fields: &[&FieldMetadata], embedded_id: Option<&JavaSymbolName>) -> Result<String> {
        let name = format!("getNewTransient{}", self.entity_name);
        check_user_method(self.governor(), &name, &[well_known::INT_PRIMITIVE.clone()], &self.input.entity)?;

        let entity = &self.entity_name;
        let mut body = self.body();
        body.append_formal_line(format!("{entity} {OBJ_VAR} = new {entity}();"));
        if let Some(mutator) = embedded_id {
            body.append_formal_line(format!("{mutator}({OBJ_VAR}, {INDEX_VAR});"));
        }
        for embedded in &self.input.embedded {
            body.append_formal_line(format!(
                "{}({OBJ_VAR}, {INDEX_VAR});",
                mutator_name(embedded.field.field_name())
            ));
        }
        for field in fields {
            body.append_formal_line(format!("{}({OBJ_VAR}, {INDEX_VAR});", mutator_name(field.field_name())));
        }
        body.append_formal_line(format!("return {OBJ_VAR};"));

        let method = MethodMetadataBuilder::new(
            self.id,
            Modifier::PUBLIC,
            JavaSymbolName::new(name.clone()),
            self.input.entity.clone(),
            body.into_output(),
        )
        .with_parameters(vec![MethodParameter::new(well_known::INT_PRIMITIVE.clone(), INDEX_VAR)]);
        self.add_method(method);
        Ok(name)
    }

    fn field_mutators(&mut self, fields: &[(&FieldMetadata, Initializer)]) -> Result<()> {
        let params = [self.input.entity.clone(), well_known::INT_PRIMITIVE.clone()];
        for (field, init) in fields {
            let name = mutator_name(field.field_name());
            if self.governor().method(&name, &params).is_some() {
                continue;
            }
            let validated = field_validation_body(field, &init.expression, ValueTarget::Mutator(name.symbol_name()), self.indent_width)?;
            for ty in init.imports.iter().chain(&validated.imports) {
                self.builder.add_import(ty);
            }
            let method = MethodMetadataBuilder::new(
                self.id,
                Modifier::PUBLIC,
                name,
                well_known::VOID_PRIMITIVE.clone(),
                validated.body,
            )
            .with_parameters(vec![
                MethodParameter::new(self.input.entity.clone(), OBJ_VAR),
                MethodParameter::new(well_known::INT_PRIMITIVE.clone(), INDEX_VAR),
            ]);
            self.add_method(method);
        }
        Ok(())
    }

    fn embedded_id_method(&mut self, key: &EmbeddedIdentifier, name: &JavaSymbolName) -> Result<()> {
        let params = [self.input.entity.clone(), well_known::INT_PRIMITIVE.clone()];
        if self.governor().method(name, &params).is_some() {
            return Ok(());
        }
        let key_type = self.builder.name_of(key.field.field_type());
        let mut body = self.body();
        let mut arguments = Vec::with_capacity(key.key_fields.len());
        for field in &key.key_fields {
            let init = field_initializer(field, &self.input.entity, &IndexMap::new())?;
            let part = field_validation_body(field, &init.expression, ValueTarget::KeyPart, self.indent_width)?;
            for ty in init.imports.iter().chain(&part.imports) {
                self.builder.add_import(ty);
            }
            body.append_lines(&part.body);
            arguments.push(field.field_name().symbol_name());
        }
        body.new_line();
        body.append_formal_line(format!(
            "{key_type} embeddedIdClass = new {key_type}({});",
            arguments.join(", ")
        ));
        body.append_formal_line(format!("{OBJ_VAR}.{}(embeddedIdClass);", key.mutator));

        let method = MethodMetadataBuilder::new(
            self.id,
            Modifier::PUBLIC,
            name.clone(),
            well_known::VOID_PRIMITIVE.clone(),
            body.into_output(),
        )
        .with_parameters(vec![
            MethodParameter::new(self.input.entity.clone(), OBJ_VAR),
            MethodParameter::new(well_known::INT_PRIMITIVE.clone(), INDEX_VAR),
        ]);
        self.add_method(method);
        Ok(())
    }

    /// `setHome(obj, index)` plus one `setHomeStreet(embeddedClass, index)` per field
    fn embedded_value_methods(&mut self, embedded: &EmbeddedValue) -> Result<()> {
        let value_type = embedded.field.field_type().clone();
        let value_name = self.builder.name_of(&value_type);
        let entity_params = [self.input.entity.clone(), well_known::INT_PRIMITIVE.clone()];
        let value_params = [value_type.clone(), well_known::INT_PRIMITIVE.clone()];

        let holder = mutator_name(embedded.field.field_name());
        if self.governor().method(&holder, &entity_params).is_none() {
            let mut body = self.body();
            body.append_formal_line(format!("{value_name} embeddedClass = new {value_name}();"));
            for field in &embedded.fields {
                body.append_formal_line(format!("{}(embeddedClass, {INDEX_VAR});", embedded.field_mutator(field)));
            }
            body.append_formal_line(format!("{OBJ_VAR}.{}(embeddedClass);", embedded.mutator));
            let method = MethodMetadataBuilder::new(
                self.id,
                Modifier::PUBLIC,
                holder,
                well_known::VOID_PRIMITIVE.clone(),
                body.into_output(),
            )
            .with_parameters(vec![
                MethodParameter::new(self.input.entity.clone(), OBJ_VAR),
                MethodParameter::new(well_known::INT_PRIMITIVE.clone(), INDEX_VAR),
            ]);
            self.add_method(method);
        }

        for field in &embedded.fields {
            let name = embedded.field_mutator(field);
            if self.governor().method(&name, &value_params).is_some() {
                continue;
            }
            let init = field_initializer(field, &self.input.entity, &IndexMap::new())?;
            let setter = mutator_name(field.field_name());
            let validated = field_validation_body(field, &init.expression, ValueTarget::Mutator(setter.symbol_name()), self.indent_width)?;
            for ty in init.imports.iter().chain(&validated.imports) {
                self.builder.add_import(ty);
            }
            let method = MethodMetadataBuilder::new(
                self.id,
                Modifier::PUBLIC,
                name,
                well_known::VOID_PRIMITIVE.clone(),
                validated.body,
            )
            .with_parameters(vec![
                MethodParameter::new(value_type.clone(), OBJ_VAR),
                MethodParameter::new(well_known::INT_PRIMITIVE.clone(), INDEX_VAR),
            ]);
            self.add_method(method);
        }
        Ok(())
    }

    fn fetch_lines(&mut self, body: &mut InvocableMemberBodyBuilder, find: &MemberTypeAdditions) {
        let id_name = self.builder.name_of(&self.input.identifier_type);
        body.append_formal_line(format!(
            "{id_name} id = {OBJ_VAR}.{}();",
            self.input.identifier_accessor
        ));
        body.append_formal_line(format!("return {}", statement(find)));
        find.copy_additions_to(&mut self.builder, &self.input.governor);
    }

    fn specific_method(&mut self, data: &JavaSymbolName, find: &MemberTypeAdditions) -> Result<()> {
        let name = format!("getSpecific{}", self.entity_name);
        check_user_method(self.governor(), &name, &[well_known::INT_PRIMITIVE.clone()], &self.input.entity)?;

        let mut body = self.body();
        body.append_formal_line("init();");
        body.append_formal_line(format!("if ({INDEX_VAR} < 0) {{"));
        body.indent();
        body.append_formal_line(format!("{INDEX_VAR} = 0;"));
        body.indent_remove();
        body.append_formal_line("}");
        body.append_formal_line(format!("if ({INDEX_VAR} > ({data}.size() - 1)) {{"));
        body.indent();
        body.append_formal_line(format!("{INDEX_VAR} = {data}.size() - 1;"));
        body.indent_remove();
        body.append_formal_line("}");
        body.append_formal_line(format!("{} {OBJ_VAR} = {data}.get({INDEX_VAR});", self.entity_name));
        self.fetch_lines(&mut body, find);

        let method = MethodMetadataBuilder::new(
            self.id,
            Modifier::PUBLIC,
            JavaSymbolName::new(name),
            self.input.entity.clone(),
            body.into_output(),
        )
        .with_parameters(vec![MethodParameter::new(well_known::INT_PRIMITIVE.clone(), INDEX_VAR)]);
        self.add_method(method);
        Ok(())
    }

    fn random_method(&mut self, data: &JavaSymbolName, rnd: &JavaSymbolName, find: &MemberTypeAdditions) -> Result<()> {
        let name = format!("getRandom{}", self.entity_name);
        check_user_method(self.governor(), &name, &[], &self.input.entity)?;

        let mut body = self.body();
        body.append_formal_line("init();");
        body.append_formal_line(format!(
            "{} {OBJ_VAR} = {data}.get({rnd}.nextInt({data}.size()));",
            self.entity_name
        ));
        self.fetch_lines(&mut body, find);

        let method = MethodMetadataBuilder::new(
            self.id,
            Modifier::PUBLIC,
            JavaSymbolName::new(name),
            self.input.entity.clone(),
            body.into_output(),
        );
        self.add_method(method);
        Ok(())
    }

    fn modify_method(&mut self) -> Result<()> {
        let name = format!("modify{}", self.entity_name);
        let params = [self.input.entity.clone()];
        check_user_method(self.governor(), &name, &params, &well_known::BOOLEAN_PRIMITIVE)?;
        let mut body = self.body();
        body.append_formal_line("return false;");
        let method = MethodMetadataBuilder::new(
            self.id,
            Modifier::PUBLIC,
            JavaSymbolName::new(name),
            well_known::BOOLEAN_PRIMITIVE.clone(),
            body.into_output(),
        )
        .with_parameters(vec![MethodParameter::new(self.input.entity.clone(), OBJ_VAR)]);
        self.add_method(method);
        Ok(())
    }

    fn init_method(
        &mut self,
        data: &JavaSymbolName,
        new_transient: &str,
        find_entries: &MemberTypeAdditions,
        persist: &MemberTypeAdditions,
        flush: Option<&MemberTypeAdditions>,
    ) -> Result<()> {
        check_user_method(self.governor(), "init", &[], &well_known::VOID_PRIMITIVE)?;
        for ty in [
            &*well_known::ARRAY_LIST,
            &*well_known::ITERATOR,
            &*well_known::CONSTRAINT_VIOLATION_EXCEPTION,
            &*well_known::CONSTRAINT_VIOLATION,
        ] {
            self.builder.add_import(ty);
        }
        let governor = &self.input.governor;
        find_entries.copy_additions_to(&mut self.builder, governor);
        persist.copy_additions_to(&mut self.builder, governor);
        if let Some(flush) = flush {
            flush.copy_additions_to(&mut self.builder, governor);
        }

        let entity = self.entity_name.clone();
        let mut body = self.body();
        body.append_formal_line("int from = 0;");
        body.append_formal_line("int to = 10;");
        body.append_formal_line(format!("{data} = {}", statement(find_entries)));
        body.append_formal_line(format!("if ({data} == null) {{"));
        body.indent();
        body.append_formal_line(format!(
            "throw new IllegalStateException(\"Find entries implementation for '{entity}' illegally returned null\");"
        ));
        body.indent_remove();
        body.append_formal_line("}");
        body.append_formal_line(format!("if (!{data}.isEmpty()) {{"));
        body.indent();
        body.append_formal_line("return;");
        body.indent_remove();
        body.append_formal_line("}");
        body.new_line();
        body.append_formal_line(format!("{data} = new ArrayList<{entity}>();"));
        body.append_formal_line(format!("for (int i = 0; i < {}; i++) {{", self.input.quantity));
        body.indent();
        body.append_formal_line(format!("{entity} {OBJ_VAR} = {new_transient}(i);"));
        body.append_formal_line("try {");
        body.indent();
        body.append_formal_line(statement(persist));
        body.indent_remove();
        body.append_formal_line("} catch (ConstraintViolationException e) {");
        body.indent();
        body.append_formal_line("StringBuilder msg = new StringBuilder();");
        body.append_formal_line(
            "for (Iterator<ConstraintViolation<?>> iter = e.getConstraintViolations().iterator(); iter.hasNext();) {",
        );
        body.indent();
        body.append_formal_line("ConstraintViolation<?> cv = iter.next();");
        body.append_formal_line(
            "msg.append(\"[\").append(cv.getConstraintDescriptor()).append(\":\").append(cv.getMessage()).append(\"=\").append(cv.getInvalidValue()).append(\"]\");",
        );
        body.indent_remove();
        body.append_formal_line("}");
        body.append_formal_line("throw new RuntimeException(msg.toString(), e);");
        body.indent_remove();
        body.append_formal_line("}");
        if let Some(flush) = flush {
            body.append_formal_line(statement(flush));
        }
        body.append_formal_line(format!("{data}.add({OBJ_VAR});"));
        body.indent_remove();
        body.append_formal_line("}");

        let method = MethodMetadataBuilder::new(
            self.id,
            Modifier::PUBLIC,
            JavaSymbolName::new("init"),
            well_known::VOID_PRIMITIVE.clone(),
            body.into_output(),
        );
        self.add_method(method);
        Ok(())
    }
}

/// Build the sample-data unit for `input`, reading fields from `entity_members`
///
/// The result is invalid when the entity offers no find, find-entries or
/// persist operation.
///
/// # Errors
/// Returns a precondition failure when user-declared members or field
/// constraints contradict the generated ones
pub fn build_data_on_demand(
    id: &MetadataId,
    input: &DataOnDemandInput,
    entity_members: &MemberDetails,
    indent_width: usize,
) -> Result<ItdMetadata> {
    let aspect = ItdTypeDetails::aspect_name(input.governor.name(), ASPECT_SUFFIX);
    let ops = &input.operations;
    let (Some(find), Some(find_entries), Some(persist)) = (
        ops.get(OperationKind::Find),
        ops.get(OperationKind::FindEntries),
        ops.get(OperationKind::Persist),
    ) else {
        debug!(%id, entity = %input.entity, "entity lacks find, find-entries or persist");
        return Ok(ItdMetadata::invalid(id, input.governor.name(), aspect));
    };

    let mut builder = ItdTypeDetailsBuilder::new(id, &input.governor, aspect, true);
    let entity_name = builder.name_of(&input.entity);
    let mut dod = DataOnDemandBuilder {
        id,
        input,
        builder,
        indent_width,
        entity_name,
    };

    dod.builder.add_annotation(AnnotationMetadataBuilder::new(&well_known::COMPONENT));

    let fields = located_fields(entity_members);
    let mut initialized = Vec::with_capacity(fields.len());
    for field in &fields {
        initialized.push((*field, field_initializer(field, &input.entity, &input.collaborators)?));
    }

    let rnd = dod.synthetic_field("rnd", &well_known::RANDOM, Some("new SecureRandom()"));
    if dod.governor().declared_field(&rnd).is_none() {
        dod.builder.add_import(&well_known::RANDOM);
        dod.builder.add_import(&well_known::SECURE_RANDOM);
    }
    let data = dod.synthetic_field("data", &well_known::list_of(&input.entity), None);
    dod.builder.add_import(&well_known::LIST);

    let mut related: Vec<JavaType> = Vec::new();
    for (_, init) in &initialized {
        if let Some(entity) = &init.collaborator {
            if !related.contains(entity) {
                related.push(entity.clone());
            }
        }
    }
    dod.collaborator_fields(&related)?;

    let embedded_id = input.embedded_identifier.as_ref().map(|key| (key, embedded_id_mutator_name(&fields)));
    let new_transient = dod.new_transient_method(&fields, embedded_id.as_ref().map(|(_, name)| name))?;
    if let Some((key, name)) = &embedded_id {
        dod.embedded_id_method(key, name)?;
    }
    for embedded in &input.embedded {
        dod.embedded_value_methods(embedded)?;
    }
    dod.field_mutators(&initialized)?;
    dod.specific_method(&data, find)?;
    dod.random_method(&data, &rnd, find)?;
    dod.modify_method()?;
    dod.init_method(&data, &new_transient, find_entries, persist, ops.get(OperationKind::Flush))?;

    Ok(ItdMetadata::valid(id, dod.builder.build()?))
}

/// Produces `_Roo_DataOnDemand` units
pub struct DataOnDemandProvider {
    inputs: Arc<dyn InputResolver<DataOnDemandInput>>,
}

impl std::fmt::Debug for DataOnDemandProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataOnDemandProvider").finish_non_exhaustive()
    }
}

impl DataOnDemandProvider {
    #[must_use]
    pub fn new(inputs: impl InputResolver<DataOnDemandInput> + 'static) -> Self {
        Self { inputs: Arc::new(inputs) }
    }
}

impl MetadataProvider for DataOnDemandProvider {
    fn kind(&self) -> MetadataKind {
        MetadataKind::DataOnDemand
    }

    fn compute(&self, id: &MetadataId, ctx: &ProviderContext<'_>) -> Result<Option<ProvidedMetadata>> {
        ensure_instance_of(&MetadataKind::DataOnDemand, id)?;
        let Some(input) = self.inputs.resolve(id) else {
            debug!(%id, "no sample-data inputs");
            return Ok(None);
        };

        let mut upstream = vec![id.with_kind(MetadataKind::PhysicalType)];
        upstream.extend(input.upstream.iter().cloned());
        upstream.extend(input.collaborators.values().filter(|c| *c != id).cloned());
        register_upstream(ctx, &upstream, id);

        let decorated = ctx.decorator.decorate(&input.entity_members)?;
        let metadata = build_data_on_demand(id, &input, &decorated, ctx.indent_width)?;
        Ok(Some(ProvidedMetadata::Itd(metadata)))
    }
}
