//! Web scaffold controller units (`_Roo_Controller`)
//!
//! Request handlers for create, show, list, update and delete are composed
//! from operation calls plus fixed control flow. A handler is skipped when
//! the governor already declares a method of the same name.

use crate::error::{ProviderError, Result};
use crate::operations::{MemberTypeAdditions, OperationKind, OperationSet};
use crate::provider::{ensure_instance_of, register_upstream, InputResolver, ItdMetadata, MetadataProvider, ProvidedMetadata, ProviderContext};
use indexmap::IndexMap;
use itd_builder::{
    AnnotationMetadataBuilder, ClassOrInterfaceTypeDetails, ConstructorMetadataBuilder, FieldMetadataBuilder,
    InvocableMemberBodyBuilder, ItdTypeDetails, ItdTypeDetailsBuilder, MethodMetadataBuilder, MethodParameter, Modifier,
};
use itd_model::{well_known, JavaSymbolName, JavaType, MetadataId, MetadataKind};
use std::sync::Arc;
use tracing::debug;

const ASPECT_SUFFIX: &str = "Controller";
const CONVERSION_FIELD: &str = "conversionService";
const PRODUCES: &str = "text/html";

/// Page count shown by the list view
///
/// Mirrors the generated expression
/// `(int) ((nrOfPages > (int) nrOfPages || nrOfPages == 0.0) ? nrOfPages + 1 : nrOfPages)`
/// evaluated in single precision. A size of zero is treated as one.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn max_pages(total: u64, size: u32) -> u32 {
    let pages = total as f32 / size.max(1) as f32;
    let whole = pages as i32 as f32;
    let rounded = if pages > whole || pages == 0.0 { pages + 1.0 } else { pages };
    rounded as u32
}

/// Values of the scaffold marker annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebScaffoldAnnotationValues {
    /// Controller path without slashes (`people`)
    pub path: String,
    pub form_backing_type: JavaType,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
    pub populate_methods: bool,
}

impl WebScaffoldAnnotationValues {
    #[must_use]
    pub fn new(path: impl Into<String>, form_backing_type: JavaType) -> Self {
        Self {
            path: path.into(),
            form_backing_type,
            create: true,
            update: true,
            delete: true,
            populate_methods: true,
        }
    }
}

/// Persistence facts about a domain type
#[derive(Debug, Clone, Default)]
pub struct PersistenceDetails {
    pub identifier_type: Option<JavaType>,
    pub identifier_accessor: Option<JavaSymbolName>,
    /// Identifier is an embeddable composite key
    pub composite_pk: bool,
    pub count: Option<MemberTypeAdditions>,
    pub find_all: Option<MemberTypeAdditions>,
}

/// A domain type the controller may reference
#[derive(Debug, Clone)]
pub struct DomainTypeDetails {
    pub java_type: JavaType,
    pub plural: String,
    pub is_enum: bool,
    pub persistence: Option<PersistenceDetails>,
}

/// Date rendering for one form-backing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFormatDetails {
    pub pattern: Option<String>,
    pub style: String,
}

impl DateTimeFormatDetails {
    #[must_use]
    pub fn with_style(style: impl Into<String>) -> Self {
        Self { pattern: None, style: style.into() }
    }

    #[must_use]
    pub fn with_pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            style: String::new(),
        }
    }
}

/// Inputs for one controller
#[derive(Debug, Clone)]
pub struct WebScaffoldInput {
    pub governor: ClassOrInterfaceTypeDetails,
    pub annotation_values: WebScaffoldAnnotationValues,
    /// Must contain the form backing type
    pub domain_types: IndexMap<JavaType, DomainTypeDetails>,
    /// Types that must have instances before the form backing type can be created
    pub dependent_types: Vec<DomainTypeDetails>,
    /// Form-backing date fields by name
    pub date_types: IndexMap<String, DateTimeFormatDetails>,
    /// Operations on the form backing type
    pub operations: OperationSet,
    /// Types of the form backing type's editable fields
    pub editable_types: Vec<JavaType>,
    pub upstream: Vec<MetadataId>,
}

fn request_mapping(value: Option<&str>, method: Option<&str>, params: Option<&str>) -> AnnotationMetadataBuilder {
    let mut mapping = AnnotationMetadataBuilder::new(&well_known::REQUEST_MAPPING);
    if let Some(value) = value {
        mapping.add_string_attribute("value", value);
    }
    if let Some(params) = params {
        mapping.add_string_attribute("params", params);
    }
    if let Some(method) = method {
        mapping.add_enum_attribute("method", &well_known::REQUEST_METHOD, method);
    }
    mapping.add_string_attribute("produces", PRODUCES);
    mapping
}

fn path_variable(name: &str) -> itd_builder::AnnotationMetadata {
    let mut annotation = AnnotationMetadataBuilder::new(&well_known::PATH_VARIABLE);
    annotation.add_string_attribute("value", name);
    annotation.build()
}

fn optional_param(name: &str) -> itd_builder::AnnotationMetadata {
    let mut annotation = AnnotationMetadataBuilder::new(&well_known::REQUEST_PARAM);
    annotation.add_string_attribute("value", name);
    annotation.add_boolean_attribute("required", false);
    annotation.build()
}

struct ScaffoldBuilder<'a> {
    id: &'a MetadataId,
    input: &'a WebScaffoldInput,
    builder: ItdTypeDetailsBuilder,
    persistence: Option<&'a PersistenceDetails>,
    indent_width: usize,
    /// Variable name of the form backing object (`person`)
    entity_name: String,
    composite_pk: bool,
}

impl<'a> ScaffoldBuilder<'a> {
    fn path(&self) -> &'a str {
        &self.input.annotation_values.path
    }

    fn body(&self) -> InvocableMemberBodyBuilder {
        InvocableMemberBodyBuilder::with_indent_width(self.indent_width)
    }

    fn governor_has(&self, name: &str) -> bool {
        let found = self.input.governor.has_method_named(name);
        if found {
            debug!(method = name, governor = %self.input.governor.name(), "governor declares handler");
        }
        found
    }

    fn has_dates(&self) -> bool {
        !self.input.date_types.is_empty()
    }

    fn method(&self, name: &str, return_type: &JavaType, body: InvocableMemberBodyBuilder) -> MethodMetadataBuilder {
        MethodMetadataBuilder::new(self.id, Modifier::PUBLIC, JavaSymbolName::new(name), return_type.clone(), body.into_output())
    }

    fn identifier_type(&self) -> Option<JavaType> {
        self.persistence.and_then(|p| p.identifier_type.clone())
    }

    fn redirect_to_saved(&self, accessor: &JavaSymbolName) -> String {
        let entity = &self.entity_name;
        let id = if self.composite_pk {
            format!("{CONVERSION_FIELD}.convert({entity}.{accessor}(), String.class)")
        } else {
            format!("{entity}.{accessor}().toString()")
        };
        format!("return \"redirect:/{}/\" + encodeUrlPathSegment({id}, httpServletRequest);", self.path())
    }

    fn form_parameters(&self) -> Vec<MethodParameter> {
        vec![
            MethodParameter::new(self.input.annotation_values.form_backing_type.clone(), self.entity_name.clone())
                .annotated(AnnotationMetadataBuilder::new(&well_known::VALID).build()),
            MethodParameter::new(well_known::BINDING_RESULT.clone(), "bindingResult"),
            MethodParameter::new(well_known::MODEL.clone(), "uiModel"),
            MethodParameter::new(well_known::HTTP_SERVLET_REQUEST.clone(), "httpServletRequest"),
        ]
    }

    fn conversion_service(&mut self) {
        let name = JavaSymbolName::new(CONVERSION_FIELD);
        let ty = well_known::CONVERSION_SERVICE.clone();
        self.builder
            .add_field(FieldMetadataBuilder::new(self.id, Modifier::PRIVATE, name, ty.clone()));
        if self.input.governor.declared_constructor(&[ty.clone()]).is_some() {
            return;
        }
        let mut body = self.body();
        body.append_formal_line(format!("this.{CONVERSION_FIELD} = {CONVERSION_FIELD};"));
        let mut ctor = ConstructorMetadataBuilder::new(self.id, Modifier::PUBLIC, body.into_output())
            .with_parameters(vec![MethodParameter::new(ty, CONVERSION_FIELD)]);
        ctor.add_annotation(AnnotationMetadataBuilder::new(&well_known::AUTOWIRED));
        self.builder.add_constructor(ctor);
    }

    /// `create` handles the submitted form
    fn write_handler(&mut self, name: &str, method: &str, view: &str, call: &MemberTypeAdditions) {
        let Some(accessor) = self.persistence.and_then(|p| p.identifier_accessor.clone()) else {
            return;
        };
        if self.governor_has(name) {
            return;
        }
        let entity = self.entity_name.clone();
        let mut body = self.body();
        body.append_formal_line("if (bindingResult.hasErrors()) {");
        body.indent();
        body.append_formal_line(format!("populateEditForm(uiModel, {entity});"));
        body.append_formal_line(format!("return \"{}/{view}\";", self.path()));
        body.indent_remove();
        body.append_formal_line("}");
        body.append_formal_line("uiModel.asMap().clear();");
        body.append_formal_line(format!("{};", call.method_call()));
        body.append_formal_line(self.redirect_to_saved(&accessor));

        let mut handler = self.method(name, &well_known::STRING, body).with_parameters(self.form_parameters());
        handler.add_annotation(request_mapping(None, Some(method), None));
        self.builder.add_method(handler);
    }

    fn create_form(&mut self) {
        if self.governor_has("createForm") {
            return;
        }
        let form_type = self.builder.name_of(&self.input.annotation_values.form_backing_type);
        let mut body = self.body();
        body.append_formal_line(format!("populateEditForm(uiModel, new {form_type}());"));
        let mut dependencies = false;
        for dependent in &self.input.dependent_types {
            let Some(count) = dependent.persistence.as_ref().and_then(|p| p.count.as_ref()) else {
                continue;
            };
            if !dependencies {
                let string_array = well_known::STRING.clone().with_array(1);
                let list = self.builder.name_of(&well_known::LIST.clone().with_parameters(vec![string_array.clone()]));
                let array_list = self.builder.name_of(&well_known::ARRAY_LIST.clone().with_parameters(vec![string_array]));
                body.append_formal_line(format!("{list} dependencies = new {array_list}();"));
                dependencies = true;
            }
            body.append_formal_line(format!("if ({} == 0) {{", count.method_call()));
            body.indent();
            body.append_formal_line(format!(
                "dependencies.add(new String[] {{ \"{}\", \"{}\" }});",
                dependent.java_type.simple_type_name().to_lowercase(),
                dependent.plural.to_lowercase()
            ));
            body.indent_remove();
            body.append_formal_line("}");
        }
        if dependencies {
            body.append_formal_line("uiModel.addAttribute(\"dependencies\", dependencies);");
        }
        body.append_formal_line(format!("return \"{}/create\";", self.path()));

        let mut method = self
            .method("createForm", &well_known::STRING, body)
            .with_parameters(vec![MethodParameter::new(well_known::MODEL.clone(), "uiModel")]);
        let mut mapping = AnnotationMetadataBuilder::new(&well_known::REQUEST_MAPPING);
        mapping.add_string_attribute("params", "form");
        mapping.add_string_attribute("produces", PRODUCES);
        method.add_annotation(mapping);
        self.builder.add_method(method);
    }

    fn show(&mut self, find: &MemberTypeAdditions) {
        let Some(id_type) = self.identifier_type() else {
            return;
        };
        if self.governor_has("show") {
            return;
        }
        let mut body = self.body();
        if self.has_dates() {
            body.append_formal_line("addDateTimeFormatPatterns(uiModel);");
        }
        body.append_formal_line(format!(
            "uiModel.addAttribute(\"{}\", {});",
            self.entity_name.to_lowercase(),
            find.method_call()
        ));
        let item_id = if self.composite_pk {
            format!("{CONVERSION_FIELD}.convert(id, String.class)")
        } else {
            "id".to_string()
        };
        body.append_formal_line(format!("uiModel.addAttribute(\"itemId\", {item_id});"));
        body.append_formal_line(format!("return \"{}/show\";", self.path()));

        let mut method = self.method("show", &well_known::STRING, body).with_parameters(vec![
            MethodParameter::new(id_type, "id").annotated(path_variable("id")),
            MethodParameter::new(well_known::MODEL.clone(), "uiModel"),
        ]);
        method.add_annotation(request_mapping(Some("/{id}"), None, None));
        self.builder.add_method(method);
    }

    fn list(&mut self, find_all: &MemberTypeAdditions, count_all: &MemberTypeAdditions, find_entries: &MemberTypeAdditions) {
        if self.governor_has("list") {
            return;
        }
        let plural = self
            .input
            .domain_types
            .get(&self.input.annotation_values.form_backing_type)
            .map(|d| d.plural.to_lowercase())
            .unwrap_or_default();
        let mut body = self.body();
        body.append_formal_line("if (page != null || size != null) {");
        body.indent();
        body.append_formal_line("int sizeNo = size == null ? 10 : size.intValue();");
        body.append_formal_line("final int firstResult = page == null ? 0 : (page.intValue() - 1) * sizeNo;");
        body.append_formal_line(format!("uiModel.addAttribute(\"{plural}\", {});", find_entries.method_call()));
        body.append_formal_line(format!("float nrOfPages = (float) {} / sizeNo;", count_all.method_call()));
        body.append_formal_line(
            "uiModel.addAttribute(\"maxPages\", (int) ((nrOfPages > (int) nrOfPages || nrOfPages == 0.0) ? nrOfPages + 1 : nrOfPages));",
        );
        body.indent_remove();
        body.append_formal_line("} else {");
        body.indent();
        body.append_formal_line(format!("uiModel.addAttribute(\"{plural}\", {});", find_all.method_call()));
        body.indent_remove();
        body.append_formal_line("}");
        if self.has_dates() {
            body.append_formal_line("addDateTimeFormatPatterns(uiModel);");
        }
        body.append_formal_line(format!("return \"{}/list\";", self.path()));

        let mut method = self.method("list", &well_known::STRING, body).with_parameters(vec![
            MethodParameter::new(well_known::INT_OBJECT.clone(), "page").annotated(optional_param("page")),
            MethodParameter::new(well_known::INT_OBJECT.clone(), "size").annotated(optional_param("size")),
            MethodParameter::new(well_known::MODEL.clone(), "uiModel"),
        ]);
        method.add_annotation(request_mapping(None, None, None));
        self.builder.add_method(method);
    }

    fn update_form(&mut self, find: &MemberTypeAdditions) {
        let Some(id_type) = self.identifier_type() else {
            return;
        };
        if self.governor_has("updateForm") {
            return;
        }
        let mut body = self.body();
        body.append_formal_line(format!("populateEditForm(uiModel, {});", find.method_call()));
        body.append_formal_line(format!("return \"{}/update\";", self.path()));
        let mut method = self.method("updateForm", &well_known::STRING, body).with_parameters(vec![
            MethodParameter::new(id_type, "id").annotated(path_variable("id")),
            MethodParameter::new(well_known::MODEL.clone(), "uiModel"),
        ]);
        method.add_annotation(request_mapping(Some("/{id}"), None, Some("form")));
        self.builder.add_method(method);
    }

    fn delete(&mut self, remove: &MemberTypeAdditions, find: &MemberTypeAdditions) {
        let Some(id_type) = self.identifier_type() else {
            return;
        };
        if self.governor_has("delete") {
            return;
        }
        let form_type = self.builder.name_of(&self.input.annotation_values.form_backing_type);
        let mut body = self.body();
        body.append_formal_line(format!("{form_type} {} = {};", self.entity_name, find.method_call()));
        body.append_formal_line(format!("{};", remove.method_call()));
        body.append_formal_line("uiModel.asMap().clear();");
        body.append_formal_line("uiModel.addAttribute(\"page\", (page == null) ? \"1\" : page.toString());");
        body.append_formal_line("uiModel.addAttribute(\"size\", (size == null) ? \"10\" : size.toString());");
        body.append_formal_line(format!("return \"redirect:/{}\";", self.path()));

        let mut method = self.method("delete", &well_known::STRING, body).with_parameters(vec![
            MethodParameter::new(id_type, "id").annotated(path_variable("id")),
            MethodParameter::new(well_known::INT_OBJECT.clone(), "page").annotated(optional_param("page")),
            MethodParameter::new(well_known::INT_OBJECT.clone(), "size").annotated(optional_param("size")),
            MethodParameter::new(well_known::MODEL.clone(), "uiModel"),
        ]);
        method.add_annotation(request_mapping(Some("/{id}"), Some("DELETE"), None));
        self.builder.add_method(method);
    }

    fn date_time_format_patterns(&mut self) {
        if self.governor_has("addDateTimeFormatPatterns") {
            return;
        }
        let mut body = self.body();
        for (field, format) in &self.input.date_types {
            let pattern = match &format.pattern {
                Some(pattern) => format!("\"{pattern}\""),
                None => {
                    let formats = self.builder.name_of(&well_known::DATE_TIME_FORMAT_UTILS);
                    let locale = self.builder.name_of(&well_known::LOCALE_CONTEXT_HOLDER);
                    format!("{formats}.patternForStyle(\"{}\", {locale}.getLocale())", format.style)
                }
            };
            body.append_formal_line(format!(
                "uiModel.addAttribute(\"{}_{}_date_format\", {pattern});",
                self.entity_name,
                field.to_lowercase()
            ));
        }
        let method = MethodMetadataBuilder::new(
            self.id,
            Modifier::NONE,
            JavaSymbolName::new("addDateTimeFormatPatterns"),
            well_known::VOID_PRIMITIVE.clone(),
            body.into_output(),
        )
        .with_parameters(vec![MethodParameter::new(well_known::MODEL.clone(), "uiModel")]);
        self.builder.add_method(method);
    }

    fn populate_edit_form(&mut self) {
        let form_backing = &self.input.annotation_values.form_backing_type;
        let params = [well_known::MODEL.clone(), form_backing.clone()];
        if self.input.governor.method(&JavaSymbolName::new("populateEditForm"), &params).is_some() {
            return;
        }
        let entity = self.entity_name.clone();
        let mut body = self.body();
        body.append_formal_line(format!("uiModel.addAttribute(\"{entity}\", {entity});"));
        if self.has_dates() {
            body.append_formal_line("addDateTimeFormatPatterns(uiModel);");
        }
        if self.input.annotation_values.populate_methods {
            for domain in self.input.domain_types.values() {
                if !self.input.editable_types.contains(&domain.java_type) {
                    continue;
                }
                let attribute = domain.plural.to_lowercase();
                if let Some(find_all) = domain.persistence.as_ref().and_then(|p| p.find_all.as_ref()) {
                    body.append_formal_line(format!("uiModel.addAttribute(\"{attribute}\", {});", find_all.method_call()));
                    find_all.copy_additions_to(&mut self.builder, &self.input.governor);
                } else if domain.is_enum {
                    let enum_name = self.builder.name_of(&domain.java_type);
                    let arrays = self.builder.name_of(&well_known::ARRAYS);
                    body.append_formal_line(format!(
                        "uiModel.addAttribute(\"{attribute}\", {arrays}.asList({enum_name}.values()));"
                    ));
                }
            }
        }
        let method = MethodMetadataBuilder::new(
            self.id,
            Modifier::NONE,
            JavaSymbolName::new("populateEditForm"),
            well_known::VOID_PRIMITIVE.clone(),
            body.into_output(),
        )
        .with_parameters(vec![
            MethodParameter::new(well_known::MODEL.clone(), "uiModel"),
            MethodParameter::new(form_backing.clone(), entity),
        ]);
        self.builder.add_method(method);
    }

    fn encode_url_path_segment(&mut self) {
        if self.governor_has("encodeUrlPathSegment") {
            return;
        }
        self.builder.add_import(&well_known::UNSUPPORTED_ENCODING_EXCEPTION);
        let web_utils = self.builder.name_of(&well_known::WEB_UTILS);
        let uri_utils = self.builder.name_of(&well_known::URI_UTILS);
        let encoding_exception = self.builder.name_of(&well_known::UNSUPPORTED_ENCODING_EXCEPTION);
        let mut body = self.body();
        body.append_formal_line("String enc = httpServletRequest.getCharacterEncoding();");
        body.append_formal_line("if (enc == null) {");
        body.indent();
        body.append_formal_line(format!("enc = {web_utils}.DEFAULT_CHARACTER_ENCODING;"));
        body.indent_remove();
        body.append_formal_line("}");
        body.append_formal_line("try {");
        body.indent();
        body.append_formal_line(format!("pathSegment = {uri_utils}.encodePathSegment(pathSegment, enc);"));
        body.indent_remove();
        body.append_formal_line(format!("}} catch ({encoding_exception} uee) {{}}"));
        body.append_formal_line("return pathSegment;");
        let method = MethodMetadataBuilder::new(
            self.id,
            Modifier::NONE,
            JavaSymbolName::new("encodeUrlPathSegment"),
            well_known::STRING.clone(),
            body.into_output(),
        )
        .with_parameters(vec![
            MethodParameter::new(well_known::STRING.clone(), "pathSegment"),
            MethodParameter::new(well_known::HTTP_SERVLET_REQUEST.clone(), "httpServletRequest"),
        ]);
        self.builder.add_method(method);
    }
}

/// Build the controller unit
///
/// # Errors
/// Fails when the form backing type has no domain type details
pub fn build_web_scaffold(id: &MetadataId, input: &WebScaffoldInput, indent_width: usize) -> Result<ItdMetadata> {
    let values = &input.annotation_values;
    let form_backing = &values.form_backing_type;
    let details = input.domain_types.get(form_backing).ok_or_else(|| {
        ProviderError::precondition(format!("metadata holder required for form backing type: {form_backing}"))
    })?;
    let governor = &input.governor;
    let aspect = ItdTypeDetails::aspect_name(governor.name(), ASPECT_SUFFIX);
    let persistence = details.persistence.as_ref();

    let mut scaffold = ScaffoldBuilder {
        id,
        input,
        builder: ItdTypeDetailsBuilder::new(id, governor, aspect, true),
        persistence,
        indent_width,
        entity_name: JavaSymbolName::for_type(form_backing).symbol_name().to_string(),
        composite_pk: persistence.is_some_and(|p| p.composite_pk),
    };

    if scaffold.composite_pk {
        scaffold.conversion_service();
    }

    let ops = &input.operations;
    let find = ops.get(OperationKind::Find);

    if let (true, Some(persist)) = (values.create, ops.get(OperationKind::Persist)) {
        scaffold.write_handler("create", "POST", "create", persist);
        scaffold.create_form();
        persist.copy_additions_to(&mut scaffold.builder, governor);
    }

    if let Some(find) = find {
        scaffold.show(find);
        find.copy_additions_to(&mut scaffold.builder, governor);
    }

    if let (Some(count_all), Some(find_all), Some(find_entries)) = (
        ops.get(OperationKind::CountAll),
        ops.get(OperationKind::FindAll),
        ops.get(OperationKind::FindEntries),
    ) {
        scaffold.list(find_all, count_all, find_entries);
        for op in [count_all, find_all, find_entries] {
            op.copy_additions_to(&mut scaffold.builder, governor);
        }
    }

    if let (true, Some(merge), Some(find)) = (values.update, ops.get(OperationKind::Merge), find) {
        scaffold.write_handler("update", "PUT", "update", merge);
        scaffold.update_form(find);
        merge.copy_additions_to(&mut scaffold.builder, governor);
    }

    if let (true, Some(remove), Some(find)) = (values.delete, ops.get(OperationKind::Remove), find) {
        scaffold.delete(remove, find);
        remove.copy_additions_to(&mut scaffold.builder, governor);
    }

    if scaffold.has_dates() {
        scaffold.date_time_format_patterns();
    }

    if values.create || values.update {
        scaffold.populate_edit_form();
        scaffold.encode_url_path_segment();
    }

    Ok(ItdMetadata::valid(id, scaffold.builder.build()?))
}

/// Produces `_Roo_Controller` units
pub struct WebScaffoldProvider {
    inputs: Arc<dyn InputResolver<WebScaffoldInput>>,
}

impl std::fmt::Debug for WebScaffoldProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebScaffoldProvider").finish_non_exhaustive()
    }
}

impl WebScaffoldProvider {
    #[must_use]
    pub fn new(inputs: impl InputResolver<WebScaffoldInput> + 'static) -> Self {
        Self { inputs: Arc::new(inputs) }
    }
}

impl MetadataProvider for WebScaffoldProvider {
    fn kind(&self) -> MetadataKind {
        MetadataKind::WebScaffold
    }

    fn compute(&self, id: &MetadataId, ctx: &ProviderContext<'_>) -> Result<Option<ProvidedMetadata>> {
        ensure_instance_of(&MetadataKind::WebScaffold, id)?;
        let Some(input) = self.inputs.resolve(id) else {
            debug!(%id, "no scaffold inputs");
            return Ok(None);
        };
        let mut upstream = vec![id.with_kind(MetadataKind::PhysicalType)];
        upstream.extend(input.upstream.iter().cloned());
        register_upstream(ctx, &upstream, id);
        build_web_scaffold(id, &input, ctx.indent_width).map(|m| Some(ProvidedMetadata::Itd(m)))
    }
}
