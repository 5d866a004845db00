//! Sample value expressions per field type and constraints

use crate::error::{ProviderError, Result};
use crate::tagging::keys;
use indexmap::IndexMap;
use itd_builder::FieldMetadata;
use itd_model::{uncapitalize, well_known, JavaType, MetadataId};

pub(crate) const INDEX_VAR: &str = "index";
pub(crate) const OBJ_VAR: &str = "obj";

const CALENDAR_NOW_DAY: &str = "new GregorianCalendar(Calendar.getInstance().get(Calendar.YEAR), \
Calendar.getInstance().get(Calendar.MONTH), Calendar.getInstance().get(Calendar.DAY_OF_MONTH)";

const RANDOM_RECENT_DATE: &str = "new GregorianCalendar(Calendar.getInstance().get(Calendar.YEAR), \
Calendar.getInstance().get(Calendar.MONTH), Calendar.getInstance().get(Calendar.DAY_OF_MONTH), \
Calendar.getInstance().get(Calendar.HOUR_OF_DAY), Calendar.getInstance().get(Calendar.MINUTE), \
Calendar.getInstance().get(Calendar.SECOND) + new Double(Math.random() * 1000).intValue()).getTime()";

/// Expression producing a sample value for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initializer {
    pub expression: String,
    /// Types the expression names by simple name
    pub imports: Vec<JavaType>,
    /// Related entity whose sample-data companion the expression calls
    pub collaborator: Option<JavaType>,
}

impl Initializer {
    fn plain(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            imports: Vec::new(),
            collaborator: None,
        }
    }

    fn importing(expression: impl Into<String>, imports: &[&JavaType]) -> Self {
        Self {
            expression: expression.into(),
            imports: imports.iter().map(|t| (*t).clone()).collect(),
            collaborator: None,
        }
    }
}

/// Sample-data companion type for an entity (`com.foo.Person` → `com.foo.PersonDataOnDemand`)
#[must_use]
pub fn collaborator_type(entity: &JavaType) -> JavaType {
    JavaType::new(format!("{}DataOnDemand", entity.fully_qualified_type_name()))
}

/// Field holding the companion for `entity` (`personDataOnDemand`)
#[must_use]
pub fn collaborator_field_name(entity: &JavaType) -> String {
    uncapitalize(collaborator_type(entity).simple_type_name())
}

/// Pick the sample value expression for `field`
///
/// `collaborators` maps related entity types to their sample-data ids; a
/// field of such a type draws its value from the related companion.
///
/// # Errors
/// Returns a precondition failure for `@Size` with `max` below `min`
pub fn field_initializer(
    field: &FieldMetadata,
    entity: &JavaType,
    collaborators: &IndexMap<JavaType, MetadataId>,
) -> Result<Initializer> {
    let ty = field.field_type();
    let declared = field.initializer().filter(|s| !s.is_empty());
    let or = |default: &str| declared.unwrap_or(default).to_string();

    if *ty == *well_known::DATE {
        return Ok(if field.annotation(&well_known::PAST).is_some() {
            Initializer::importing("new Date(new Date().getTime() - 10000000L)", &[&*well_known::DATE])
        } else if field.annotation(&well_known::FUTURE).is_some() {
            Initializer::importing("new Date(new Date().getTime() + 10000000L)", &[&*well_known::DATE])
        } else {
            Initializer::importing(RANDOM_RECENT_DATE, &[&*well_known::CALENDAR, &*well_known::GREGORIAN_CALENDAR])
        });
    }
    if *ty == *well_known::CALENDAR {
        let expression = if field.annotation(&well_known::PAST).is_some() {
            format!("{CALENDAR_NOW_DAY} - 1)")
        } else if field.annotation(&well_known::FUTURE).is_some() {
            format!("{CALENDAR_NOW_DAY} + 1)")
        } else {
            "Calendar.getInstance()".to_string()
        };
        return Ok(Initializer::importing(expression, &[&*well_known::CALENDAR, &*well_known::GREGORIAN_CALENDAR]));
    }
    if *ty == *well_known::STRING {
        return string_initializer(field, entity).map(Initializer::plain);
    }
    if *ty == *well_known::STRING_ARRAY {
        return Ok(Initializer::plain(or("{ \"Y\", \"N\" }")));
    }
    if *ty == *well_known::BOOLEAN_OBJECT {
        return Ok(Initializer::plain(or("Boolean.TRUE")));
    }
    if *ty == *well_known::BOOLEAN_PRIMITIVE {
        return Ok(Initializer::plain(or("true")));
    }
    if let Some(expression) = numeric_initializer(ty) {
        return Ok(Initializer::plain(or(&expression)));
    }
    if *ty == *well_known::CHAR_OBJECT {
        return Ok(Initializer::plain(or("new Character('N')")));
    }
    if *ty == *well_known::CHAR_PRIMITIVE {
        return Ok(Initializer::plain(or("'N'")));
    }
    if *ty == well_known::CHAR_PRIMITIVE.clone().with_array(1) {
        return Ok(Initializer::plain(or("{ 'Y', 'N' }")));
    }
    if *ty == *well_known::BIG_DECIMAL || *ty == *well_known::BIG_INTEGER {
        return Ok(Initializer::importing(format!("{}.valueOf({INDEX_VAR})", ty.simple_type_name()), &[ty]));
    }
    if *ty == *well_known::BYTE_OBJECT {
        return Ok(Initializer::plain(format!("new Byte({})", or("\"1\""))));
    }
    if *ty == *well_known::BYTE_PRIMITIVE {
        return Ok(Initializer::plain(format!("new Byte({}).byteValue()", or("\"1\""))));
    }
    if *ty == *well_known::BYTE_ARRAY_PRIMITIVE {
        return Ok(Initializer::plain(or(&format!("String.valueOf({INDEX_VAR}).getBytes()"))));
    }
    if ty == entity {
        return Ok(Initializer::plain(OBJ_VAR));
    }
    if field.custom_data().contains(keys::ENUMERATED_FIELD) {
        return Ok(Initializer::importing(format!("{}.class.getEnumConstants()[0]", ty.simple_type_name()), &[ty]));
    }
    if collaborators.contains_key(ty) {
        let holder = collaborator_field_name(ty);
        let simple = ty.simple_type_name();
        let expression = if field.custom_data().contains(keys::ONE_TO_ONE_FIELD) {
            format!("{holder}.getSpecific{simple}({INDEX_VAR})")
        } else {
            format!("{holder}.getRandom{simple}()")
        };
        return Ok(Initializer {
            expression,
            imports: Vec::new(),
            collaborator: Some(ty.clone()),
        });
    }
    Ok(Initializer::plain("null"))
}

/// Boxed, primitive and primitive-array forms of the integral and floating types
fn numeric_initializer(ty: &JavaType) -> Option<String> {
    let conversion = match ty.fully_qualified_type_name() {
        "java.lang.Integer" => None,
        "java.lang.Double" => Some("doubleValue"),
        "java.lang.Float" => Some("floatValue"),
        "java.lang.Long" => Some("longValue"),
        "java.lang.Short" => Some("shortValue"),
        _ => return None,
    };
    if !ty.parameters().is_empty() || ty.array_dimensions() > 1 || (ty.is_array() && !ty.is_primitive()) {
        return None;
    }
    let single = match (conversion, ty.is_primitive() && !ty.is_array()) {
        (None, true) => INDEX_VAR.to_string(),
        (None, false) => format!("new Integer({INDEX_VAR})"),
        (Some(method), _) => format!("new Integer({INDEX_VAR}).{method}()"),
    };
    Some(if ty.is_array() {
        let element = if conversion.is_none() { INDEX_VAR.to_string() } else { single.clone() };
        format!("{{ {element}, {element} }}")
    } else {
        single
    })
}

fn string_initializer(field: &FieldMetadata, entity: &JavaType) -> Result<String> {
    let name = field.field_name().symbol_name();
    let mut base = field
        .initializer()
        .and_then(|init| {
            let start = init.find('"')? + 1;
            let end = init.rfind('"')?;
            (end >= start).then(|| init[start..end].to_string())
        })
        .unwrap_or_else(|| name.to_string());

    if field.annotation(&well_known::EMAIL).is_some() || name.to_lowercase().contains("email") {
        return Ok(format!("\"foo\" + {INDEX_VAR} + \"@bar.com\""));
    }

    let mut max_length = i64::from(i32::MAX);
    if let Some(size) = field.annotation(&well_known::SIZE) {
        if let Some(max) = size.i64_value("max") {
            max_length = max;
        }
        if let Some(min) = size.i64_value("min") {
            if max_length < min {
                return Err(ProviderError::precondition(format!(
                    "@Size attribute 'max' must be greater than 'min' for field '{name}' in {}",
                    entity.fully_qualified_type_name()
                )));
            }
            let width = usize::try_from(min - 2).unwrap_or(0);
            if base.chars().count() < width {
                base = format!("{base:<width$}").replace(' ', "x");
            }
        }
    } else if let Some(length) = field.custom_data().i64_property(keys::COLUMN_FIELD, "length") {
        max_length = length;
    }

    Ok(match max_length {
        0 => "\"\"".to_string(),
        1 => format!("String.valueOf({INDEX_VAR})"),
        2 => format!("\"{}\" + {INDEX_VAR}", base.chars().next().unwrap_or('x')),
        max => {
            let keep = usize::try_from(max - 2).unwrap_or(0);
            if base.chars().count() > keep {
                base = base.chars().take(keep).collect();
            }
            format!("\"{base}_\" + {INDEX_VAR}")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use itd_builder::{AnnotationMetadataBuilder, FieldMetadataBuilder, Modifier};
    use itd_model::{JavaSymbolName, LogicalPath, MetadataKind, PathKind};
    use serde_json::json;

    fn entity() -> JavaType {
        JavaType::new("com.foo.Person")
    }

    fn field(name: &str, ty: &JavaType) -> FieldMetadataBuilder {
        let id = MetadataId::for_type(MetadataKind::PhysicalType, LogicalPath::root_module(PathKind::SrcMainJava), entity());
        FieldMetadataBuilder::new(&id, Modifier::PRIVATE, JavaSymbolName::new(name), ty.clone())
    }

    fn sized(name: &str, min: Option<i32>, max: Option<i32>) -> FieldMetadata {
        let mut size = AnnotationMetadataBuilder::new(&well_known::SIZE);
        if let Some(min) = min {
            size.add_integer_attribute("min", min);
        }
        if let Some(max) = max {
            size.add_integer_attribute("max", max);
        }
        let mut f = field(name, &well_known::STRING);
        f.add_annotation(size);
        f.build().unwrap()
    }

    fn expr(f: &FieldMetadata) -> String {
        field_initializer(f, &entity(), &IndexMap::new()).unwrap().expression
    }

    #[test]
    fn plain_string_uses_field_name() {
        assert_eq!(expr(&field("name", &well_known::STRING).build().unwrap()), "\"name_\" + index");
    }

    #[test]
    fn string_literal_initializer_is_the_base() {
        let f = field("title", &well_known::STRING).with_initializer("\"Dr\"").build().unwrap();
        assert_eq!(expr(&f), "\"Dr_\" + index");
    }

    #[test]
    fn email_fields() {
        assert_eq!(expr(&field("workEmail", &well_known::STRING).build().unwrap()), "\"foo\" + index + \"@bar.com\"");
    }

    #[test]
    fn size_bounds_shape_the_base() {
        assert_eq!(expr(&sized("name", Some(8), None)), "\"namexx_\" + index");
        assert_eq!(expr(&sized("description", None, Some(5))), "\"des_\" + index");
        assert_eq!(expr(&sized("code", None, Some(2))), "\"c\" + index");
        assert_eq!(expr(&sized("flag", None, Some(1))), "String.valueOf(index)");
        assert_eq!(expr(&sized("blank", None, Some(0))), "\"\"");
    }

    #[test]
    fn size_max_below_min_is_a_precondition_failure() {
        let err = field_initializer(&sized("name", Some(10), Some(5)), &entity(), &IndexMap::new()).unwrap_err();
        assert!(matches!(err, ProviderError::Precondition(_)));
    }

    #[test]
    fn column_length_applies_without_size() {
        let mut f = field("surname", &well_known::STRING);
        f.custom_data_mut().put(keys::COLUMN_FIELD, json!({ "length": 4 }));
        assert_eq!(expr(&f.build().unwrap()), "\"su_\" + index");
    }

    #[test]
    fn numeric_forms() {
        assert_eq!(expr(&field("n", &well_known::INT_OBJECT).build().unwrap()), "new Integer(index)");
        assert_eq!(expr(&field("n", &well_known::INT_PRIMITIVE).build().unwrap()), "index");
        assert_eq!(expr(&field("n", &well_known::INT_PRIMITIVE.clone().with_array(1)).build().unwrap()), "{ index, index }");
        assert_eq!(expr(&field("n", &well_known::LONG_PRIMITIVE).build().unwrap()), "new Integer(index).longValue()");
        assert_eq!(
            expr(&field("n", &well_known::DOUBLE_PRIMITIVE.clone().with_array(1)).build().unwrap()),
            "{ new Integer(index).doubleValue(), new Integer(index).doubleValue() }"
        );
        assert_eq!(expr(&field("n", &well_known::INT_OBJECT).with_initializer("42").build().unwrap()), "42");
    }

    #[test]
    fn byte_and_decimal_forms() {
        assert_eq!(expr(&field("b", &well_known::BYTE_OBJECT).build().unwrap()), "new Byte(\"1\")");
        assert_eq!(expr(&field("b", &well_known::BYTE_PRIMITIVE).build().unwrap()), "new Byte(\"1\").byteValue()");
        assert_eq!(expr(&field("b", &well_known::BYTE_ARRAY_PRIMITIVE).build().unwrap()), "String.valueOf(index).getBytes()");
        let price = field_initializer(&field("price", &well_known::BIG_DECIMAL).build().unwrap(), &entity(), &IndexMap::new()).unwrap();
        assert_eq!(price.expression, "BigDecimal.valueOf(index)");
        assert_eq!(price.imports, vec![well_known::BIG_DECIMAL.clone()]);
    }

    #[test]
    fn temporal_forms() {
        let mut born = field("born", &well_known::DATE);
        born.add_annotation(AnnotationMetadataBuilder::new(&well_known::PAST));
        assert_eq!(expr(&born.build().unwrap()), "new Date(new Date().getTime() - 10000000L)");
        let mut due = field("due", &well_known::CALENDAR);
        due.add_annotation(AnnotationMetadataBuilder::new(&well_known::FUTURE));
        assert!(expr(&due.build().unwrap()).ends_with("Calendar.DAY_OF_MONTH) + 1)"));
        assert_eq!(expr(&field("at", &well_known::CALENDAR).build().unwrap()), "Calendar.getInstance()");
    }

    #[test]
    fn self_enum_and_related_entities() {
        assert_eq!(expr(&field("parent", &entity()).build().unwrap()), "obj");

        let status = JavaType::new("com.foo.Status");
        let mut f = field("status", &status);
        f.custom_data_mut().tag(keys::ENUMERATED_FIELD);
        assert_eq!(expr(&f.build().unwrap()), "Status.class.getEnumConstants()[0]");

        let address = JavaType::new("com.foo.Address");
        let mut collaborators = IndexMap::new();
        collaborators.insert(
            address.clone(),
            MetadataId::for_type(MetadataKind::DataOnDemand, LogicalPath::root_module(PathKind::SrcTestJava), collaborator_type(&address)),
        );
        let many = field_initializer(&field("home", &address).build().unwrap(), &entity(), &collaborators).unwrap();
        assert_eq!(many.expression, "addressDataOnDemand.getRandomAddress()");
        assert_eq!(many.collaborator, Some(address.clone()));

        let mut one = field("billing", &address);
        one.custom_data_mut().tag(keys::ONE_TO_ONE_FIELD);
        let one = field_initializer(&one.build().unwrap(), &entity(), &collaborators).unwrap();
        assert_eq!(one.expression, "addressDataOnDemand.getSpecificAddress(index)");
    }

    #[test]
    fn unknown_types_are_null() {
        assert_eq!(expr(&field("blob", &JavaType::new("com.foo.Blob")).build().unwrap()), "null");
    }
}
