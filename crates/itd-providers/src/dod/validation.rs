//! Bodies of the per-field mutator methods
//!
//! A mutator assigns the sample value and then clamps it to whatever bean
//! validation or column constraints the field carries.

use crate::error::{ProviderError, Result};
use crate::tagging::keys;
use itd_builder::{FieldMetadata, InvocableMemberBodyBuilder};
use itd_model::{well_known, JavaType};

use super::initializer::OBJ_VAR;

/// Generated mutator body plus the types it names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationBody {
    pub body: String,
    pub imports: Vec<JavaType>,
}

/// Where a sample value goes once it is clamped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTarget<'a> {
    /// Handed to `obj.<mutator>(value)`
    Mutator(&'a str),
    /// Kept in a local for a composite key constructor; strings count as unique
    KeyPart,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Numeric {
    Big,
    Double,
    Float,
    Long,
    Plain,
}

impl Numeric {
    fn of(ty: &JavaType) -> Self {
        match ty.fully_qualified_type_name() {
            "java.math.BigDecimal" | "java.math.BigInteger" => Self::Big,
            "java.lang.Double" => Self::Double,
            "java.lang.Float" => Self::Float,
            "java.lang.Long" => Self::Long,
            _ => Self::Plain,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Double => "D",
            Self::Float => "F",
            Self::Long => "L",
            Self::Big | Self::Plain => "",
        }
    }
}

fn is_decimal(ty: &JavaType) -> bool {
    !ty.is_array()
        && matches!(
            ty.fully_qualified_type_name(),
            "java.math.BigDecimal" | "java.lang.Double" | "java.lang.Float"
        )
}

fn is_integral(ty: &JavaType) -> bool {
    !ty.is_array()
        && matches!(
            ty.fully_qualified_type_name(),
            "java.math.BigInteger" | "java.lang.Integer" | "java.lang.Long" | "java.lang.Short" | "java.lang.Byte"
        )
}

/// Source spelling of a local variable's type
fn local_type(ty: &JavaType) -> String {
    let base = ty.keyword().map_or_else(|| ty.simple_type_name().to_string(), str::to_string);
    format!("{base}{}", "[]".repeat(usize::from(ty.array_dimensions())))
}

/// One bound check; `max` renders a value the way the field's type spells literals
struct Clamp<'a> {
    body: &'a mut InvocableMemberBodyBuilder,
    name: &'a str,
    numeric: Numeric,
}

impl Clamp<'_> {
    fn literal(&self, value: &str) -> String {
        match self.numeric {
            Numeric::Big => value.to_string(),
            numeric => format!("{value}{}", numeric.suffix()),
        }
    }

    fn emit(&mut self, condition: &str, assign: &str) {
        self.body.append_formal_line(&format!("if ({condition}) {{"));
        self.body.indent();
        self.body.append_formal_line(&format!("{} = {assign};", self.name));
        self.body.indent_remove();
        self.body.append_formal_line("}");
    }

    /// `x > max` or `x.compareTo(max) == 1`
    fn above(&self, big_type: &str, max: &str) -> String {
        let name = self.name;
        if self.numeric == Numeric::Big {
            format!("{name}.compareTo(new {big_type}(\"{max}\")) == 1")
        } else {
            format!("{name} > {}", self.literal(max))
        }
    }

    fn below(&self, big_type: &str, min: &str) -> String {
        let name = self.name;
        if self.numeric == Numeric::Big {
            format!("{name}.compareTo(new {big_type}(\"{min}\")) == -1")
        } else {
            format!("{name} < {}", self.literal(min))
        }
    }

    fn value(&self, big_type: &str, v: &str) -> String {
        if self.numeric == Numeric::Big {
            format!("new {big_type}(\"{v}\")")
        } else {
            self.literal(v)
        }
    }

    fn bounded(&mut self, big_type: &str, min: Option<&str>, max: Option<&str>) {
        match (min, max) {
            (Some(min), Some(max)) => {
                let condition = format!("{} || {}", self.below(big_type, min), self.above(big_type, max));
                let assign = self.value(big_type, max);
                self.emit(&condition, &assign);
            }
            (Some(min), None) => {
                let condition = self.below(big_type, min);
                let assign = self.value(big_type, min);
                self.emit(&condition, &assign);
            }
            (None, Some(max)) => {
                let condition = self.above(big_type, max);
                let assign = self.value(big_type, max);
                self.emit(&condition, &assign);
            }
            (None, None) => {}
        }
    }
}

/// Non-big decimal bounds go through `f64` so `"10"` renders as `10`
fn decimal_literal(raw: &str, numeric: Numeric) -> Result<String> {
    if numeric == Numeric::Big {
        return Ok(raw.to_string());
    }
    raw.trim()
        .parse::<f64>()
        .map(|v| v.to_string())
        .map_err(|_| ProviderError::precondition(format!("'{raw}' is not a decimal bound")))
}

fn nines(count: i64) -> String {
    "9".repeat(usize::try_from(count.max(1)).unwrap_or(1))
}

/// Build the body of `setX(Entity obj, int index)`, or the statements
/// computing one composite key part
///
/// # Errors
/// Returns a precondition failure when bounds contradict each other
pub fn field_validation_body(
    field: &FieldMetadata,
    initializer: &str,
    target: ValueTarget<'_>,
    indent_width: usize,
) -> Result<ValidationBody> {
    let ty = field.field_type();
    let name = field.field_name().symbol_name();
    let mut imports = Vec::new();
    if !ty.is_primitive() {
        imports.push(ty.clone());
    }

    let mut body = InvocableMemberBodyBuilder::with_indent_width(indent_width);
    body.append_formal_line(&format!("{} {name} = {initializer};", local_type(ty)));

    let column = |attr: &str| field.custom_data().i64_property(keys::COLUMN_FIELD, attr);
    let numeric = Numeric::of(ty);
    let big_type = ty.simple_type_name().to_string();

    if *ty == *well_known::STRING {
        let max = match field.annotation(&well_known::SIZE) {
            Some(size) => size.i64_value("max"),
            None => column("length"),
        };
        if let Some(max) = max {
            let unique = target == ValueTarget::KeyPart
                || field.custom_data().bool_property(keys::COLUMN_FIELD, "unique").unwrap_or(false);
            body.append_formal_line(&format!("if ({name}.length() > {max}) {{"));
            body.indent();
            if unique {
                imports.push(well_known::RANDOM.clone());
                body.append_formal_line(&format!("{name} = new Random().nextInt(10) + {name}.substring(1, {max});"));
            } else {
                body.append_formal_line(&format!("{name} = {name}.substring(0, {max});"));
            }
            body.indent_remove();
            body.append_formal_line("}");
        }
    } else if is_decimal(ty) {
        let mut clamp = Clamp { body: &mut body, name, numeric };
        if let Some(digits) = field.annotation(&well_known::DIGITS) {
            let integer = digits.i64_value("integer").unwrap_or(0);
            let fraction = digits.i64_value("fraction").unwrap_or(0);
            let max = decimal_literal(&format!("{}.{}", nines(integer), nines(fraction)), numeric)?;
            clamp.bounded(&big_type, None, Some(&max));
        } else if field.annotation(&well_known::DECIMAL_MIN).is_some() || field.annotation(&well_known::DECIMAL_MAX).is_some() {
            let bound = |ann: &JavaType| field.annotation(ann).and_then(|a| a.str_value("value")).map(str::to_string);
            let min = bound(&well_known::DECIMAL_MIN);
            let max = bound(&well_known::DECIMAL_MAX);
            if let (Some(lo), Some(hi)) = (&min, &max) {
                let (lo_v, hi_v) = (lo.trim().parse::<f64>(), hi.trim().parse::<f64>());
                if let (Ok(lo_v), Ok(hi_v)) = (lo_v, hi_v) {
                    if hi_v < lo_v {
                        return Err(ProviderError::precondition(format!(
                            "@DecimalMax must be at least @DecimalMin for field '{name}'"
                        )));
                    }
                }
            }
            let min = min.map(|m| decimal_literal(&m, numeric)).transpose()?;
            let max = max.map(|m| decimal_literal(&m, numeric)).transpose()?;
            clamp.bounded(&big_type, min.as_deref(), max.as_deref());
        } else if let Some(precision) = column("precision") {
            let scale = column("scale").unwrap_or(0);
            let max = decimal_literal(&format!("{}.{}", nines(precision - scale), nines(scale)), numeric)?;
            clamp.bounded(&big_type, None, Some(&max));
        }
    } else if is_integral(ty) {
        let min = field.annotation(&well_known::MIN).and_then(|a| a.i64_value("value"));
        let max = field.annotation(&well_known::MAX).and_then(|a| a.i64_value("value"));
        if let (Some(lo), Some(hi)) = (min, max) {
            if hi < lo {
                return Err(ProviderError::precondition(format!("@Max must be at least @Min for field '{name}'")));
            }
        }
        let min = min.map(|v| v.to_string());
        let max = max.map(|v| v.to_string());
        let mut clamp = Clamp { body: &mut body, name, numeric };
        clamp.bounded(&big_type, min.as_deref(), max.as_deref());
    }

    if let ValueTarget::Mutator(mutator) = target {
        body.append_formal_line(&format!("{OBJ_VAR}.{mutator}({name});"));
    }
    Ok(ValidationBody {
        body: body.into_output(),
        imports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use itd_builder::{AnnotationMetadataBuilder, FieldMetadataBuilder, Modifier};
    use itd_model::{JavaSymbolName, LogicalPath, MetadataId, MetadataKind, PathKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn field(name: &str, ty: &JavaType, annotations: Vec<AnnotationMetadataBuilder>) -> FieldMetadataBuilder {
        let id = MetadataId::for_type(
            MetadataKind::PhysicalType,
            LogicalPath::root_module(PathKind::SrcMainJava),
            JavaType::new("com.foo.Item"),
        );
        FieldMetadataBuilder::new(&id, Modifier::PRIVATE, JavaSymbolName::new(name), ty.clone()).with_annotations(annotations)
    }

    fn body(f: FieldMetadataBuilder, init: &str) -> String {
        let f = f.build().unwrap();
        let mutator = format!("set{}", f.field_name().capitalised());
        field_validation_body(&f, init, ValueTarget::Mutator(&mutator), 4).unwrap().body
    }

    #[test]
    fn digits_clamp_big_decimal() {
        let mut digits = AnnotationMetadataBuilder::new(&well_known::DIGITS);
        digits.add_integer_attribute("integer", 3);
        digits.add_integer_attribute("fraction", 2);
        let out = body(field("price", &well_known::BIG_DECIMAL, vec![digits]), "BigDecimal.valueOf(index)");
        assert_eq!(
            out,
            "BigDecimal price = BigDecimal.valueOf(index);\n\
             if (price.compareTo(new BigDecimal(\"999.99\")) == 1) {\n    \
             price = new BigDecimal(\"999.99\");\n\
             }\n\
             obj.setPrice(price);\n"
        );
    }

    #[test]
    fn size_max_truncates_strings() {
        let mut size = AnnotationMetadataBuilder::new(&well_known::SIZE);
        size.add_integer_attribute("max", 10);
        let out = body(field("name", &well_known::STRING, vec![size]), "\"name_\" + index");
        assert!(out.contains("if (name.length() > 10) {\n    name = name.substring(0, 10);\n}"));
        assert!(out.ends_with("obj.setName(name);\n"));
    }

    #[test]
    fn unique_columns_keep_a_random_prefix() {
        let mut f = field("code", &well_known::STRING, vec![]);
        f.custom_data_mut().put(keys::COLUMN_FIELD, json!({ "length": 6, "unique": true }));
        let f = f.build().unwrap();
        let out = field_validation_body(&f, "\"code_\" + index", ValueTarget::Mutator("setCode"), 4).unwrap();
        assert!(out.body.contains("code = new Random().nextInt(10) + code.substring(1, 6);"));
        assert!(out.imports.contains(&well_known::RANDOM));
    }

    #[test]
    fn key_parts_are_unique_and_not_assigned() {
        let mut size = AnnotationMetadataBuilder::new(&well_known::SIZE);
        size.add_integer_attribute("max", 8);
        let f = field("code", &well_known::STRING, vec![size]).build().unwrap();
        let out = field_validation_body(&f, "\"code_\" + index", ValueTarget::KeyPart, 4).unwrap();
        assert_eq!(
            out.body,
            "String code = \"code_\" + index;\n\
             if (code.length() > 8) {\n    \
             code = new Random().nextInt(10) + code.substring(1, 8);\n\
             }\n"
        );
        assert!(out.imports.contains(&well_known::RANDOM));
    }

    #[test]
    fn integral_bounds() {
        let mut min = AnnotationMetadataBuilder::new(&well_known::MIN);
        min.add_long_attribute("value", 1);
        let mut max = AnnotationMetadataBuilder::new(&well_known::MAX);
        max.add_long_attribute("value", 99);
        let out = body(field("age", &well_known::LONG_PRIMITIVE, vec![min, max]), "new Integer(index).longValue()");
        assert!(out.starts_with("long age = new Integer(index).longValue();\n"));
        assert!(out.contains("if (age < 1L || age > 99L) {\n    age = 99L;\n}"));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let mut min = AnnotationMetadataBuilder::new(&well_known::MIN);
        min.add_long_attribute("value", 10);
        let mut max = AnnotationMetadataBuilder::new(&well_known::MAX);
        max.add_long_attribute("value", 5);
        let f = field("n", &well_known::INT_OBJECT, vec![min, max]).build().unwrap();
        assert!(matches!(field_validation_body(&f, "index", ValueTarget::Mutator("setN"), 4), Err(ProviderError::Precondition(_))));
    }

    #[test]
    fn decimal_min_only() {
        let mut min = AnnotationMetadataBuilder::new(&well_known::DECIMAL_MIN);
        min.add_string_attribute("value", "1.5");
        let out = body(field("ratio", &well_known::DOUBLE_PRIMITIVE, vec![min]), "new Integer(index).doubleValue()");
        assert!(out.contains("if (ratio < 1.5D) {\n    ratio = 1.5D;\n}"));
    }

    #[test]
    fn column_precision_for_decimals() {
        let mut f = field("amount", &well_known::FLOAT_OBJECT, vec![]);
        f.custom_data_mut().put(keys::COLUMN_FIELD, json!({ "precision": 5, "scale": 2 }));
        let out = body(f, "new Integer(index).floatValue()");
        assert!(out.contains("if (amount > 999.99F) {"));
    }

    #[test]
    fn unconstrained_fields_only_assign() {
        let out = body(field("active", &well_known::BOOLEAN_PRIMITIVE, vec![]), "true");
        assert_eq!(out, "boolean active = true;\nobj.setActive(active);\n");
    }
}
