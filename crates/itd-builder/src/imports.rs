//! Import registration for one compilation unit
//!
//! Every type reference written into a unit goes through
//! [`ImportRegistrationResolver::name_of`], which decides between the simple
//! and the fully-qualified name and records the import. The first type to
//! claim a simple name wins; later types with the same simple name are
//! written fully-qualified.

use itd_model::{DataType, JavaPackage, JavaType};
use std::collections::{BTreeMap, HashMap};

/// Import state for one unit
#[derive(Debug, Clone)]
pub struct ImportRegistrationResolver {
    package: JavaPackage,
    unit_type: Option<JavaType>,
    imports: BTreeMap<String, JavaType>,
    simple_names: HashMap<String, String>,
}

impl ImportRegistrationResolver {
    /// Resolver for a unit in `package`
    #[must_use]
    pub fn new(package: JavaPackage) -> Self {
        Self {
            package,
            unit_type: None,
            imports: BTreeMap::new(),
            simple_names: HashMap::new(),
        }
    }

    /// Resolver for the unit declaring `unit_type`
    #[must_use]
    pub fn for_type(unit_type: &JavaType) -> Self {
        let mut resolver = Self::new(unit_type.package());
        let base = unit_type.base_type();
        resolver.simple_names.insert(
            base.simple_type_name().to_string(),
            base.fully_qualified_type_name().to_string(),
        );
        resolver.unit_type = Some(base);
        resolver
    }

    #[inline]
    #[must_use]
    pub fn package(&self) -> &JavaPackage {
        &self.package
    }

    /// Whether `java_type` needs an import statement to be written by simple name
    #[must_use]
    pub fn is_addition_to_import_required(&self, java_type: &JavaType) -> bool {
        if java_type.data_type() != DataType::Type || java_type.is_default_package() {
            return false;
        }
        if self
            .unit_type
            .as_ref()
            .is_some_and(|unit| unit.fully_qualified_type_name() == java_type.fully_qualified_type_name())
        {
            return false;
        }
        let top_level = java_type.enclosing_type().is_none();
        let package = java_type.package();
        !(top_level && (package.is_java_lang() || package == self.package))
    }

    /// Register `java_type` (and its type parameters) as imported
    pub fn add_import(&mut self, java_type: &JavaType) {
        let _ = self.name_of(java_type);
    }

    /// Source name for `java_type`, registering imports as needed
    pub fn name_of(&mut self, java_type: &JavaType) -> String {
        let mut name = match java_type.data_type() {
            DataType::Primitive => java_type
                .keyword()
                .unwrap_or_else(|| java_type.simple_type_name())
                .to_string(),
            DataType::Variable => java_type.fully_qualified_type_name().to_string(),
            DataType::Type => self.base_name(java_type),
        };
        if !java_type.parameters().is_empty() {
            let params: Vec<String> = java_type
                .parameters()
                .iter()
                .map(|p| self.name_of(p))
                .collect();
            name.push('<');
            name.push_str(&params.join(", "));
            name.push('>');
        }
        for _ in 0..java_type.array_dimensions() {
            name.push_str("[]");
        }
        name
    }

    fn base_name(&mut self, java_type: &JavaType) -> String {
        let fqn = java_type.fully_qualified_type_name();
        let simple = java_type.simple_type_name();

        if let Some(owner) = self.simple_names.get(simple) {
            return if owner == fqn {
                simple.to_string()
            } else {
                fqn.to_string()
            };
        }

        self.simple_names.insert(simple.to_string(), fqn.to_string());
        if self.is_addition_to_import_required(java_type) {
            self.imports
                .insert(fqn.to_string(), java_type.base_type());
        }
        simple.to_string()
    }

    #[must_use]
    pub fn is_imported(&self, java_type: &JavaType) -> bool {
        self.imports.contains_key(java_type.fully_qualified_type_name())
    }

    /// Registered imports sorted by fully-qualified name
    #[must_use]
    pub fn imports(&self) -> Vec<JavaType> {
        self.imports.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itd_model::well_known;

    fn resolver() -> ImportRegistrationResolver {
        ImportRegistrationResolver::for_type(&JavaType::new("com.foo.PersonDataOnDemand"))
    }

    #[test]
    fn java_lang_and_primitives_are_not_imported() {
        let mut r = resolver();
        assert_eq!(r.name_of(&well_known::STRING), "String");
        assert_eq!(r.name_of(&well_known::INT_PRIMITIVE), "int");
        assert!(r.imports().is_empty());
    }

    #[test]
    fn same_package_is_not_imported() {
        let mut r = resolver();
        assert_eq!(r.name_of(&JavaType::new("com.foo.Person")), "Person");
        assert!(r.imports().is_empty());
    }

    #[test]
    fn generic_parameters_are_imported() {
        let mut r = resolver();
        let ty = well_known::list_of(&JavaType::new("com.bar.Order"));
        assert_eq!(r.name_of(&ty), "List<Order>");
        let imports: Vec<String> = r.imports().iter().map(ToString::to_string).collect();
        assert_eq!(imports, vec!["com.bar.Order", "java.util.List"]);
    }

    #[test]
    fn clashing_simple_name_is_fully_qualified() {
        let mut r = resolver();
        assert_eq!(r.name_of(&well_known::DATE), "Date");
        assert_eq!(r.name_of(&JavaType::new("java.sql.Date")), "java.sql.Date");
        assert_eq!(r.imports(), vec![well_known::DATE.clone()]);
    }

    #[test]
    fn unit_type_claims_its_simple_name() {
        let mut r = resolver();
        assert_eq!(
            r.name_of(&JavaType::new("com.other.PersonDataOnDemand")),
            "com.other.PersonDataOnDemand"
        );
        assert_eq!(r.name_of(&JavaType::new("com.foo.PersonDataOnDemand")), "PersonDataOnDemand");
    }

    #[test]
    fn nested_type_in_same_package_is_imported() {
        let mut r = resolver();
        let nested = JavaType::new("com.foo.Order.LineId");
        assert_eq!(r.name_of(&nested), "LineId");
        assert!(r.is_imported(&nested));
    }

    #[test]
    fn arrays_keep_dimensions() {
        let mut r = resolver();
        assert_eq!(r.name_of(&well_known::BYTE_ARRAY_PRIMITIVE), "byte[]");
        assert_eq!(r.name_of(&well_known::STRING_ARRAY), "String[]");
    }
}
