//! Java-level names: packages, symbols and types
//!
//! Provides [`JavaPackage`], [`JavaSymbolName`] and [`JavaType`], the value
//! types every builder and provider uses to talk about the generated code.

use crate::error::IdError;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

const RESERVED_WORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Primitive keyword to boxed type name
const PRIMITIVES: &[(&str, &str)] = &[
    ("boolean", "java.lang.Boolean"),
    ("byte", "java.lang.Byte"),
    ("char", "java.lang.Character"),
    ("double", "java.lang.Double"),
    ("float", "java.lang.Float"),
    ("int", "java.lang.Integer"),
    ("long", "java.lang.Long"),
    ("short", "java.lang.Short"),
    ("void", "java.lang.Void"),
];

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn starts_uppercase(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

/// A dotted package name; the empty string is the default package
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JavaPackage(String);

impl JavaPackage {
    /// Create package from dotted name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The default (unnamed) package
    #[inline]
    #[must_use]
    pub fn default_package() -> Self {
        Self(String::new())
    }

    #[inline]
    #[must_use]
    pub fn fully_qualified_package_name(&self) -> &str {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    /// True for `java.lang`, whose types never need an import
    #[inline]
    #[must_use]
    pub fn is_java_lang(&self) -> bool {
        self.0 == "java.lang"
    }

    /// Relative directory for this package (`com/foo`)
    #[must_use]
    pub fn relative_dir(&self) -> String {
        self.0.replace('.', "/")
    }
}

impl Display for JavaPackage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated Java identifier (field, method or parameter name)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JavaSymbolName(String);

impl JavaSymbolName {
    /// Create from a name known to be a valid identifier
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Parse and validate an identifier
    ///
    /// # Errors
    /// Returns [`IdError::InvalidSymbol`] if `name` is not a Java identifier
    pub fn parse(name: &str) -> Result<Self, IdError> {
        if is_identifier(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(IdError::InvalidSymbol(name.to_string()))
        }
    }

    /// Field-style name for a type: `PersonDataOnDemand` → `personDataOnDemand`
    ///
    /// Reserved words get a leading underscore.
    #[must_use]
    pub fn for_type(java_type: &JavaType) -> Self {
        let name = uncapitalize(java_type.simple_type_name());
        if RESERVED_WORDS.contains(&name.as_str()) {
            Self(format!("_{name}"))
        } else {
            Self(name)
        }
    }

    #[inline]
    #[must_use]
    pub fn symbol_name(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn capitalised(&self) -> String {
        capitalize(&self.0)
    }

    #[must_use]
    pub fn uncapitalised(&self) -> String {
        uncapitalize(&self.0)
    }

    /// Human readable form: `firstName` → `First Name`
    #[must_use]
    pub fn readable_symbol_name(&self) -> String {
        let mut out = String::with_capacity(self.0.len() + 4);
        for (i, c) in self.0.chars().enumerate() {
            if i == 0 {
                out.extend(c.to_uppercase());
            } else {
                if c.is_uppercase() {
                    out.push(' ');
                }
                out.push(c);
            }
        }
        out
    }

    #[inline]
    #[must_use]
    pub fn is_reserved_word(&self) -> bool {
        RESERVED_WORDS.contains(&self.0.as_str())
    }
}

impl Display for JavaSymbolName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for JavaSymbolName {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Upper-case the first character
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character
#[must_use]
pub fn uncapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// How a [`JavaType`] is represented in source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DataType {
    /// Class, interface or enum reference
    #[default]
    Type,
    /// Primitive keyword; the name holds the boxed type (`int` → `java.lang.Integer`)
    Primitive,
    /// Generic type variable (`T`)
    Variable,
}

/// A (possibly generic, possibly array) Java type reference
///
/// Equality covers the name, array dimensions, data type and type
/// parameters, so `List<Person>` and `List<Order>` are different types.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JavaType {
    name: String,
    array: u8,
    data_type: DataType,
    parameters: Vec<JavaType>,
}

impl JavaType {
    /// Reference type from its fully-qualified name
    #[inline]
    #[must_use]
    pub fn new(fully_qualified_name: impl Into<String>) -> Self {
        Self {
            name: fully_qualified_name.into(),
            array: 0,
            data_type: DataType::Type,
            parameters: Vec::new(),
        }
    }

    /// Primitive type from its boxed name (`java.lang.Integer` → `int`)
    #[inline]
    #[must_use]
    pub fn primitive(boxed_name: impl Into<String>) -> Self {
        Self {
            data_type: DataType::Primitive,
            ..Self::new(boxed_name)
        }
    }

    /// Generic type variable
    #[inline]
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            data_type: DataType::Variable,
            ..Self::new(name)
        }
    }

    /// Same type with the given type parameters
    #[inline]
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<JavaType>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Same type with the given array dimensions
    #[inline]
    #[must_use]
    pub fn with_array(mut self, dimensions: u8) -> Self {
        self.array = dimensions;
        self
    }

    #[inline]
    #[must_use]
    pub fn fully_qualified_type_name(&self) -> &str {
        &self.name
    }

    /// Last segment of the name (`java.util.List` → `List`)
    #[must_use]
    pub fn simple_type_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    #[inline]
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    #[inline]
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        self.data_type == DataType::Primitive
    }

    #[inline]
    #[must_use]
    pub fn is_variable(&self) -> bool {
        self.data_type == DataType::Variable
    }

    #[inline]
    #[must_use]
    pub fn array_dimensions(&self) -> u8 {
        self.array
    }

    #[inline]
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.array > 0
    }

    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[JavaType] {
        &self.parameters
    }

    /// Primitive keyword for a primitive type
    #[must_use]
    pub fn keyword(&self) -> Option<&'static str> {
        if !self.is_primitive() {
            return None;
        }
        PRIMITIVES
            .iter()
            .find(|(_, boxed)| *boxed == self.name)
            .map(|(keyword, _)| *keyword)
    }

    /// Package: the segments before the first capitalised segment
    #[must_use]
    pub fn package(&self) -> JavaPackage {
        if self.is_primitive() || self.is_variable() {
            return JavaPackage::new("java.lang");
        }
        let segments: Vec<&str> = self.name.split('.').collect();
        let first_type = segments
            .iter()
            .position(|s| starts_uppercase(s))
            .unwrap_or(segments.len().saturating_sub(1));
        JavaPackage::new(segments[..first_type].join("."))
    }

    /// Enclosing type for a nested type (`com.foo.Outer.Inner` → `com.foo.Outer`)
    #[must_use]
    pub fn enclosing_type(&self) -> Option<JavaType> {
        if self.is_primitive() || self.is_variable() {
            return None;
        }
        let (outer, _) = self.name.rsplit_once('.')?;
        let last_outer = outer.rsplit('.').next().unwrap_or(outer);
        starts_uppercase(last_outer).then(|| JavaType::new(outer))
    }

    /// The raw type: no parameters, no array dimensions
    #[must_use]
    pub fn base_type(&self) -> JavaType {
        Self {
            name: self.name.clone(),
            array: 0,
            data_type: self.data_type,
            parameters: Vec::new(),
        }
    }

    /// The boxed reference type of a primitive
    #[must_use]
    pub fn boxed(&self) -> JavaType {
        if self.is_primitive() {
            Self {
                data_type: DataType::Type,
                ..self.clone()
            }
        } else {
            self.clone()
        }
    }

    #[inline]
    #[must_use]
    pub fn is_default_package(&self) -> bool {
        self.package().is_default()
    }

    /// `boolean` or `java.lang.Boolean`
    #[inline]
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        self.array == 0 && self.name == "java.lang.Boolean"
    }

    /// List, set, collection or map from `java.util`
    #[must_use]
    pub fn is_common_collection(&self) -> bool {
        matches!(
            self.name.as_str(),
            "java.util.Collection"
                | "java.util.List"
                | "java.util.ArrayList"
                | "java.util.Set"
                | "java.util.HashSet"
                | "java.util.SortedSet"
                | "java.util.TreeSet"
                | "java.util.Map"
                | "java.util.HashMap"
        )
    }

    fn write_source_name(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.keyword() {
            Some(keyword) => f.write_str(keyword)?,
            None => f.write_str(&self.name)?,
        }
        if !self.parameters.is_empty() {
            f.write_str("<")?;
            for (i, param) in self.parameters.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                param.write_source_name(f)?;
            }
            f.write_str(">")?;
        }
        for _ in 0..self.array {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl Display for JavaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_source_name(f)
    }
}

impl FromStr for JavaType {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s.trim();
        if rest.is_empty() {
            return Err(IdError::InvalidTypeName(s.to_string()));
        }

        let mut array = 0u8;
        while let Some(stripped) = rest.strip_suffix("[]") {
            rest = stripped.trim_end();
            array = array.saturating_add(1);
        }

        let (base, parameters) = match rest.find('<') {
            Some(open) => {
                let inner = rest[open + 1..]
                    .strip_suffix('>')
                    .ok_or_else(|| IdError::InvalidTypeName(s.to_string()))?;
                let params = split_top_level(inner)
                    .into_iter()
                    .map(str::parse)
                    .collect::<Result<Vec<JavaType>, _>>()?;
                (rest[..open].trim(), params)
            }
            None => (rest, Vec::new()),
        };

        if let Some((_, boxed)) = PRIMITIVES.iter().find(|(keyword, _)| *keyword == base) {
            return Ok(JavaType::primitive(*boxed).with_array(array));
        }

        if base.split('.').any(|segment| !is_identifier(segment)) {
            return Err(IdError::InvalidTypeName(s.to_string()));
        }

        Ok(JavaType::new(base)
            .with_parameters(parameters)
            .with_array(array))
    }
}

/// Split generic arguments on commas that are not nested in `<>`
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(s[start..].trim());
    parts
}
