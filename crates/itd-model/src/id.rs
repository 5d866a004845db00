//! Logical type and metadata identifiers
//!
//! A [`MetadataId`] names either every computation of one kind
//! (class-level, `MID:dod`) or one concrete computation for a type
//! (instance-level, `MID:dod#SRC_MAIN_JAVA?com.foo.PersonDataOnDemand`).

use crate::error::IdError;
use crate::java_type::JavaType;
use crate::logical_path::LogicalPath;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

const PREFIX: &str = "MID:";
const INSTANCE_SEPARATOR: char = '#';
const TYPE_SEPARATOR: char = '?';

/// A type within a module source root
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalTypeId {
    path: LogicalPath,
    java_type: JavaType,
}

impl LogicalTypeId {
    #[inline]
    #[must_use]
    pub fn new(path: LogicalPath, java_type: JavaType) -> Self {
        Self { path, java_type }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &LogicalPath {
        &self.path
    }

    #[inline]
    #[must_use]
    pub fn java_type(&self) -> &JavaType {
        &self.java_type
    }

    /// Source file location relative to the project root
    #[must_use]
    pub fn source_file(&self) -> String {
        let base = self.path.relative_dir();
        let file = format!(
            "{}.java",
            self.java_type.fully_qualified_type_name().replace('.', "/")
        );
        if base.is_empty() {
            file
        } else {
            format!("{base}/{file}")
        }
    }
}

impl Display for LogicalTypeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{TYPE_SEPARATOR}{}",
            self.path,
            self.java_type.fully_qualified_type_name()
        )
    }
}

impl FromStr for LogicalTypeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, ty) = s
            .split_once(TYPE_SEPARATOR)
            .ok_or_else(|| IdError::malformed(s, "expected '<path>?<type>'"))?;
        let java_type: JavaType = ty.parse()?;
        if java_type.is_array() || !java_type.parameters().is_empty() {
            return Err(IdError::malformed(s, "type must be a plain class name"));
        }
        Ok(Self::new(path.parse()?, java_type))
    }
}

/// Kind tag of a metadata computation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetadataKind {
    /// Parsed user type
    PhysicalType,
    /// Sample-data (data on demand) companion
    DataOnDemand,
    /// Embeddable identifier wrapper
    Identifier,
    /// Property editor
    Editor,
    /// Web scaffold controller
    WebScaffold,
    /// Plural names for a type and its fields
    Plural,
    /// Any other registered kind
    Other(String),
}

impl MetadataKind {
    /// Stable string tag
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::PhysicalType => "physical-type",
            Self::DataOnDemand => "dod",
            Self::Identifier => "identifier",
            Self::Editor => "editor",
            Self::WebScaffold => "web-scaffold",
            Self::Plural => "plural",
            Self::Other(tag) => tag,
        }
    }

    fn from_tag(tag: &str) -> Self {
        match tag {
            "physical-type" => Self::PhysicalType,
            "dod" => Self::DataOnDemand,
            "identifier" => Self::Identifier,
            "editor" => Self::Editor,
            "web-scaffold" => Self::WebScaffold,
            "plural" => Self::Plural,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Display for MetadataKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Identifier of one computed artifact, or of all artifacts of a kind
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetadataId {
    kind: MetadataKind,
    instance: Option<LogicalTypeId>,
}

impl MetadataId {
    /// Class-level id covering every instance of `kind`
    #[inline]
    #[must_use]
    pub fn class_level(kind: MetadataKind) -> Self {
        Self {
            kind,
            instance: None,
        }
    }

    /// Instance-level id for one type
    #[inline]
    #[must_use]
    pub fn instance(kind: MetadataKind, type_id: LogicalTypeId) -> Self {
        Self {
            kind,
            instance: Some(type_id),
        }
    }

    /// Instance-level id from its parts
    #[must_use]
    pub fn for_type(kind: MetadataKind, path: LogicalPath, java_type: JavaType) -> Self {
        Self::instance(kind, LogicalTypeId::new(path, java_type))
    }

    /// Parse the canonical string form
    ///
    /// # Errors
    /// Returns [`IdError`] when the prefix, kind or instance key is malformed
    pub fn parse(s: &str) -> Result<Self, IdError> {
        let body = s
            .strip_prefix(PREFIX)
            .ok_or_else(|| IdError::MissingPrefix(s.to_string()))?;
        let (kind, instance) = match body.split_once(INSTANCE_SEPARATOR) {
            Some((kind, instance)) => (kind, Some(instance)),
            None => (body, None),
        };
        if kind.is_empty() {
            return Err(IdError::EmptyKind(s.to_string()));
        }
        let instance = match instance {
            Some(key) => Some(
                key.parse::<LogicalTypeId>()
                    .map_err(|e| IdError::malformed(s, e.to_string()))?,
            ),
            None => None,
        };
        Ok(Self {
            kind: MetadataKind::from_tag(kind),
            instance,
        })
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> &MetadataKind {
        &self.kind
    }

    #[inline]
    #[must_use]
    pub fn is_class_level(&self) -> bool {
        self.instance.is_none()
    }

    #[inline]
    #[must_use]
    pub fn is_instance_level(&self) -> bool {
        self.instance.is_some()
    }

    /// Type this instance is computed for
    #[inline]
    #[must_use]
    pub fn logical_type(&self) -> Option<&LogicalTypeId> {
        self.instance.as_ref()
    }

    #[must_use]
    pub fn java_type(&self) -> Option<&JavaType> {
        self.instance.as_ref().map(LogicalTypeId::java_type)
    }

    #[must_use]
    pub fn path(&self) -> Option<&LogicalPath> {
        self.instance.as_ref().map(LogicalTypeId::path)
    }

    /// Class-level id of the same kind
    #[must_use]
    pub fn to_class_level(&self) -> Self {
        Self::class_level(self.kind.clone())
    }

    /// Same instance under another kind
    #[must_use]
    pub fn with_kind(&self, kind: MetadataKind) -> Self {
        Self {
            kind,
            instance: self.instance.clone(),
        }
    }
}

impl Display for MetadataId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.kind)?;
        if let Some(instance) = &self.instance {
            write!(f, "{INSTANCE_SEPARATOR}{instance}")?;
        }
        Ok(())
    }
}

impl FromStr for MetadataId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for MetadataId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for MetadataId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
