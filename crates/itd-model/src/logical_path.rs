//! Module-scoped source paths
//!
//! A [`LogicalPath`] names a source root (`SRC_MAIN_JAVA`, ...) inside a
//! module. The root module is written without a module prefix.

use crate::error::IdError;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

const MODULE_SEPARATOR: char = '|';

/// Kind of source root
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PathKind {
    #[default]
    SrcMainJava,
    SrcTestJava,
    SrcMainResources,
    SrcTestResources,
    SrcMainWebapp,
    Root,
}

impl PathKind {
    /// Stable tag used in identifiers
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::SrcMainJava => "SRC_MAIN_JAVA",
            Self::SrcTestJava => "SRC_TEST_JAVA",
            Self::SrcMainResources => "SRC_MAIN_RESOURCES",
            Self::SrcTestResources => "SRC_TEST_RESOURCES",
            Self::SrcMainWebapp => "SRC_MAIN_WEBAPP",
            Self::Root => "ROOT",
        }
    }

    /// Directory relative to the module root
    #[must_use]
    pub const fn relative_dir(self) -> &'static str {
        match self {
            Self::SrcMainJava => "src/main/java",
            Self::SrcTestJava => "src/test/java",
            Self::SrcMainResources => "src/main/resources",
            Self::SrcTestResources => "src/test/resources",
            Self::SrcMainWebapp => "src/main/webapp",
            Self::Root => "",
        }
    }

    /// True for the two Java source roots
    #[inline]
    #[must_use]
    pub const fn is_java_source(self) -> bool {
        matches!(self, Self::SrcMainJava | Self::SrcTestJava)
    }
}

impl FromStr for PathKind {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "SRC_MAIN_JAVA" => Self::SrcMainJava,
            "SRC_TEST_JAVA" => Self::SrcTestJava,
            "SRC_MAIN_RESOURCES" => Self::SrcMainResources,
            "SRC_TEST_RESOURCES" => Self::SrcTestResources,
            "SRC_MAIN_WEBAPP" => Self::SrcMainWebapp,
            "ROOT" => Self::Root,
            other => return Err(IdError::UnknownPathKind(other.to_string())),
        })
    }
}

impl Display for PathKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A source root within a module
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LogicalPath {
    module: String,
    kind: PathKind,
}

impl LogicalPath {
    /// Path in a named module; an empty name is the root module
    #[inline]
    #[must_use]
    pub fn new(module: impl Into<String>, kind: PathKind) -> Self {
        Self {
            module: module.into(),
            kind,
        }
    }

    /// Path in the root module
    #[inline]
    #[must_use]
    pub fn root_module(kind: PathKind) -> Self {
        Self::new("", kind)
    }

    #[inline]
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> PathKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn is_root_module(&self) -> bool {
        self.module.is_empty()
    }

    /// Directory relative to the project root (`core/src/main/java`)
    #[must_use]
    pub fn relative_dir(&self) -> String {
        match (self.module.is_empty(), self.kind.relative_dir()) {
            (true, dir) => dir.to_string(),
            (false, "") => self.module.clone(),
            (false, dir) => format!("{}/{dir}", self.module),
        }
    }
}

impl Display for LogicalPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.module.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}{MODULE_SEPARATOR}{}", self.module, self.kind)
        }
    }
}

impl FromStr for LogicalPath {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(MODULE_SEPARATOR) {
            Some((module, kind)) => Ok(Self::new(module, kind.parse()?)),
            None => Ok(Self::root_module(s.parse()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_module_renders_without_prefix() {
        let path = LogicalPath::root_module(PathKind::SrcMainJava);
        assert_eq!(path.to_string(), "SRC_MAIN_JAVA");
        assert_eq!(path.relative_dir(), "src/main/java");
    }

    #[test]
    fn module_path_parse() {
        let path: LogicalPath = "core|SRC_TEST_JAVA".parse().unwrap();
        assert_eq!(path.module(), "core");
        assert_eq!(path.kind(), PathKind::SrcTestJava);
        assert_eq!(path.relative_dir(), "core/src/test/java");
        assert_eq!(path.to_string(), "core|SRC_TEST_JAVA");
    }

    #[test]
    fn unknown_kind_rejected() {
        assert!(matches!(
            "core|SRC_MAIN_KOTLIN".parse::<LogicalPath>(),
            Err(IdError::UnknownPathKind(_))
        ));
    }

    #[test]
    fn root_kind_has_module_dir() {
        assert_eq!(LogicalPath::new("web", PathKind::Root).relative_dir(), "web");
        assert!(!PathKind::Root.is_java_source());
    }
}
