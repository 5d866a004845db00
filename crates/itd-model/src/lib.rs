//! ITD Identifier Model
//!
//! Value types that name everything the generation engine works with.
//!
//! # Core Concepts
//!
//! - [`JavaType`]: Fully-qualified, possibly generic or array, type reference
//! - [`JavaSymbolName`]: Validated field/method/parameter name
//! - [`LogicalPath`]: Source root inside a module (`core|SRC_MAIN_JAVA`)
//! - [`LogicalTypeId`]: A type within a logical path
//! - [`MetadataId`]: Class-level (`MID:dod`) or instance-level
//!   (`MID:dod#SRC_MAIN_JAVA?com.foo.PersonDataOnDemand`) computation id
//!
//! # Example
//!
//! ```rust,ignore
//! use itd_model::{JavaType, LogicalPath, MetadataId, MetadataKind, PathKind};
//!
//! let id = MetadataId::for_type(
//!     MetadataKind::DataOnDemand,
//!     LogicalPath::root_module(PathKind::SrcTestJava),
//!     JavaType::new("com.foo.PersonDataOnDemand"),
//! );
//! assert_eq!(id.to_string(), "MID:dod#SRC_TEST_JAVA?com.foo.PersonDataOnDemand");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod id;
mod java_type;
mod logical_path;

/// Frequently referenced types
pub mod well_known;

pub use error::{IdError, Result};
pub use id::{LogicalTypeId, MetadataId, MetadataKind};
pub use java_type::{capitalize, uncapitalize, DataType, JavaPackage, JavaSymbolName, JavaType};
pub use logical_path::{LogicalPath, PathKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn metadata_id_for_nested_generic_free_type() {
        let ty: JavaType = "com.foo.Order.LineId".parse().unwrap();
        let id = MetadataId::for_type(
            MetadataKind::Identifier,
            LogicalPath::root_module(PathKind::SrcMainJava),
            ty.clone(),
        );
        let parsed: MetadataId = id.to_string().parse().unwrap();
        assert_eq!(parsed.java_type(), Some(&ty));
        assert_eq!(
            parsed.java_type().and_then(JavaType::enclosing_type),
            Some(JavaType::new("com.foo.Order"))
        );
    }

    #[test]
    fn with_kind_keeps_instance() {
        let id = MetadataId::for_type(
            MetadataKind::PhysicalType,
            LogicalPath::root_module(PathKind::SrcMainJava),
            JavaType::new("com.foo.Person"),
        );
        let editor = id.with_kind(MetadataKind::Editor);
        assert_eq!(editor.logical_type(), id.logical_type());
        assert_eq!(editor.kind(), &MetadataKind::Editor);
    }
}
