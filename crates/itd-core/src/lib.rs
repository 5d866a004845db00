//! ITD Engine Core
//!
//! Binds the model, builders, dependency graph, providers and round-trip
//! file handling into one explicitly constructed [`EngineContext`].
//!
//! # Core Concepts
//!
//! - [`EngineConfig`]: Defaults plus TOML overrides
//! - [`MetadataService`]: Cached computation; `notify` evicts, recomputes
//!   and fans out to dependents under a depth and cycle guard
//! - [`ItdWriter`]: Writes each valid introduction unit beside its governor
//!   and removes units that became invalid
//! - [`TypeManagementService`]: Incremental edits to user compilation units
//!
//! # Example
//!
//! ```rust,ignore
//! use itd_core::{EngineConfig, EngineContext};
//! use itd_roundtrip::DiskFileStore;
//!
//! itd_core::init_tracing();
//! let ctx = EngineContext::new(EngineConfig::from_toml_str(&text)?, Arc::new(DiskFileStore::new(root)))?;
//! ctx.register_provider(Arc::new(EditorProvider::new(table)));
//! ctx.get(&editor_id)?;
//! ctx.update_type(&changed_editor)?;
//! ctx.commit()?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod config;
mod context;
mod error;
mod service;
mod telemetry;
mod types;
mod writer;

pub use config::EngineConfig;
pub use context::EngineContext;
pub use error::{EngineError, Result};
pub use service::{ComputeListener, MetadataService};
pub use telemetry::{init_json_tracing, init_tracing};
pub use types::TypeManagementService;
pub use writer::{unit_path, ItdWriter};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use itd_builder::TypeDetailsBuilder;
    use itd_builder::{FieldMetadataBuilder, Modifier, PhysicalTypeCategory};
    use itd_model::{well_known, JavaSymbolName, JavaType, LogicalPath, MetadataId, MetadataKind, PathKind};
    use itd_providers::{EditorInput, EditorProvider, InputTable, MemberTypeAdditions};
    use itd_roundtrip::{FileStore, MemoryFileStore};
    use std::path::Path;
    use std::sync::Arc;

    const UNIT: &str = "src/main/java/com/foo/web/PersonEditor_Roo_Editor.aj";

    fn editor_id() -> MetadataId {
        MetadataId::for_type(
            MetadataKind::Editor,
            LogicalPath::root_module(PathKind::SrcMainJava),
            JavaType::new("com.foo.web.PersonEditor"),
        )
    }

    fn governor(with_converter: bool) -> itd_builder::ClassOrInterfaceTypeDetails {
        let physical = editor_id().with_kind(MetadataKind::PhysicalType);
        let mut b = TypeDetailsBuilder::new(
            &physical,
            Modifier::PUBLIC,
            JavaType::new("com.foo.web.PersonEditor"),
            PhysicalTypeCategory::Class,
        );
        if with_converter {
            b.add_field(FieldMetadataBuilder::new(
                &physical,
                Modifier::PRIVATE,
                JavaSymbolName::new("typeConverter"),
                well_known::SIMPLE_TYPE_CONVERTER.clone(),
            ))
            .unwrap();
        }
        b.build().unwrap()
    }

    fn input(with_converter: bool) -> EditorInput {
        EditorInput {
            governor: governor(with_converter),
            entity: JavaType::new("com.foo.domain.Person"),
            identifier_type: well_known::LONG_OBJECT.clone(),
            identifier_accessor: JavaSymbolName::new("getId"),
            find: Some(MemberTypeAdditions::new("findPerson", "Person.findPerson(identifier)")),
            upstream: Vec::new(),
        }
    }

    #[test]
    fn governor_change_regenerates_the_unit() {
        let store = Arc::new(MemoryFileStore::new());
        let config = EngineConfig::default().with_immediate_writes(true);
        let ctx = EngineContext::new(config, Arc::clone(&store) as Arc<dyn FileStore>).unwrap();

        let table = Arc::new(InputTable::new());
        table.insert(editor_id(), input(false));
        let resolver = Arc::clone(&table);
        ctx.register_provider(Arc::new(EditorProvider::new(move |id: &MetadataId| resolver.get(id))));

        assert!(ctx.get(&editor_id()).unwrap().unwrap().is_valid());
        let first = store.contents(Path::new(UNIT)).unwrap();
        assert!(first.contains("private SimpleTypeConverter PersonEditor.typeConverter"));

        // the user now declares the converter field themselves
        table.insert(editor_id(), input(true));
        assert_eq!(ctx.update_type(&governor(true)).unwrap(), 1);
        let second = store.contents(Path::new(UNIT)).unwrap();
        assert!(!second.contains("PersonEditor.typeConverter ="));
        assert!(second.contains("public void PersonEditor.setAsText(String text)"));
        assert!(store.contents(Path::new("src/main/java/com/foo/web/PersonEditor.java")).is_some());
    }
}
