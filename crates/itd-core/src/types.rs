//! Edits to user-owned compilation units

use crate::error::{EngineError, Result};
use indexmap::IndexMap;
use itd_builder::emit::{emit_compilation_unit_with, EmitOptions};
use itd_builder::{ClassOrInterfaceTypeDetails, FieldMetadataBuilder, TypeDetailsBuilder};
use itd_model::{JavaSymbolName, JavaType, MetadataId};
use itd_roundtrip::FileManager;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Keeps the known user types and writes them back as `.java` files
///
/// Incremental edits (`add_field`, `add_enum_constant`) start from the last
/// details written through this service, so callers never re-emit a type
/// from scratch.
#[derive(Debug)]
pub struct TypeManagementService {
    files: Arc<FileManager>,
    immediate: bool,
    options: EmitOptions,
    types: RwLock<IndexMap<JavaType, ClassOrInterfaceTypeDetails>>,
}

impl TypeManagementService {
    #[must_use]
    pub fn new(files: Arc<FileManager>) -> Self {
        Self {
            files,
            immediate: false,
            options: EmitOptions::default(),
            types: RwLock::new(IndexMap::new()),
        }
    }

    #[must_use]
    pub fn with_immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.options = self.options.with_indent_width(width);
        self
    }

    /// Last details recorded for `java_type`
    #[must_use]
    pub fn type_details(&self, java_type: &JavaType) -> Option<ClassOrInterfaceTypeDetails> {
        self.types.read().get(java_type).cloned()
    }

    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.read().len()
    }

    /// Emit `details` to its source file and remember them
    ///
    /// Returns whether the store was written now.
    ///
    /// # Errors
    /// [`EngineError::UnknownType`] when the declaring id names no type;
    /// file store failures otherwise
    pub fn create_or_update_type_on_disk(&self, details: &ClassOrInterfaceTypeDetails) -> Result<bool> {
        let path = Self::source_path(details.declared_by())?;
        let text = emit_compilation_unit_with(details, self.options);
        let description = details.name().simple_type_name().to_string();
        let written = self
            .files
            .create_or_update_text_file_if_required(&path, &text, &description, self.immediate)?;
        if written {
            info!(path = %path.display(), "compilation unit written");
        } else {
            debug!(path = %path.display(), immediate = self.immediate, "compilation unit unchanged or queued");
        }
        self.types.write().insert(details.name().clone(), details.clone());
        Ok(written)
    }

    /// Add a field to the type named by the field's declaring id
    ///
    /// # Errors
    /// [`EngineError::UnknownType`] for a type never written here,
    /// [`EngineError::Builder`] when the field name is taken
    pub fn add_field(&self, field: FieldMetadataBuilder) -> Result<ClassOrInterfaceTypeDetails> {
        let owner = field
            .declared_by()
            .java_type()
            .cloned()
            .ok_or_else(|| EngineError::UnknownType(field.declared_by().to_string()))?;
        self.edit(&owner, |builder| Ok(builder.add_field(field)?))
    }

    /// Append an enum constant to `java_type`
    ///
    /// # Errors
    /// [`EngineError::UnknownType`] for a type never written here,
    /// [`EngineError::Builder`] for a non-enum type or a duplicate constant
    pub fn add_enum_constant(&self, java_type: &JavaType, name: JavaSymbolName) -> Result<ClassOrInterfaceTypeDetails> {
        self.edit(java_type, |builder| Ok(builder.add_enum_constant(name)?))
    }

    fn edit<F>(&self, java_type: &JavaType, change: F) -> Result<ClassOrInterfaceTypeDetails>
    where
        F: FnOnce(&mut TypeDetailsBuilder) -> Result<()>,
    {
        let existing = self
            .type_details(java_type)
            .ok_or_else(|| EngineError::UnknownType(java_type.fully_qualified_type_name().to_string()))?;
        let mut builder = TypeDetailsBuilder::from_existing(&existing);
        change(&mut builder)?;
        let updated = builder.build()?;
        self.create_or_update_type_on_disk(&updated)?;
        Ok(updated)
    }

    fn source_path(declared_by: &MetadataId) -> Result<PathBuf> {
        declared_by
            .logical_type()
            .map(|ty| PathBuf::from(ty.source_file()))
            .ok_or_else(|| EngineError::UnknownType(declared_by.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itd_builder::{Modifier, PhysicalTypeCategory};
    use itd_model::{well_known, LogicalPath, MetadataKind, PathKind};
    use itd_roundtrip::{FileStore, MemoryFileStore};
    use std::path::Path;

    fn physical(fqn: &str) -> MetadataId {
        MetadataId::for_type(
            MetadataKind::PhysicalType,
            LogicalPath::root_module(PathKind::SrcMainJava),
            JavaType::new(fqn),
        )
    }

    fn service() -> (Arc<MemoryFileStore>, TypeManagementService) {
        let store = Arc::new(MemoryFileStore::new());
        let files = Arc::new(FileManager::new(Arc::clone(&store) as Arc<dyn FileStore>));
        (store, TypeManagementService::new(files).with_immediate(true))
    }

    fn class(fqn: &str) -> ClassOrInterfaceTypeDetails {
        TypeDetailsBuilder::new(&physical(fqn), Modifier::PUBLIC, JavaType::new(fqn), PhysicalTypeCategory::Class)
            .build()
            .unwrap()
    }

    #[test]
    fn type_is_written_to_its_source_file() {
        let (store, types) = service();
        assert!(types.create_or_update_type_on_disk(&class("com.foo.Person")).unwrap());
        assert!(!types.create_or_update_type_on_disk(&class("com.foo.Person")).unwrap());
        let text = store.contents(Path::new("src/main/java/com/foo/Person.java")).unwrap();
        assert!(text.starts_with("package com.foo;"));
        assert!(text.contains("public class Person {"));
        assert_eq!(types.type_count(), 1);
    }

    #[test]
    fn field_is_added_to_the_recorded_type() {
        let (store, types) = service();
        types.create_or_update_type_on_disk(&class("com.foo.Person")).unwrap();
        let field = FieldMetadataBuilder::new(
            &physical("com.foo.Person"),
            Modifier::PRIVATE,
            JavaSymbolName::new("name"),
            well_known::STRING.clone(),
        );
        let updated = types.add_field(field.clone()).unwrap();
        assert!(updated.declared_field(&JavaSymbolName::new("name")).is_some());
        let text = store.contents(Path::new("src/main/java/com/foo/Person.java")).unwrap();
        assert!(text.contains("private String name;"));
        assert!(matches!(types.add_field(field), Err(EngineError::Builder(_))));
    }

    #[test]
    fn enum_constants_append_in_order() {
        let (_, types) = service();
        let colour = TypeDetailsBuilder::new(
            &physical("com.foo.Colour"),
            Modifier::PUBLIC,
            JavaType::new("com.foo.Colour"),
            PhysicalTypeCategory::Enumeration,
        )
        .build()
        .unwrap();
        types.create_or_update_type_on_disk(&colour).unwrap();
        types.add_enum_constant(colour.name(), JavaSymbolName::new("RED")).unwrap();
        let updated = types.add_enum_constant(colour.name(), JavaSymbolName::new("GREEN")).unwrap();
        let names: Vec<_> = updated.enum_constants().iter().map(JavaSymbolName::symbol_name).collect();
        assert_eq!(names, ["RED", "GREEN"]);
    }

    #[test]
    fn unknown_types_are_rejected() {
        let (_, types) = service();
        let err = types
            .add_enum_constant(&JavaType::new("com.foo.Missing"), JavaSymbolName::new("A"))
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownType(name) if name == "com.foo.Missing"));
    }
}
