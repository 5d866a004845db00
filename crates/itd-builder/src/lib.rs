//! ITD Structural Model
//!
//! Mutable builders for fields, methods, constructors, annotations and whole
//! types, their immutable snapshots, and emission back to source text.
//!
//! # Core Concepts
//!
//! - [`TypeDetailsBuilder`]: Owns every member builder of one type; `build()`
//!   yields a [`ClassOrInterfaceTypeDetails`] snapshot
//! - [`ItdTypeDetailsBuilder`]: Introduction unit for a governor type; skips
//!   members the governor already declares
//! - [`ImportRegistrationResolver`]: Simple vs. fully-qualified naming and
//!   import bookkeeping for one unit
//! - [`emit`]: Compilation unit and introduction unit text
//!
//! # Example
//!
//! ```rust,ignore
//! use itd_builder::{emit, FieldMetadataBuilder, ItdTypeDetails, ItdTypeDetailsBuilder, Modifier};
//!
//! let mut itd = ItdTypeDetailsBuilder::new(&id, &governor, ItdTypeDetails::aspect_name(governor.name(), "DataOnDemand"), true);
//! itd.add_field(FieldMetadataBuilder::new(&id, Modifier::PRIVATE, rnd, well_known::RANDOM.clone()));
//! let text = emit::emit_introduction_unit(&itd.build()?);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod annotation;
mod body;
mod custom_data;
mod error;
mod field;
mod imports;
mod itd;
mod member_details;
mod method;
mod modifier;
mod type_details;

/// Source emission
pub mod emit;

pub use annotation::{
    find_annotation, AnnotationAttribute, AnnotationMetadata, AnnotationMetadataBuilder,
    AnnotationValue, EnumConstant,
};
pub use body::InvocableMemberBodyBuilder;
pub use custom_data::CustomData;
pub use error::{BuilderError, Result};
pub use field::{FieldMetadata, FieldMetadataBuilder};
pub use imports::ImportRegistrationResolver;
pub use itd::{ItdTypeDetails, ItdTypeDetailsBuilder};
pub use member_details::MemberDetails;
pub use method::{
    ConstructorMetadata, ConstructorMetadataBuilder, InitializerMetadata,
    InitializerMetadataBuilder, MethodMetadata, MethodMetadataBuilder, MethodParameter,
};
pub use modifier::Modifier;
pub use type_details::{ClassOrInterfaceTypeDetails, PhysicalTypeCategory, TypeDetailsBuilder};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
