//! ITD Metadata Providers
//!
//! Derivation engines that turn a governor's declared members plus
//! annotation-derived configuration into introduction units.
//!
//! # Core Concepts
//!
//! - [`MetadataProvider`]: One provider per [`itd_model::MetadataKind`];
//!   computes [`ProvidedMetadata`] for an instance-level id
//! - [`naming`]: Collision-free synthetic names (`rnd`, `rnd_`, ...) with
//!   reuse of donated private members
//! - [`CustomDataKeyDecorator`]: Tags members (`IDENTIFIER_FIELD`,
//!   `COLUMN_FIELD`, ...) so providers read facts instead of raw annotations
//! - [`OperationSet`]: Externally supplied persistence call fragments; a
//!   missing required operation makes a unit invalid rather than failing
//!
//! Bundled providers: sample data ([`DataOnDemandProvider`]), embeddable
//! identifiers ([`IdentifierProvider`]), property editors
//! ([`EditorProvider`]), web scaffold controllers ([`WebScaffoldProvider`])
//! and plurals ([`PluralProvider`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use itd_providers::{build_editor, EditorInput, MemberTypeAdditions};
//!
//! let input = EditorInput { governor, entity, identifier_type, identifier_accessor, find: Some(find), upstream: vec![] };
//! let unit = build_editor(&id, &input, 4)?;
//! println!("{}", unit.emit().unwrap_or_default());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod dod;
mod editor;
mod error;
mod identifier;
mod operations;
mod plural;
mod provider;
mod scaffold;

/// Synthetic member naming
pub mod naming;
/// Custom data matchers and decoration
pub mod tagging;

pub use dod::{
    build_data_on_demand, collaborator_field_name, collaborator_type, field_initializer, field_validation_body,
    located_fields, DataOnDemandInput, DataOnDemandProvider, EmbeddedIdentifier, EmbeddedValue, Initializer, ValidationBody,
    ValueTarget, DEFAULT_QUANTITY,
};
pub use editor::{build_editor, EditorInput, EditorProvider};
pub use error::{ProviderError, Result};
pub use identifier::{build_identifier, IdentifierAnnotationValues, IdentifierField, IdentifierInput, IdentifierProvider};
pub use operations::{MemberTypeAdditions, OperationKind, OperationSet};
pub use plural::{inflector_plural, PluralMetadata, PluralProvider};
pub use provider::{
    register_upstream, InputResolver, InputTable, ItdMetadata, MetadataProvider, ProvidedMetadata, ProviderContext,
    ProviderRegistry,
};
pub use scaffold::{
    build_web_scaffold, max_pages, DateTimeFormatDetails, DomainTypeDetails, PersistenceDetails,
    WebScaffoldAnnotationValues, WebScaffoldInput, WebScaffoldProvider,
};
pub use tagging::{persistence_matchers, CustomDataKeyDecorator, Matcher};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
