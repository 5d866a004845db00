//! ITD Dependency Graph
//!
//! Which metadata instances must be recomputed when another one changes.
//!
//! # Core Concepts
//!
//! - [`DependencyRegistry`]: Upstream → downstream edges between
//!   [`MetadataId`](itd_model::MetadataId)s, rejecting self edges and cycles
//! - [`NotificationListener`]: Observer told about every handled notification
//!
//! # Example
//!
//! ```rust,ignore
//! use itd_graph::DependencyRegistry;
//!
//! let registry = DependencyRegistry::new();
//! registry.register_dependency(&physical_type_id, &dod_id)?;
//! assert_eq!(registry.downstream(&physical_type_id), vec![dod_id]);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod listener;
mod registry;

pub use error::{GraphError, Result};
pub use listener::NotificationListener;
pub use registry::DependencyRegistry;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
