//! ITD Round-Trip
//!
//! File writes for generated artifacts: a file manager with deferred
//! writes, and an XML writer that merges regenerated documents into their
//! persisted copies while keeping hand edits.
//!
//! # Core Concepts
//!
//! - [`FileStore`]: Synchronous storage ([`DiskFileStore`], [`MemoryFileStore`])
//! - [`FileManager`]: Immediate or deferred writes with `commit`/`clear`
//! - [`xml`]: Element tree, `z` hashes and [`compare_and_merge`](xml::compare_and_merge)
//! - [`XmlRoundTripFileManager`]: Fingerprint short-circuit, then merge and write
//!
//! # Example
//!
//! ```rust,ignore
//! use itd_roundtrip::{FileManager, MemoryFileStore, XmlRoundTripFileManager};
//!
//! let files = Arc::new(FileManager::new(Arc::new(MemoryFileStore::new())));
//! let xml = XmlRoundTripFileManager::new(files);
//! assert!(xml.write_to_disk_if_necessary(path, &proposed)?);
//! assert!(!xml.write_to_disk_if_necessary(path, &proposed)?);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod file_manager;
mod fingerprint;
mod hash;
mod manager;
mod store;

/// XML element tree, parsing, rendering and merge
pub mod xml;

pub use error::{Result, RoundTripError};
pub use file_manager::FileManager;
pub use fingerprint::{Fingerprint, FingerprintCache, FingerprintPolicy};
pub use hash::ContentHash;
pub use manager::XmlRoundTripFileManager;
pub use store::{DiskFileStore, FileStore, MemoryFileStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
