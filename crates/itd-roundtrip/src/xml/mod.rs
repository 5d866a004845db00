//! XML documents that survive regeneration
//!
//! Generated elements carry a `z` attribute holding a hash of what was
//! generated. On the next pass an element whose `z` still matches may be
//! replaced; one whose `z` was edited, or set to `user-managed`, is left
//! alone.

mod merge;
mod node;
mod parse;
mod render;

pub use merge::compare_and_merge;
pub use node::{NodeState, XmlDocument, XmlElement, XmlNode, UNHASHED, USER_MANAGED, Z_ATTRIBUTE};
pub use parse::parse_document;
pub use render::{render_document, render_element, XML_DECLARATION};
