//! Generic XML node trees.
//!
//! Markup parts are held as an owned element tree ([`XmlDocument`],
//! [`Element`], [`Node`]) rather than as raw text, so callers can edit them
//! directly. [`parse`] builds a tree from text with `quick-xml`; [`serialize`]
//! turns a tree back into deterministic markup.

mod chars;
mod escape;
mod node;
mod parse;
mod write;

pub use chars::{MAX_DEPTH, is_xml_char, is_xml_chars, is_xml_name, is_xml_whitespace};
pub use escape::{escape_attr, escape_xml, resolve_entity, unescape_xml};
pub use node::{Declaration, Element, Node, XmlDocument};
pub use parse::parse;
pub use write::{WriteOptions, serialize};
