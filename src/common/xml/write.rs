//! Tree → text.
//!
//! Output is built by hand into a `String` (no event writer in between), which
//! keeps it byte-for-byte deterministic for a given tree.
use super::chars::{MAX_DEPTH, is_xml_chars, is_xml_name};
use super::escape::{escape_attr, escape_xml};
use super::node::{Declaration, Element, Node, XmlDocument};
use crate::common::{Error, Result};

/// Formatting options for [`serialize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Indent element-only content with two spaces per level.
    ///
    /// Package parts are always written compact; pretty output is meant for
    /// humans and only round-trips trees without mixed content.
    pub pretty: bool,
}

impl WriteOptions {
    /// Compact output, no whitespace added.
    pub const COMPACT: WriteOptions = WriteOptions { pretty: false };
    /// Indented output.
    pub const PRETTY: WriteOptions = WriteOptions { pretty: true };
}

/// Serialize a document to markup text.
///
/// Fails when the tree holds something XML cannot represent: an invalid
/// element or attribute name, a character outside the XML 1.0 character
/// range, a malformed declaration, or elements nested deeper than
/// [`MAX_DEPTH`].
///
/// Text layout is not significant in the tree model. Reading the output back
/// with [`parse`](super::parse) yields the
/// [normalized](XmlDocument::normalize) form of `doc`, which is `doc` itself
/// for any tree that came out of `parse`.
///
/// # Examples
///
/// ```
/// use pptx_parts::common::xml::{Element, WriteOptions, XmlDocument, serialize};
///
/// let doc = XmlDocument {
///     declaration: None,
///     root: Element::new("a:t").with_text("Tom & Jerry"),
/// };
/// assert_eq!(serialize(&doc, WriteOptions::COMPACT)?, "<a:t>Tom &amp; Jerry</a:t>");
/// # Ok::<(), pptx_parts::Error>(())
/// ```
pub fn serialize(doc: &XmlDocument, options: WriteOptions) -> Result<String> {
    let mut out = String::with_capacity(4096);

    if let Some(decl) = &doc.declaration {
        write_declaration(&mut out, decl)?;
        if options.pretty {
            out.push('\n');
        }
    }
    write_element(&mut out, &doc.root, options, 0)?;

    Ok(out)
}

fn write_declaration(out: &mut String, decl: &Declaration) -> Result<()> {
    let valid_version = decl
        .version
        .split_once('.')
        .is_some_and(|(major, minor)| is_digits(major) && is_digits(minor));
    if !valid_version {
        return Err(Error::Xml(format!(
            "invalid XML version '{}'",
            decl.version
        )));
    }

    out.push_str(r#"<?xml version=""#);
    out.push_str(&decl.version);
    out.push('"');

    if let Some(encoding) = &decl.encoding {
        let mut chars = encoding.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(Error::Xml(format!("invalid encoding name '{}'", encoding)));
        }
        out.push_str(r#" encoding=""#);
        out.push_str(encoding);
        out.push('"');
    }

    if let Some(standalone) = &decl.standalone {
        if standalone != "yes" && standalone != "no" {
            return Err(Error::Xml(format!(
                "standalone must be 'yes' or 'no', got '{}'",
                standalone
            )));
        }
        out.push_str(r#" standalone=""#);
        out.push_str(standalone);
        out.push('"');
    }

    out.push_str("?>");
    Ok(())
}

fn write_element(
    out: &mut String,
    element: &Element,
    options: WriteOptions,
    depth: usize,
) -> Result<()> {
    if depth >= MAX_DEPTH {
        return Err(Error::Xml(format!(
            "elements nested deeper than {} levels",
            MAX_DEPTH
        )));
    }
    check_name(&element.name)?;

    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        check_name(key)?;
        check_chars(value)?;
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return Ok(());
    }
    out.push('>');

    let indent =
        options.pretty && element.children.iter().all(|c| matches!(c, Node::Element(_)));
    for child in &element.children {
        if indent {
            out.push('\n');
            push_indent(out, depth + 1);
        }
        match child {
            Node::Element(e) => write_element(out, e, options, depth + 1)?,
            Node::Text(t) => {
                check_chars(t)?;
                out.push_str(&escape_xml(t));
            },
        }
    }
    if indent {
        out.push('\n');
        push_indent(out, depth);
    }

    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
    Ok(())
}

#[inline]
fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

#[inline]
fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn check_name(name: &str) -> Result<()> {
    if is_xml_name(name) {
        Ok(())
    } else {
        Err(Error::Xml(format!("invalid XML name {:?}", name)))
    }
}

fn check_chars(s: &str) -> Result<()> {
    if is_xml_chars(s) {
        Ok(())
    } else {
        Err(Error::Xml(format!(
            "character data contains characters not allowed in XML: {:?}",
            s
        )))
    }
}
