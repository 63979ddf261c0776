//! Text → tree, on top of the `quick-xml` event reader.
use super::chars::{MAX_DEPTH, is_xml_chars, is_xml_name, is_xml_whitespace};
use super::escape::{resolve_entity, unescape_xml};
use super::node::{Declaration, Element, Node, XmlDocument};
use crate::common::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesDecl, BytesStart, Event};

/// Parse markup text into an [`XmlDocument`].
///
/// Comments, processing instructions and the DOCTYPE are dropped. CDATA
/// sections become ordinary text. Whitespace-only text is dropped from
/// elements that also contain child elements, and kept where it is the only
/// content (`<a:t> </a:t>`).
///
/// Only trees that [`serialize`](super::serialize) can write back are
/// accepted: element and attribute names must be XML names, text and
/// attribute values must consist of XML characters, and elements may nest at
/// most [`MAX_DEPTH`] levels deep.
///
/// # Examples
///
/// ```
/// use pptx_parts::common::xml::parse;
///
/// let doc = parse(r#"<p:sldId id="256" r:id="rId2"/>"#)?;
/// assert_eq!(doc.root.name, "p:sldId");
/// assert_eq!(doc.root.attr("r:id"), Some("rId2"));
/// # Ok::<(), pptx_parts::Error>(())
/// ```
pub fn parse(text: &str) -> Result<XmlDocument> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    let mut declaration = None;
    let mut root: Option<Element> = None;
    let mut stack: Vec<Element> = Vec::with_capacity(16);

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::Xml(format!("{} at byte {}", e, reader.error_position()))
        })?;

        match event {
            Event::Decl(ref d) => {
                declaration = Some(declaration_from(d)?);
            },
            Event::Start(ref e) => {
                if root.is_some() && stack.is_empty() {
                    return Err(Error::Xml("multiple root elements".to_string()));
                }
                check_depth(stack.len() + 1)?;
                stack.push(element_from(e)?);
            },
            Event::Empty(ref e) => {
                check_depth(stack.len() + 1)?;
                let element = element_from(e)?;
                attach(&mut stack, &mut root, element)?;
            },
            Event::End(ref e) => {
                let mut element = stack.pop().ok_or_else(|| {
                    Error::Xml(format!(
                        "unexpected end tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
                drop_layout_whitespace(&mut element);
                attach(&mut stack, &mut root, element)?;
            },
            Event::Text(ref e) => {
                let raw = std::str::from_utf8(e)?;
                let text = unescape_xml(raw).map_err(Error::Xml)?;
                check_chars(&text)?;
                push_text(&mut stack, &text)?;
            },
            Event::GeneralRef(ref e) => {
                let name = std::str::from_utf8(e)?;
                let ch = resolve_entity(name)
                    .ok_or_else(|| Error::Xml(format!("unknown reference '&{};'", name)))?;
                push_text(&mut stack, ch.encode_utf8(&mut [0u8; 4]))?;
            },
            Event::CData(e) => {
                let inner = e.into_inner();
                let text = std::str::from_utf8(&inner)?;
                check_chars(text)?;
                push_text(&mut stack, text)?;
            },
            Event::Eof => break,
            // Comments, processing instructions, DOCTYPE
            _ => {},
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Xml(format!("unclosed element <{}>", open.name)));
    }
    let root = root.ok_or_else(|| Error::Xml("document has no root element".to_string()))?;

    Ok(XmlDocument { declaration, root })
}

fn declaration_from(d: &BytesDecl<'_>) -> Result<Declaration> {
    let version = String::from_utf8(d.version()?.into_owned())?;
    let encoding = d
        .encoding()
        .transpose()?
        .map(|v| String::from_utf8(v.into_owned()))
        .transpose()?;
    let standalone = d
        .standalone()
        .transpose()?
        .map(|v| String::from_utf8(v.into_owned()))
        .transpose()?;
    Ok(Declaration {
        version,
        encoding,
        standalone,
    })
}

fn element_from(e: &BytesStart<'_>) -> Result<Element> {
    let qname = e.name();
    let name = std::str::from_utf8(qname.as_ref())?;
    check_name(name)?;
    let mut element = Element::new(name);

    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        check_name(key)?;
        // Same reference rules as character data
        let raw = std::str::from_utf8(&attr.value)?;
        let value = unescape_xml(raw).map_err(Error::Xml)?;
        check_chars(&value)?;
        element.attributes.insert(key.to_string(), value.into_owned());
    }

    Ok(element)
}

#[inline]
fn check_depth(depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(Error::Xml(format!(
            "elements nested deeper than {} levels",
            MAX_DEPTH
        )));
    }
    Ok(())
}

#[inline]
fn check_name(name: &str) -> Result<()> {
    if is_xml_name(name) {
        Ok(())
    } else {
        Err(Error::Xml(format!("invalid XML name {:?}", name)))
    }
}

#[inline]
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

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
    } else if root.is_some() {
        return Err(Error::Xml("multiple root elements".to_string()));
    } else {
        *root = Some(element);
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<()> {
    match stack.last_mut() {
        _ if text.is_empty() => {},
        Some(parent) => parent.push_text(text),
        None if is_xml_whitespace(text) => {},
        None => {
            return Err(Error::Xml(format!(
                "text outside of the root element: {:?}",
                text
            )));
        },
    }
    Ok(())
}

fn drop_layout_whitespace(element: &mut Element) {
    if element.children.iter().any(|c| matches!(c, Node::Element(_))) {
        element
            .children
            .retain(|c| !matches!(c, Node::Text(t) if is_xml_whitespace(t)));
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declaration_and_attributes() {
        let doc = parse(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:p="urn:p" saveSubsetFonts="1"><p:sldIdLst/></p:presentation>"#,
        )
        .unwrap();

        assert_eq!(doc.declaration, Some(Declaration::default()));
        assert_eq!(doc.root.name, "p:presentation");
        assert_eq!(doc.root.attr("xmlns:p"), Some("urn:p"));
        assert_eq!(doc.root.attr("saveSubsetFonts"), Some("1"));
        assert_eq!(doc.root.children.len(), 1);
    }

    #[test]
    fn test_layout_whitespace_dropped_but_lone_space_kept() {
        let doc = parse("<a:p>\n  <a:r>\n    <a:t> </a:t>\n  </a:r>\n</a:p>").unwrap();
        let run = doc.root.child("a:r").unwrap();
        assert_eq!(run.children.len(), 1);
        assert_eq!(run.child("a:t").unwrap().text(), " ");
    }

    #[test]
    fn test_references_and_cdata_merge_into_text() {
        let doc = parse("<t>a &amp; b &#x41;<![CDATA[<raw>]]>&lt;</t>").unwrap();
        assert_eq!(doc.root.children, vec![Node::Text("a & b A<raw><".into())]);
    }

    #[test]
    fn test_mixed_content_order() {
        let doc = parse("<p>one<b>two</b>three</p>").unwrap();
        assert_eq!(doc.root.children.len(), 3);
        assert_eq!(doc.root.children[0].as_text(), Some("one"));
        assert_eq!(doc.root.children[1].as_element().unwrap().text(), "two");
        assert_eq!(doc.root.children[2].as_text(), Some("three"));
    }

    #[test]
    fn test_comments_and_pis_dropped() {
        let doc = parse("<!-- c --><r><?pi x?><x/><!-- d --></r>").unwrap();
        assert_eq!(doc.declaration, None);
        assert_eq!(doc.root.children.len(), 1);
    }

    #[test]
    fn test_attribute_references_resolved() {
        let doc = parse(r#"<a v="x &amp; &quot;y&quot;&#10;"/>"#).unwrap();
        assert_eq!(doc.root.attr("v"), Some("x & \"y\"\n"));
    }

    #[test]
    fn test_malformed_documents() {
        for bad in [
            "",
            "   ",
            "<a>",
            "<a></b>",
            "<a/><b/>",
            "text<a/>",
            "<a>&bogus;</a>",
            r#"<a x="1" x="2"/>"#,
            "<a:t>bell\u{7}</a:t>",
            "<a:t>&#1;</a:t>",
            "<a:t>&#x0;</a:t>",
            "<a:t><![CDATA[\u{1b}]]></a:t>",
            r#"<a v="&#2;"/>"#,
            "<a v=\"\u{8}\"/>",
            "<1bad/>",
            "<a><-b/></a>",
            r#"<a 9x="1"/>"#,
        ] {
            assert!(parse(bad).is_err(), "expected failure for {:?}", bad);
        }
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth));

        let doc = parse(&nested(MAX_DEPTH)).unwrap();
        assert_eq!(doc.root.name, "a");

        let err = parse(&nested(MAX_DEPTH + 1)).unwrap_err();
        assert!(err.to_string().contains("nested deeper"));

        let self_closing = format!("{}<b/>{}", "<a>".repeat(MAX_DEPTH), "</a>".repeat(MAX_DEPTH));
        assert!(parse(&self_closing).is_err());
    }

    #[test]
    fn test_far_too_deep_is_rejected_without_recursion() {
        let depth = 200_000;
        let xml = format!("{}{}", "<a>".repeat(depth), "</a>".repeat(depth));
        assert!(parse(&xml).is_err());
    }
}
