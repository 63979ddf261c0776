//! Owned XML tree types.
use super::chars::is_xml_whitespace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The `<?xml ...?>` declaration of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Default for Declaration {
    /// The declaration PowerPoint writes on every part.
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: Some("yes".to_string()),
        }
    }
}

/// A parsed markup part: optional declaration plus exactly one root element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlDocument {
    pub declaration: Option<Declaration>,
    pub root: Element,
}

impl XmlDocument {
    /// Create a document with the default declaration.
    pub fn new(root: Element) -> Self {
        Self {
            declaration: Some(Declaration::default()),
            root,
        }
    }

    /// Bring the tree into the form it has after a write/read round trip.
    ///
    /// See [`Element::normalize`].
    pub fn normalize(&mut self) {
        self.root.normalize();
    }

    /// Owned variant of [`normalize`](Self::normalize).
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(t) => Some(t),
            Node::Element(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An XML element.
///
/// Names are stored as written, including any namespace prefix
/// (`p:sldId`, `r:id`). Attribute order is not significant; the map keeps
/// them sorted so that serialization is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Builder-style text append.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    #[inline]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Append text, merging with a trailing text node.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(&text);
        } else {
            self.children.push(Node::Text(text));
        }
    }

    /// Iterate over child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Iterate over child elements with the given qualified name.
    pub fn children_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.name == name)
    }

    /// First child element with the given qualified name.
    pub fn child<'a>(&'a self, name: &str) -> Option<&'a Element> {
        self.children_named(name).next()
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children.iter().filter_map(Node::as_text).collect()
    }

    /// Bring this element and its descendants into canonical text layout:
    ///
    /// - adjacent text nodes are merged
    /// - empty text nodes are removed
    /// - whitespace-only text is removed from elements that also have child
    ///   elements (it is kept where it is the only content, as in
    ///   `<a:t> </a:t>`)
    ///
    /// Parsed trees are always in this form.
    pub fn normalize(&mut self) {
        let children = std::mem::take(&mut self.children);
        for child in children {
            match child {
                Node::Text(t) if t.is_empty() => {},
                Node::Text(t) => self.push_text(t),
                Node::Element(mut e) => {
                    e.normalize();
                    self.children.push(Node::Element(e));
                },
            }
        }

        if self.children.iter().any(|c| matches!(c, Node::Element(_))) {
            self.children.retain(|c| match c {
                Node::Text(t) => !is_xml_whitespace(t),
                Node::Element(_) => true,
            });
        }
    }

    /// The part of the name after the namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name.rsplit(':').next().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_text_merges() {
        let mut e = Element::new("a:t");
        e.push_text("Hello");
        e.push_text(", world");
        assert_eq!(e.children, vec![Node::Text("Hello, world".into())]);
    }

    #[test]
    fn test_children_named() {
        let lst = Element::new("p:sldIdLst")
            .with_child(Element::new("p:sldId").with_attr("id", "256"))
            .with_text("\n")
            .with_child(Element::new("p:extLst"))
            .with_child(Element::new("p:sldId").with_attr("id", "257"));
        let ids: Vec<_> = lst.children_named("p:sldId").filter_map(|e| e.attr("id")).collect();
        assert_eq!(ids, ["256", "257"]);
        assert_eq!(lst.elements().count(), 3);
    }

    #[test]
    fn test_child_outlives_lookup_name() {
        let lst = Element::new("p:sldIdLst")
            .with_child(Element::new("p:sldId").with_attr("id", "256"));
        let found = {
            let name = format!("p:{}", "sldId");
            lst.child(&name)
        };
        assert_eq!(found.and_then(|e| e.attr("id")), Some("256"));
    }

    #[test]
    fn test_normalize_text_layout() {
        let mut e = Element {
            name: "a:p".into(),
            attributes: Default::default(),
            children: vec![
                Node::Text(String::new()),
                Node::Element(Element::new("a:r")),
                Node::Text(" ".into()),
                Node::Text("\n".into()),
                Node::Element(Element {
                    name: "a:t".into(),
                    attributes: Default::default(),
                    children: vec![
                        Node::Text("Hello".into()),
                        Node::Text(String::new()),
                        Node::Text(", world".into()),
                    ],
                }),
                Node::Text(String::new()),
            ],
        };
        e.normalize();

        assert_eq!(
            e,
            Element::new("a:p")
                .with_child(Element::new("a:r"))
                .with_child(Element::new("a:t").with_text("Hello, world"))
        );
    }

    #[test]
    fn test_normalize_keeps_lone_whitespace_and_mixed_text() {
        let mut lone = Element {
            name: "a:t".into(),
            attributes: Default::default(),
            children: vec![Node::Text(" ".into()), Node::Text(String::new())],
        };
        lone.normalize();
        assert_eq!(lone.children, vec![Node::Text(" ".into())]);

        let mut mixed = Element {
            name: "p".into(),
            attributes: Default::default(),
            children: vec![
                Node::Text("one ".into()),
                Node::Element(Element::new("b")),
                Node::Text(" two".into()),
            ],
        };
        let before = mixed.clone();
        mixed.normalize();
        assert_eq!(mixed, before);

        let mut empty = Element {
            name: "a".into(),
            attributes: Default::default(),
            children: vec![Node::Text(String::new())],
        };
        empty.normalize();
        assert!(empty.children.is_empty());
    }

    #[test]
    fn test_local_name() {
        assert_eq!(Element::new("p:sldLayout").local_name(), "sldLayout");
        assert_eq!(Element::new("Types").local_name(), "Types");
    }
}
