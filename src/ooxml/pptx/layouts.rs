//! Slide layout lookups.
use super::SLIDE_LAYOUTS_DIR;
use crate::ooxml::opc::Package;
use indexmap::IndexMap;

/// Root element of a slide layout part.
pub const SLIDE_LAYOUT_TAG: &str = "p:sldLayout";

/// Whether `path` follows the slide layout naming convention: a file
/// directly under `ppt/slideLayouts/`, ending in `.xml`, with no underscore
/// in its name.
///
/// # Examples
///
/// ```
/// use pptx_parts::ooxml::pptx::is_layout_path;
/// assert!(is_layout_path("ppt/slideLayouts/slideLayout1.xml"));
/// assert!(!is_layout_path("ppt/slideLayouts/_rels/slideLayout1.xml.rels"));
/// assert!(!is_layout_path("ppt/slideLayouts/slide_layout.xml"));
/// assert!(!is_layout_path("ppt/slideMasters/slideMaster1.xml"));
/// ```
pub fn is_layout_path(path: &str) -> bool {
    path.strip_prefix(SLIDE_LAYOUTS_DIR).is_some_and(|name| {
        name.len() > ".xml".len() && name.ends_with(".xml") && !name.contains(['/', '_'])
    })
}

/// Map each declared layout type (`title`, `blank`, `obj`, ...) to the path
/// of the layout part declaring it.
///
/// Only markup parts whose root is `<p:sldLayout>` count; layouts without a
/// `type` attribute are skipped. When two layouts declare the same type the
/// one later in package order wins, which for a freshly decoded package is
/// archive order. The result is ordered by first appearance of each type.
///
/// # Examples
///
/// ```
/// use pptx_parts::common::xml::parse;
/// use pptx_parts::ooxml::pptx::layout_type_index;
/// use pptx_parts::Package;
///
/// let mut pkg = Package::new();
/// let title = parse(r#"<p:sldLayout type="title"/>"#)?;
/// let blank = parse(r#"<p:sldLayout type="blank"/>"#)?;
/// pkg.insert_markup("ppt/slideLayouts/slideLayout1.xml", title);
/// pkg.insert_markup("ppt/slideLayouts/slideLayout7.xml", blank);
///
/// let index = layout_type_index(&pkg);
/// assert_eq!(index["title"], "ppt/slideLayouts/slideLayout1.xml");
/// assert_eq!(index["blank"], "ppt/slideLayouts/slideLayout7.xml");
/// # Ok::<(), pptx_parts::Error>(())
/// ```
pub fn layout_type_index(pkg: &Package) -> IndexMap<String, String> {
    let mut index = IndexMap::new();

    for (path, part) in pkg.iter() {
        if !is_layout_path(path) {
            continue;
        }
        let Some(doc) = part.as_markup() else {
            continue;
        };
        if doc.root.name != SLIDE_LAYOUT_TAG {
            continue;
        }
        if let Some(layout_type) = doc.root.attr("type") {
            index.insert(layout_type.to_string(), path.to_string());
        }
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::parse;

    fn layout(pkg: &mut Package, path: &str, xml: &str) {
        pkg.insert_markup(path, parse(xml).unwrap());
    }

    #[test]
    fn test_title_and_blank() {
        let mut pkg = Package::new();
        layout(
            &mut pkg,
            "ppt/slideLayouts/slideLayout1.xml",
            r#"<p:sldLayout type="title" preserve="1"><p:cSld name="Title Slide"/></p:sldLayout>"#,
        );
        layout(
            &mut pkg,
            "ppt/slideLayouts/slideLayout2.xml",
            r#"<p:sldLayout preserve="1"><p:cSld name="Custom"/></p:sldLayout>"#,
        );
        layout(
            &mut pkg,
            "ppt/slideLayouts/slideLayout7.xml",
            r#"<p:sldLayout type="blank"/>"#,
        );

        let index = layout_type_index(&pkg);
        assert_eq!(index.len(), 2);
        assert_eq!(index["title"], "ppt/slideLayouts/slideLayout1.xml");
        assert_eq!(index["blank"], "ppt/slideLayouts/slideLayout7.xml");
        assert!(!index.values().any(|p| p.ends_with("slideLayout2.xml")));
    }

    #[test]
    fn test_non_layout_parts_ignored() {
        let mut pkg = Package::new();
        layout(
            &mut pkg,
            "ppt/slideMasters/slideMaster1.xml",
            r#"<p:sldLayout type="title"/>"#,
        );
        layout(
            &mut pkg,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            r#"<Relationships type="title"/>"#,
        );
        layout(
            &mut pkg,
            "ppt/slideLayouts/slide_layout.xml",
            r#"<p:sldLayout type="obj"/>"#,
        );
        layout(
            &mut pkg,
            "ppt/slideLayouts/slideLayout3.xml",
            r#"<p:sldMaster type="tx"/>"#,
        );
        pkg.insert_binary(
            "ppt/slideLayouts/slideLayout4.xml",
            br#"<p:sldLayout type="tx"/>"#.to_vec(),
        );

        assert!(layout_type_index(&pkg).is_empty());
    }

    #[test]
    fn test_duplicate_type_last_wins() {
        let mut pkg = Package::new();
        layout(&mut pkg, "ppt/slideLayouts/slideLayout2.xml", r#"<p:sldLayout type="obj"/>"#);
        layout(&mut pkg, "ppt/slideLayouts/slideLayout10.xml", r#"<p:sldLayout type="obj"/>"#);

        let index = layout_type_index(&pkg);
        assert_eq!(index["obj"], "ppt/slideLayouts/slideLayout10.xml");
    }
}
